//! PostgreSQL-backed user directory using Diesel.
//!
//! Provisions placeholder user rows so settings rows always have a parent.
//! `ensure_user` inserts with `ON CONFLICT DO NOTHING` then re-reads, so
//! concurrent calls for the same identifier converge on one row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user directory port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserDirectoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserDirectoryError::connection("database connection error")
        }
        _ => UserDirectoryError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserDirectoryError> {
    row.into_domain()
        .map_err(|err| UserDirectoryError::query(format!("corrupt user row: {err}")))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map(row_to_user).transpose()
    }

    async fn ensure_user(&self, id: &UserId) -> Result<User, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let placeholder = User::placeholder(id.clone());
        let new_row = NewUserRow {
            id: *id.as_uuid(),
            email: placeholder.email().as_ref(),
            display_name: placeholder.display_name(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // Re-read rather than trusting the placeholder so a pre-existing row
        // (real identity data) wins over the synthetic one.
        let row: UserRow = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, UserDirectoryError::Connection { .. }));
    }

    #[rstest]
    fn corrupt_rows_are_reported_not_panicked() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "broken".to_owned(),
            display_name: None,
            created_at: Utc::now(),
        };

        let err = row_to_user(row).expect_err("corrupt email");
        assert!(err.to_string().contains("corrupt user row"));
    }
}
