//! PostgreSQL-backed settings repository using Diesel.
//!
//! Implements the domain's `AccessibilitySettingsRepository` port. The upsert
//! is a single `INSERT ... ON CONFLICT (user_id) DO UPDATE` statement so the
//! last writer wins atomically and concurrent full-set writes can never be
//! interleaved field-by-field.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AccessibilitySettingsRepository, SettingsRepositoryError};
use crate::domain::{AccessibilityFlags, AccessibilitySettings, UserId};

use super::models::{AccessibilitySettingsRow, AccessibilitySettingsUpdate, NewAccessibilitySettingsRow};
use super::pool::{DbPool, PoolError};
use super::schema::accessibility_settings;

/// Diesel-backed implementation of the settings repository port.
#[derive(Clone)]
pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain settings repository errors.
fn map_pool_error(error: PoolError) -> SettingsRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SettingsRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain settings repository errors.
fn map_diesel_error(error: diesel::result::Error) -> SettingsRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            SettingsRepositoryError::conflict("settings row already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SettingsRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => SettingsRepositoryError::query("record not found"),
        _ => SettingsRepositoryError::query("database error"),
    }
}

#[async_trait]
impl AccessibilitySettingsRepository for DieselSettingsRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilitySettings>, SettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<AccessibilitySettingsRow> = accessibility_settings::table
            .filter(accessibility_settings::user_id.eq(user_id.as_uuid()))
            .select(AccessibilitySettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(AccessibilitySettingsRow::into_domain))
    }

    async fn create_default(
        &self,
        user_id: &UserId,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAccessibilitySettingsRow::from_flags(
            *user_id.as_uuid(),
            AccessibilityFlags::default(),
        );

        let row: AccessibilitySettingsRow = diesel::insert_into(accessibility_settings::table)
            .values(&new_row)
            .returning(AccessibilitySettingsRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        flags: AccessibilityFlags,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAccessibilitySettingsRow::from_flags(*user_id.as_uuid(), flags);
        let update = AccessibilitySettingsUpdate::from_flags(flags);

        // The conflict target is the UNIQUE(user_id) constraint, so the
        // existing row keeps its id and created_at.
        let row: AccessibilitySettingsRow = diesel::insert_into(accessibility_settings::table)
            .values(&new_row)
            .on_conflict(accessibility_settings::user_id)
            .do_update()
            .set(&update)
            .returning(AccessibilitySettingsRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }
}
