//! Port for the identity collaborator.
//!
//! The settings subsystem never authenticates; it only requires that a parent
//! user row exists before a settings row references it. `ensure_user`
//! provisions a placeholder identity when none exists yet. That behaviour is
//! a development stand-in for a real identity service and is deliberately
//! isolated behind this port so it can be replaced without touching the
//! settings service.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

/// Port guaranteeing referential integrity for settings rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Ensure a user row exists, creating a placeholder when absent.
    ///
    /// Returns the existing or newly created record. Concurrent calls for the
    /// same identifier must converge on a single row.
    async fn ensure_user(&self, id: &UserId) -> Result<User, UserDirectoryError>;
}

/// Fixture directory that fabricates placeholder users without storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }

    async fn ensure_user(&self, id: &UserId) -> Result<User, UserDirectoryError> {
        Ok(User::placeholder(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_ensure_user_returns_placeholder() {
        let directory = FixtureUserDirectory;
        let id = UserId::random();

        let user = directory.ensure_user(&id).await.expect("fixture ensure");

        assert_eq!(user.id(), &id);
        assert!(user.email().as_ref().contains("placeholder"));
    }

    #[tokio::test]
    async fn fixture_lookup_misses() {
        let directory = FixtureUserDirectory;
        let found = directory
            .find_by_id(&UserId::random())
            .await
            .expect("fixture lookup");
        assert!(found.is_none());
    }
}
