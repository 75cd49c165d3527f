//! Port for accessibility settings persistence.
//!
//! The [`AccessibilitySettingsRepository`] trait is the contract for the
//! Settings Store: durable one-row-per-user storage with lazy default
//! provisioning and an atomic full-replace upsert.

use async_trait::async_trait;

use crate::domain::{AccessibilityFlags, AccessibilitySettings, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by settings repository adapters.
    pub enum SettingsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "settings repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "settings repository query failed: {message}",
        /// A settings row already exists for the user.
        Conflict { message: String } =>
            "settings row conflict: {message}",
    }
}

/// Port for accessibility settings storage and retrieval.
///
/// # Record semantics
///
/// - At most one record exists per user; adapters enforce this with a unique
///   constraint (or equivalent) on the user identifier.
/// - `create_default` fails with [`SettingsRepositoryError::Conflict`] when a
///   record already exists; callers resolve the duplicate-create race by
///   re-reading.
/// - `upsert` replaces the complete flag set atomically per user: concurrent
///   upserts must never interleave into a field-wise mix of two writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessibilitySettingsRepository: Send + Sync {
    /// Fetch the settings record for a user.
    ///
    /// Returns `None` when the user has never read or written settings.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilitySettings>, SettingsRepositoryError>;

    /// Insert the all-false default record for a user.
    async fn create_default(
        &self,
        user_id: &UserId,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError>;

    /// Replace the full flag set, creating the record when absent.
    ///
    /// Existing records keep their `id` and `created_at`; `updated_at` is
    /// bumped on every call.
    async fn upsert(
        &self,
        user_id: &UserId,
        flags: AccessibilityFlags,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups always miss; creates and upserts succeed without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSettingsRepository;

#[async_trait]
impl AccessibilitySettingsRepository for FixtureSettingsRepository {
    async fn find_by_user_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<AccessibilitySettings>, SettingsRepositoryError> {
        Ok(None)
    }

    async fn create_default(
        &self,
        user_id: &UserId,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError> {
        Ok(AccessibilitySettings::new_default(user_id.clone()))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        flags: AccessibilityFlags,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError> {
        Ok(AccessibilitySettings::with_flags(user_id.clone(), flags))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_lookup_misses() {
        let repo = FixtureSettingsRepository;
        let result = repo
            .find_by_user_id(&UserId::random())
            .await
            .expect("fixture lookup should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fixture_create_default_returns_all_false() {
        let repo = FixtureSettingsRepository;
        let user_id = UserId::random();

        let settings = repo
            .create_default(&user_id)
            .await
            .expect("fixture create should succeed");

        assert_eq!(settings.user_id, user_id);
        assert_eq!(settings.flags, AccessibilityFlags::default());
    }

    #[tokio::test]
    async fn fixture_upsert_echoes_flags() {
        let repo = FixtureSettingsRepository;
        let flags = AccessibilityFlags {
            high_contrast: true,
            ..Default::default()
        };

        let settings = repo
            .upsert(&UserId::random(), flags)
            .await
            .expect("fixture upsert should succeed");

        assert_eq!(settings.flags, flags);
    }

    #[rstest]
    fn conflict_error_formats_message() {
        let error = SettingsRepositoryError::conflict("row exists for user");
        assert!(error.to_string().contains("row exists for user"));
    }
}
