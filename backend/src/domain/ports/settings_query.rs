//! Driving port for accessibility settings reads.
//!
//! Inbound adapters and the client cache use this port to fetch the caller's
//! settings. Implementations guarantee a record exists after a successful
//! call: a syntactically valid identity never observes "not found".

use async_trait::async_trait;

use crate::domain::{AccessibilitySettings, Error, UserId};

/// Domain use-case port for fetching accessibility settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsQuery: Send + Sync {
    /// Fetch the settings for a user, provisioning the all-false default
    /// record (and a placeholder user) when none exists yet.
    async fn fetch_settings(&self, user_id: &UserId) -> Result<AccessibilitySettings, Error>;
}

/// Fixture query returning a fresh default record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSettingsQuery;

#[async_trait]
impl SettingsQuery for FixtureSettingsQuery {
    async fn fetch_settings(&self, user_id: &UserId) -> Result<AccessibilitySettings, Error> {
        Ok(AccessibilitySettings::new_default(user_id.clone()))
    }
}
