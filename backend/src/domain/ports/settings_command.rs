//! Driving port for accessibility settings updates.
//!
//! Updates are full replacements: every request carries all five flags and
//! the store never sees a partial flag set. There is no per-field merge on
//! the server side; the client merges locally before calling this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AccessibilityFlags, AccessibilitySettings, Error, UserId};

/// Request to replace a user's accessibility flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// The user whose settings are being replaced.
    pub user_id: UserId,
    /// The complete validated flag set.
    pub flags: AccessibilityFlags,
}

/// Response from replacing a user's accessibility flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsResponse {
    /// The persisted record with its fresh `updated_at`.
    pub settings: AccessibilitySettings,
}

/// Domain use-case port for replacing accessibility settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsCommand: Send + Sync {
    /// Replace the full flag set for a user.
    ///
    /// # Errors
    ///
    /// Returns an error when the parent user cannot be provisioned or the
    /// store rejects the write.
    async fn update(&self, request: UpdateSettingsRequest)
        -> Result<UpdateSettingsResponse, Error>;
}

/// Fixture command echoing the requested flags without persisting.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSettingsCommand;

#[async_trait]
impl SettingsCommand for FixtureSettingsCommand {
    async fn update(
        &self,
        request: UpdateSettingsRequest,
    ) -> Result<UpdateSettingsResponse, Error> {
        Ok(UpdateSettingsResponse {
            settings: AccessibilitySettings::with_flags(request.user_id, request.flags),
        })
    }
}
