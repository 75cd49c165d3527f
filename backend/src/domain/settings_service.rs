//! Accessibility settings domain service.
//!
//! Implements the driving ports over the settings repository and the user
//! directory. The service owns the two behavioural guarantees of the
//! boundary: a valid identity always has a settings record after a read
//! (lazy default provisioning, duplicate-create races resolved by re-read),
//! and every update replaces the full flag set.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{
    AccessibilitySettingsRepository, SettingsCommand, SettingsQuery, SettingsRepositoryError,
    UpdateSettingsRequest, UpdateSettingsResponse, UserDirectory, UserDirectoryError,
};
use crate::domain::{AccessibilitySettings, Error, UserId};

/// Settings service implementing [`SettingsQuery`] and [`SettingsCommand`].
#[derive(Clone)]
pub struct AccessibilitySettingsService<R, D> {
    settings_repo: Arc<R>,
    user_directory: Arc<D>,
}

impl<R, D> AccessibilitySettingsService<R, D> {
    /// Create a new service with the given collaborators.
    pub fn new(settings_repo: Arc<R>, user_directory: Arc<D>) -> Self {
        Self {
            settings_repo,
            user_directory,
        }
    }
}

impl<R, D> AccessibilitySettingsService<R, D>
where
    R: AccessibilitySettingsRepository,
    D: UserDirectory,
{
    fn map_repository_error(err: SettingsRepositoryError) -> Error {
        match err {
            SettingsRepositoryError::Connection { message } => {
                error!(error = %message, "settings repository unreachable");
                Error::service_unavailable(format!("settings store unavailable: {message}"))
            }
            SettingsRepositoryError::Query { message } => {
                error!(error = %message, "settings repository query failed");
                Error::internal(format!("settings store error: {message}"))
            }
            SettingsRepositoryError::Conflict { message } => {
                Error::conflict(format!("settings row conflict: {message}"))
            }
        }
    }

    fn map_directory_error(err: UserDirectoryError) -> Error {
        match err {
            UserDirectoryError::Connection { message } => {
                error!(error = %message, "user directory unreachable");
                Error::service_unavailable(format!("user directory unavailable: {message}"))
            }
            UserDirectoryError::Query { message } => {
                error!(error = %message, "user directory query failed");
                Error::internal(format!("user directory error: {message}"))
            }
        }
    }

    /// Provision the parent identity row before touching settings.
    ///
    /// Settings rows reference users, so the directory must be consulted
    /// first. Placeholder provisioning lives in the directory adapter, not
    /// here.
    async fn ensure_parent_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.user_directory
            .ensure_user(user_id)
            .await
            .map(|_| ())
            .map_err(Self::map_directory_error)
    }

    async fn fetch_or_create_defaults(
        &self,
        user_id: &UserId,
    ) -> Result<AccessibilitySettings, Error> {
        if let Some(settings) = self
            .settings_repo
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Ok(settings);
        }

        match self.settings_repo.create_default(user_id).await {
            Ok(settings) => Ok(settings),
            Err(SettingsRepositoryError::Conflict { .. }) => {
                // Lost the duplicate-create race; the winner's row is the
                // canonical one.
                warn!(user_id = %user_id, "default provisioning raced, re-reading");
                self.settings_repo
                    .find_by_user_id(user_id)
                    .await
                    .map_err(Self::map_repository_error)?
                    .ok_or_else(|| {
                        Error::internal("settings row disappeared during race resolution")
                    })
            }
            Err(err) => Err(Self::map_repository_error(err)),
        }
    }
}

#[async_trait]
impl<R, D> SettingsQuery for AccessibilitySettingsService<R, D>
where
    R: AccessibilitySettingsRepository,
    D: UserDirectory,
{
    async fn fetch_settings(&self, user_id: &UserId) -> Result<AccessibilitySettings, Error> {
        self.ensure_parent_user(user_id).await?;
        self.fetch_or_create_defaults(user_id).await
    }
}

#[async_trait]
impl<R, D> SettingsCommand for AccessibilitySettingsService<R, D>
where
    R: AccessibilitySettingsRepository,
    D: UserDirectory,
{
    async fn update(
        &self,
        request: UpdateSettingsRequest,
    ) -> Result<UpdateSettingsResponse, Error> {
        self.ensure_parent_user(&request.user_id).await?;
        let settings = self
            .settings_repo
            .upsert(&request.user_id, request.flags)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(UpdateSettingsResponse { settings })
    }
}
