//! In-memory adapters for the settings store ports.
//!
//! Used when the server runs without a database and by integration tests.
//! A single mutex guards each map, so every write is atomic at the whole-map
//! level and two concurrent full-set writes can never interleave per field.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    AccessibilitySettingsRepository, SettingsRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::{AccessibilityFlags, AccessibilitySettings, User, UserId};

/// In-memory settings repository keyed by user UUID.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    records: Mutex<HashMap<Uuid, AccessibilitySettings>>,
}

impl InMemorySettingsRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, AccessibilitySettings>>, SettingsRepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| SettingsRepositoryError::connection("settings store lock poisoned"))
    }
}

#[async_trait]
impl AccessibilitySettingsRepository for InMemorySettingsRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilitySettings>, SettingsRepositoryError> {
        let records = self.lock()?;
        Ok(records.get(user_id.as_uuid()).cloned())
    }

    async fn create_default(
        &self,
        user_id: &UserId,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError> {
        let mut records = self.lock()?;
        if records.contains_key(user_id.as_uuid()) {
            return Err(SettingsRepositoryError::conflict(
                "settings row already exists",
            ));
        }

        let settings = AccessibilitySettings::new_default(user_id.clone());
        records.insert(*user_id.as_uuid(), settings.clone());
        Ok(settings)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        flags: AccessibilityFlags,
    ) -> Result<AccessibilitySettings, SettingsRepositoryError> {
        let mut records = self.lock()?;
        let settings = match records.get(user_id.as_uuid()) {
            // Existing rows keep their id and created_at; only the flags and
            // updated_at move.
            Some(existing) => AccessibilitySettings {
                id: existing.id,
                user_id: user_id.clone(),
                flags,
                created_at: existing.created_at,
                updated_at: Utc::now(),
            },
            None => AccessibilitySettings::with_flags(user_id.clone(), flags),
        };
        records.insert(*user_id.as_uuid(), settings.clone());
        Ok(settings)
    }
}

/// In-memory user directory keyed by user UUID.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, User>>, UserDirectoryError> {
        self.users
            .lock()
            .map_err(|_| UserDirectoryError::connection("user directory lock poisoned"))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let users = self.lock()?;
        Ok(users.get(id.as_uuid()).cloned())
    }

    async fn ensure_user(&self, id: &UserId) -> Result<User, UserDirectoryError> {
        let mut users = self.lock()?;
        let user = users
            .entry(*id.as_uuid())
            .or_insert_with(|| User::placeholder(id.clone()));
        Ok(user.clone())
    }
}
