//! Client-held accessibility settings state.
//!
//! Mirrors the server record with optimistic writes: toggles apply locally
//! before the network round-trip, each touched flag is marked [`FlagSync::Pending`]
//! until the server confirms, and a failed write keeps the optimistic value
//! while surfacing the error. There is no rollback; the next successful
//! persist reconciles with whatever the server returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{SettingsCommand, SettingsQuery, UpdateSettingsRequest};
use crate::domain::{AccessibilityFlags, AccessibilityFlagsPatch, FlagName, UserId};

/// Synchronisation state of one flag relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSync {
    /// The server has acknowledged this value.
    Confirmed,
    /// A write carrying this value is in flight or has failed.
    Pending,
}

/// Per-user client state for accessibility settings.
pub struct SettingsClientState {
    query: Arc<dyn SettingsQuery>,
    command: Arc<dyn SettingsCommand>,
    user_id: UserId,
    flags: AccessibilityFlags,
    sync: BTreeMap<FlagName, FlagSync>,
    loading: bool,
    error: Option<String>,
}

impl SettingsClientState {
    /// Create state for a user. Flags start at their defaults and the state
    /// reports loading until [`load`](Self::load) completes.
    pub fn new(
        query: Arc<dyn SettingsQuery>,
        command: Arc<dyn SettingsCommand>,
        user_id: UserId,
    ) -> Self {
        Self {
            query,
            command,
            user_id,
            flags: AccessibilityFlags::default(),
            sync: BTreeMap::new(),
            loading: true,
            error: None,
        }
    }

    /// Fetch the server record and adopt it wholesale.
    ///
    /// On failure the defaults stay in place and the error message is kept
    /// for display. Loading always clears, success or not.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.query.fetch_settings(&self.user_id).await {
            Ok(settings) => {
                self.flags = settings.flags;
                self.mark_all_confirmed();
                self.error = None;
            }
            Err(err) => {
                warn!(user_id = %self.user_id, error = %err, "settings load failed");
                self.error = Some(err.message().to_owned());
            }
        }
        self.loading = false;
    }

    /// Optimistically set one flag and persist the full set.
    pub async fn set_flag(&mut self, flag: FlagName, value: bool) {
        self.apply_patch(AccessibilityFlagsPatch::single(flag, value))
            .await;
    }

    /// Optimistically merge a multi-flag patch and persist the full set.
    ///
    /// An empty patch is a no-op and issues no write.
    pub async fn apply_patch(&mut self, patch: AccessibilityFlagsPatch) {
        if patch.is_empty() {
            return;
        }

        let touched = patch.apply_to(&mut self.flags);
        for flag in touched {
            self.sync.insert(flag, FlagSync::Pending);
        }
        self.persist().await;
    }

    async fn persist(&mut self) {
        let request = UpdateSettingsRequest {
            user_id: self.user_id.clone(),
            flags: self.flags,
        };

        match self.command.update(request).await {
            Ok(response) => {
                // The server copy is authoritative after a confirmed write.
                self.flags = response.settings.flags;
                self.mark_all_confirmed();
                self.error = None;
                debug!(user_id = %self.user_id, "settings write confirmed");
            }
            Err(err) => {
                // Optimistic values stay; the pending markers record the gap.
                warn!(user_id = %self.user_id, error = %err, "settings write failed");
                self.error = Some(err.message().to_owned());
            }
        }
    }

    fn mark_all_confirmed(&mut self) {
        for flag in FlagName::ALL {
            self.sync.insert(flag, FlagSync::Confirmed);
        }
    }

    /// Current flag values, optimistic writes included.
    pub fn flags(&self) -> &AccessibilityFlags {
        &self.flags
    }

    /// Whether the initial load is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent load or persist failure, if unresolved.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Synchronisation state of one flag. Flags never touched report
    /// [`FlagSync::Confirmed`].
    pub fn sync_of(&self, flag: FlagName) -> FlagSync {
        self.sync.get(&flag).copied().unwrap_or(FlagSync::Confirmed)
    }

    /// Whether any flag still awaits server confirmation.
    pub fn has_pending_writes(&self) -> bool {
        self.sync.values().any(|state| *state == FlagSync::Pending)
    }
}
