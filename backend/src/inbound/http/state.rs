//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{SettingsCommand, SettingsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub settings_query: Arc<dyn SettingsQuery>,
    pub settings: Arc<dyn SettingsCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(settings_query: Arc<dyn SettingsQuery>, settings: Arc<dyn SettingsCommand>) -> Self {
        Self {
            settings_query,
            settings,
        }
    }
}
