//! Domain model for the accessibility settings subsystem.
//!
//! The domain layer is free of web and persistence concerns. Adapters depend
//! on it through the traits in [`ports`].

mod error;
pub mod ports;
mod settings;
mod settings_service;
mod trace_id;
mod user;

pub use error::{Error, ErrorCode};
pub use settings::{
    AccessibilityFlags, AccessibilityFlagsPatch, AccessibilitySettings, FlagName,
    ParseFlagNameError,
};
pub use settings_service::AccessibilitySettingsService;
pub use trace_id::{TraceId, TRACE_ID_HEADER};
pub use user::{Email, User, UserId, UserValidationError};
