//! HTTP inbound adapter.

pub mod error;
pub mod health;
pub mod identity;
pub mod schemas;
pub mod settings;
pub mod state;
pub mod validation;

pub use error::ApiResult;
