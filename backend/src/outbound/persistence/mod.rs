//! Persistence adapters for the settings store.

mod diesel_settings_repository;
mod diesel_user_directory;
pub mod memory;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_settings_repository::DieselSettingsRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use memory::{InMemorySettingsRepository, InMemoryUserDirectory};
pub use pool::{DbPool, PoolConfig, PoolError};
