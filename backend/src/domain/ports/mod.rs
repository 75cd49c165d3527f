//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod settings_command;
mod settings_query;
mod settings_repository;
mod user_directory;

#[cfg(test)]
pub use settings_command::MockSettingsCommand;
pub use settings_command::{
    FixtureSettingsCommand, SettingsCommand, UpdateSettingsRequest, UpdateSettingsResponse,
};
#[cfg(test)]
pub use settings_query::MockSettingsQuery;
pub use settings_query::{FixtureSettingsQuery, SettingsQuery};
#[cfg(test)]
pub use settings_repository::MockAccessibilitySettingsRepository;
pub use settings_repository::{
    AccessibilitySettingsRepository, FixtureSettingsRepository, SettingsRepositoryError,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
