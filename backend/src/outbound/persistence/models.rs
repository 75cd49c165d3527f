//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{AccessibilityFlags, AccessibilitySettings, Email, User, UserId};

use super::schema::{accessibility_settings, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert a stored row into the domain user.
    ///
    /// Rows were validated on insert; a row that no longer passes validation
    /// indicates out-of-band tampering and is surfaced as an error by the
    /// caller.
    pub(crate) fn into_domain(self) -> Result<User, crate::domain::UserValidationError> {
        let email = Email::new(self.email)?;
        Ok(User::new(UserId::from_uuid(self.id), email, self.display_name))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: Option<&'a str>,
}

/// Row struct for reading from the accessibility_settings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accessibility_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccessibilitySettingsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub voice_navigation: bool,
    pub screen_reader: bool,
    pub high_contrast: bool,
    pub large_text: bool,
    pub keyboard_nav: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccessibilitySettingsRow {
    pub(crate) fn into_domain(self) -> AccessibilitySettings {
        AccessibilitySettings {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            flags: AccessibilityFlags {
                voice_navigation: self.voice_navigation,
                screen_reader: self.screen_reader,
                high_contrast: self.high_contrast,
                large_text: self.large_text,
                keyboard_nav: self.keyboard_nav,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Insertable struct for creating new settings records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accessibility_settings)]
pub(crate) struct NewAccessibilitySettingsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub voice_navigation: bool,
    pub screen_reader: bool,
    pub high_contrast: bool,
    pub large_text: bool,
    pub keyboard_nav: bool,
}

impl NewAccessibilitySettingsRow {
    pub(crate) fn from_flags(user_id: Uuid, flags: AccessibilityFlags) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            voice_navigation: flags.voice_navigation,
            screen_reader: flags.screen_reader,
            high_contrast: flags.high_contrast,
            large_text: flags.large_text,
            keyboard_nav: flags.keyboard_nav,
        }
    }
}

/// Changeset struct applied when an upsert hits an existing row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accessibility_settings)]
pub(crate) struct AccessibilitySettingsUpdate {
    pub voice_navigation: bool,
    pub screen_reader: bool,
    pub high_contrast: bool,
    pub large_text: bool,
    pub keyboard_nav: bool,
    pub updated_at: DateTime<Utc>,
}

impl AccessibilitySettingsUpdate {
    pub(crate) fn from_flags(flags: AccessibilityFlags) -> Self {
        Self {
            voice_navigation: flags.voice_navigation,
            screen_reader: flags.screen_reader,
            high_contrast: flags.high_contrast,
            large_text: flags.large_text,
            keyboard_nav: flags.keyboard_nav,
            updated_at: Utc::now(),
        }
    }
}
