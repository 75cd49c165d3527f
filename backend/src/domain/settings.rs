//! Accessibility settings aggregate and flag primitives.
//!
//! One [`AccessibilitySettings`] record exists per user once that user has
//! read or written settings. The five flags are always concrete booleans;
//! partial state never persists. Updates are full replacements of the flag
//! set, so the aggregate carries no per-field versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Names of the five accessibility flags.
///
/// The string form matches the API field names.
///
/// # Examples
///
/// ```
/// # use backend::domain::FlagName;
/// assert_eq!(FlagName::HighContrast.as_str(), "highContrast");
/// assert_eq!("largeText".parse::<FlagName>(), Ok(FlagName::LargeText));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagName {
    /// Spoken-phrase navigation of visible controls.
    VoiceNavigation,
    /// Extra hints for screen readers.
    ScreenReader,
    /// High-contrast colour scheme.
    HighContrast,
    /// Enlarged body text.
    LargeText,
    /// Visible focus outlines for keyboard navigation.
    KeyboardNav,
}

impl FlagName {
    /// All five flags, in API field order.
    pub const ALL: [Self; 5] = [
        Self::VoiceNavigation,
        Self::ScreenReader,
        Self::HighContrast,
        Self::LargeText,
        Self::KeyboardNav,
    ];

    /// Returns the API field name for the flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VoiceNavigation => "voiceNavigation",
            Self::ScreenReader => "screenReader",
            Self::HighContrast => "highContrast",
            Self::LargeText => "largeText",
            Self::KeyboardNav => "keyboardNav",
        }
    }
}

impl std::fmt::Display for FlagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown flag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlagNameError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseFlagNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown accessibility flag: {}", self.input)
    }
}

impl std::error::Error for ParseFlagNameError {}

impl std::str::FromStr for FlagName {
    type Err = ParseFlagNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| ParseFlagNameError {
                input: s.to_owned(),
            })
    }
}

/// The five boolean accessibility flags.
///
/// All flags default to `false`; a user who has never touched settings gets
/// this value verbatim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityFlags {
    /// Spoken-phrase navigation of visible controls.
    pub voice_navigation: bool,
    /// Extra hints for screen readers.
    pub screen_reader: bool,
    /// High-contrast colour scheme.
    pub high_contrast: bool,
    /// Enlarged body text.
    pub large_text: bool,
    /// Visible focus outlines for keyboard navigation.
    pub keyboard_nav: bool,
}

impl AccessibilityFlags {
    /// Read one flag by name.
    pub fn get(&self, flag: FlagName) -> bool {
        match flag {
            FlagName::VoiceNavigation => self.voice_navigation,
            FlagName::ScreenReader => self.screen_reader,
            FlagName::HighContrast => self.high_contrast,
            FlagName::LargeText => self.large_text,
            FlagName::KeyboardNav => self.keyboard_nav,
        }
    }

    /// Write one flag by name.
    pub fn set(&mut self, flag: FlagName, value: bool) {
        match flag {
            FlagName::VoiceNavigation => self.voice_navigation = value,
            FlagName::ScreenReader => self.screen_reader = value,
            FlagName::HighContrast => self.high_contrast = value,
            FlagName::LargeText => self.large_text = value,
            FlagName::KeyboardNav => self.keyboard_nav = value,
        }
    }

    /// Iterate the flags in API field order.
    pub fn iter(&self) -> impl Iterator<Item = (FlagName, bool)> + '_ {
        FlagName::ALL.into_iter().map(|flag| (flag, self.get(flag)))
    }
}

/// Partial flag update used by the client for multi-flag optimistic merges.
///
/// Absent fields leave the current value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityFlagsPatch {
    /// New value for `voiceNavigation`, if any.
    pub voice_navigation: Option<bool>,
    /// New value for `screenReader`, if any.
    pub screen_reader: Option<bool>,
    /// New value for `highContrast`, if any.
    pub high_contrast: Option<bool>,
    /// New value for `largeText`, if any.
    pub large_text: Option<bool>,
    /// New value for `keyboardNav`, if any.
    pub keyboard_nav: Option<bool>,
}

impl AccessibilityFlagsPatch {
    /// Build a patch setting a single flag.
    pub fn single(flag: FlagName, value: bool) -> Self {
        let mut patch = Self::default();
        match flag {
            FlagName::VoiceNavigation => patch.voice_navigation = Some(value),
            FlagName::ScreenReader => patch.screen_reader = Some(value),
            FlagName::HighContrast => patch.high_contrast = Some(value),
            FlagName::LargeText => patch.large_text = Some(value),
            FlagName::KeyboardNav => patch.keyboard_nav = Some(value),
        }
        patch
    }

    /// Read the patched value for one flag, if present.
    pub fn get(&self, flag: FlagName) -> Option<bool> {
        match flag {
            FlagName::VoiceNavigation => self.voice_navigation,
            FlagName::ScreenReader => self.screen_reader,
            FlagName::HighContrast => self.high_contrast,
            FlagName::LargeText => self.large_text,
            FlagName::KeyboardNav => self.keyboard_nav,
        }
    }

    /// Merge the patch into `flags`, returning the names of flags that were
    /// present in the patch (whether or not the value changed).
    pub fn apply_to(&self, flags: &mut AccessibilityFlags) -> Vec<FlagName> {
        let mut touched = Vec::new();
        for flag in FlagName::ALL {
            if let Some(value) = self.get(flag) {
                flags.set(flag, value);
                touched.push(flag);
            }
        }
        touched
    }

    /// Whether the patch carries no values.
    pub fn is_empty(&self) -> bool {
        FlagName::ALL.into_iter().all(|flag| self.get(flag).is_none())
    }
}

/// One accessibility settings record, 1:1 with a user.
///
/// ## Invariants
/// - At most one record exists per `user_id`.
/// - `created_at` is set once; `updated_at` is bumped on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    /// System-generated record identifier.
    pub id: Uuid,
    /// The user these settings belong to.
    pub user_id: UserId,
    /// The five boolean flags.
    #[serde(flatten)]
    pub flags: AccessibilityFlags,
    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl AccessibilitySettings {
    /// Create the default record provisioned on first access: all flags off.
    pub fn new_default(user_id: UserId) -> Self {
        Self::with_flags(user_id, AccessibilityFlags::default())
    }

    /// Create a record with the given flag set and fresh timestamps.
    pub fn with_flags(user_id: UserId, flags: AccessibilityFlags) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            flags,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_flags_are_all_false() {
        let flags = AccessibilityFlags::default();
        assert!(flags.iter().all(|(_, value)| !value));
    }

    #[rstest]
    #[case::voice(FlagName::VoiceNavigation)]
    #[case::reader(FlagName::ScreenReader)]
    #[case::contrast(FlagName::HighContrast)]
    #[case::text(FlagName::LargeText)]
    #[case::keyboard(FlagName::KeyboardNav)]
    fn set_and_get_round_trip(#[case] flag: FlagName) {
        let mut flags = AccessibilityFlags::default();
        flags.set(flag, true);

        assert!(flags.get(flag));
        let on_count = flags.iter().filter(|(_, value)| *value).count();
        assert_eq!(on_count, 1);
    }

    #[rstest]
    fn flag_name_as_str_matches_parse() {
        for flag in FlagName::ALL {
            let parsed: FlagName = flag.as_str().parse().expect("round-trip should succeed");
            assert_eq!(parsed, flag);
        }
    }

    #[rstest]
    #[case::unknown("signLanguage")]
    #[case::empty("")]
    #[case::snake_case("high_contrast")]
    fn flag_name_rejects_unknown_strings(#[case] input: &str) {
        let result: Result<FlagName, _> = input.parse();
        assert!(result.is_err());
    }

    #[rstest]
    fn flags_serialise_with_api_field_names() {
        let mut flags = AccessibilityFlags::default();
        flags.set(FlagName::HighContrast, true);

        let value = serde_json::to_value(flags).expect("serialise flags");
        assert_eq!(value["highContrast"], true);
        assert_eq!(value["voiceNavigation"], false);
        assert_eq!(value["keyboardNav"], false);
    }

    #[rstest]
    fn patch_merges_only_present_fields() {
        let mut flags = AccessibilityFlags::default();
        flags.set(FlagName::LargeText, true);

        let patch = AccessibilityFlagsPatch {
            high_contrast: Some(true),
            keyboard_nav: Some(false),
            ..Default::default()
        };
        let touched = patch.apply_to(&mut flags);

        assert_eq!(touched, vec![FlagName::HighContrast, FlagName::KeyboardNav]);
        assert!(flags.high_contrast);
        assert!(flags.large_text, "untouched flag must keep its value");
    }

    #[rstest]
    fn single_patch_touches_exactly_one_flag() {
        let patch = AccessibilityFlagsPatch::single(FlagName::ScreenReader, true);

        assert_eq!(patch.get(FlagName::ScreenReader), Some(true));
        let present = FlagName::ALL
            .into_iter()
            .filter(|flag| patch.get(*flag).is_some())
            .count();
        assert_eq!(present, 1);
        assert!(!patch.is_empty());
        assert!(AccessibilityFlagsPatch::default().is_empty());
    }

    #[rstest]
    fn new_default_starts_with_equal_timestamps() {
        let settings = AccessibilitySettings::new_default(UserId::random());

        assert_eq!(settings.created_at, settings.updated_at);
        assert_eq!(settings.flags, AccessibilityFlags::default());
    }

    #[rstest]
    fn settings_serialise_with_flattened_flags() {
        let settings = AccessibilitySettings::new_default(UserId::random());
        let value = serde_json::to_value(&settings).expect("serialise settings");

        assert_eq!(value["voiceNavigation"], false);
        assert!(value.get("flags").is_none(), "flags must be flattened");
        assert!(value.get("userId").is_some());
    }
}
