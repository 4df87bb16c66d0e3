/// Session defaults and the optional JSON settings file.
///
/// Nothing here is written back to disk: settings only seed a new
/// [`crate::session::Session`]. Every field is optional in the file and
/// falls back to the constants below.
use crate::error::ConfigError;
use crate::grouping::GroupingMode;
use crate::model::LabelMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIME_THRESHOLD_MINUTES: u32 = 5;
pub const DEFAULT_MANUAL_GROUP_COUNT: u32 = 5;
pub const DEFAULT_FOLDER_NAME_PATTERN: &str = "Run_{num}";
pub const DEFAULT_GROUP_TITLE_PREFIX: &str = "Group";
pub const DEFAULT_EXTENSIONS: &str = ".csv";

/// Folder name used when sanitization leaves nothing.
pub const INVALID_FOLDER_NAME: &str = "Invalid_Name";

/// Placeholder substituted with the 1-based group number in folder patterns.
pub const NUM_PLACEHOLDER: &str = "{num}";

/// Valid range for the time threshold, in minutes (one minute to one day).
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<u32> = 1..=1440;

/// Valid range for the manual group count.
pub const GROUP_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

/// Environment variable naming a JSON settings file.
pub const SETTINGS_ENV_VAR: &str = "FILECASCADE_SETTINGS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub time_threshold_minutes: u32,
    pub manual_grouping: bool,
    pub manual_group_count: u32,
    pub folder_name_pattern: String,
    pub group_title_prefix: String,
    /// Comma-separated extension list, as typed by the user.
    pub extensions: String,
    pub title_editing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_threshold_minutes: DEFAULT_TIME_THRESHOLD_MINUTES,
            manual_grouping: false,
            manual_group_count: DEFAULT_MANUAL_GROUP_COUNT,
            folder_name_pattern: DEFAULT_FOLDER_NAME_PATTERN.to_string(),
            group_title_prefix: DEFAULT_GROUP_TITLE_PREFIX.to_string(),
            extensions: DEFAULT_EXTENSIONS.to_string(),
            title_editing: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text. Out-of-range numbers are clamped.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(text)?;
        Ok(settings.clamped())
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the file named by [`SETTINGS_ENV_VAR`], or use defaults
    /// when the variable is unset. A file that fails to load is reported
    /// and defaults are used.
    pub fn from_env() -> Self {
        match std::env::var_os(SETTINGS_ENV_VAR) {
            Some(path) => match Self::load(Path::new(&path)) {
                Ok(s) => {
                    tracing::info!("Loaded settings from {}", Path::new(&path).display());
                    s
                }
                Err(e) => {
                    tracing::warn!("{e} -- using default settings");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    fn clamped(mut self) -> Self {
        self.time_threshold_minutes = self
            .time_threshold_minutes
            .clamp(*THRESHOLD_RANGE.start(), *THRESHOLD_RANGE.end());
        self.manual_group_count = self
            .manual_group_count
            .clamp(*GROUP_COUNT_RANGE.start(), *GROUP_COUNT_RANGE.end());
        self
    }

    pub fn grouping_mode(&self) -> GroupingMode {
        if self.manual_grouping {
            GroupingMode::ManualCount {
                count: self.manual_group_count,
            }
        } else {
            GroupingMode::TimeThreshold {
                minutes: self.time_threshold_minutes,
            }
        }
    }

    pub fn label_mode(&self) -> LabelMode {
        if self.title_editing {
            LabelMode::Editable
        } else {
            LabelMode::Derived
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.time_threshold_minutes, 5);
        assert_eq!(s.manual_group_count, 5);
        assert_eq!(s.folder_name_pattern, "Run_{num}");
        assert_eq!(s.extensions, ".csv");
        assert_eq!(
            s.grouping_mode(),
            GroupingMode::TimeThreshold { minutes: 5 }
        );
        assert_eq!(s.label_mode(), LabelMode::Derived);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let s = Settings::from_json(r#"{ "manual_grouping": true, "manual_group_count": 3 }"#)
            .unwrap();
        assert_eq!(s.grouping_mode(), GroupingMode::ManualCount { count: 3 });
        assert_eq!(s.extensions, ".csv");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let text = r#"{ "time_threshold_minutes": 0, "manual_group_count": 5000 }"#;
        let s = Settings::from_json(text).unwrap();
        assert_eq!(s.time_threshold_minutes, 1);
        assert_eq!(s.manual_group_count, 1000);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
