/// Extension filter parsed from free-text user input.
///
/// `"csv, .TXT,,.log"` becomes `{".csv", ".txt", ".log"}`. Matching is
/// case-insensitive on the final extension of a path, so `data.tar.gz`
/// matches `.gz` but not `.tar.gz`.
use crate::error::ValidationError;
use std::fmt;
use std::path::Path;

/// A non-empty, normalized set of dot-prefixed lowercase suffixes.
///
/// Entries keep first-seen order so log messages echo what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    /// Parse a comma-separated list.
    ///
    /// Returns [`ValidationError::NoExtensions`] when nothing usable remains.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::from_iter_checked(text.split(','))
    }

    /// Build from already-split entries, applying the same normalization.
    pub fn from_iter_checked<'a>(
        entries: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ValidationError> {
        let mut suffixes: Vec<String> = Vec::new();
        for raw in entries {
            let Some(norm) = normalize(raw) else {
                continue;
            };
            if !suffixes.contains(&norm) {
                suffixes.push(norm);
            }
        }
        if suffixes.is_empty() {
            return Err(ValidationError::NoExtensions);
        }
        Ok(Self { suffixes })
    }

    /// True if the path's final extension is in the set.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let suffix = format!(".{}", ext.to_string_lossy().to_lowercase());
        self.suffixes.iter().any(|s| *s == suffix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffixes.join(", "))
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.').trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}
