/// Destination folder names for the groups of a [`GroupSet`].
///
/// Only non-empty groups get a folder. The group number used for `{num}` is
/// the group's position among *all* groups, so an empty group in the middle
/// leaves a gap in the numbering rather than renumbering the rest.
use crate::config::{DEFAULT_FOLDER_NAME_PATTERN, NUM_PLACEHOLDER};
use crate::model::{GroupSet, LabelMode};

/// A folder name proposed for one group, before sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName {
    /// Index of the group in the set.
    pub group_index: usize,
    pub name: String,
}

/// Resolve one folder name per non-empty group.
///
/// - [`LabelMode::Editable`]: the trimmed group title, or
///   `"{prefix}_{num}_Untitled"` when blank.
/// - [`LabelMode::Derived`]: `pattern` with `{num}` replaced; a pattern
///   without the placeholder falls back to [`DEFAULT_FOLDER_NAME_PATTERN`].
pub fn folder_names(set: &GroupSet, pattern: &str) -> Vec<FolderName> {
    let pattern = effective_pattern(pattern);
    set.groups()
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.is_empty())
        .map(|(i, g)| {
            let num = i + 1;
            let name = match set.label_mode() {
                LabelMode::Editable => {
                    let title = g.label.trim();
                    if title.is_empty() {
                        format!("{}_{}_Untitled", set.prefix(), num)
                    } else {
                        title.to_string()
                    }
                }
                LabelMode::Derived => pattern.replace(NUM_PLACEHOLDER, &num.to_string()),
            };
            FolderName {
                group_index: i,
                name,
            }
        })
        .collect()
}

/// The pattern actually used: the given one if it contains `{num}`.
pub fn effective_pattern(pattern: &str) -> &str {
    if pattern.contains(NUM_PLACEHOLDER) {
        pattern
    } else {
        DEFAULT_FOLDER_NAME_PATTERN
    }
}
