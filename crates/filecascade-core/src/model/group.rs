/// Groups of files and the ordered set that holds them.
///
/// A [`GroupSet`] is produced by [`crate::grouping`] and then adjusted by
/// the edit operations in [`crate::editor`]. Every record belongs to exactly
/// one group; a group may be empty only transiently (a freshly inserted
/// group waiting for files). Group order defines the 1-based `{num}` used in
/// labels and folder names.
use super::file_record::FileRecord;
use super::format::{format_clock, NO_TIME};
use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// How group labels are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelMode {
    /// Labels are derived from content and overwritten after every edit:
    /// `"{prefix} {num} ({count} files) [{earliest} - {latest}]"`.
    #[default]
    Derived,
    /// Labels are user-entered titles; a blank title resets to `"{prefix} {num}"`.
    Editable,
}

/// One bucket of files destined for one output folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub label: CompactString,
    pub files: Vec<FileRecord>,
}

impl Group {
    pub fn new(files: Vec<FileRecord>) -> Self {
        Self {
            label: CompactString::default(),
            files,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    /// Oldest modification time in the group. Display order is irrelevant here.
    pub fn earliest(&self) -> Option<SystemTime> {
        self.files.iter().map(|f| f.modified).min()
    }

    /// Newest modification time in the group.
    pub fn latest(&self) -> Option<SystemTime> {
        self.files.iter().map(|f| f.modified).max()
    }
}

/// The full ordered collection of groups for one grouping pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSet {
    pub(crate) groups: Vec<Group>,
    pub(crate) label_mode: LabelMode,
    pub(crate) prefix: CompactString,
}

impl Default for GroupSet {
    fn default() -> Self {
        Self::new(LabelMode::default(), crate::config::DEFAULT_GROUP_TITLE_PREFIX)
    }
}

impl GroupSet {
    /// An empty set. Grouping an empty scan produces this.
    pub fn new(label_mode: LabelMode, prefix: &str) -> Self {
        Self {
            groups: Vec::new(),
            label_mode,
            prefix: CompactString::new(prefix),
        }
    }

    /// Build a set from already-partitioned files and assign initial labels.
    pub fn from_partitions(
        partitions: Vec<Vec<FileRecord>>,
        label_mode: LabelMode,
        prefix: &str,
    ) -> Self {
        let mut set = Self::new(label_mode, prefix);
        set.groups = partitions.into_iter().map(Group::new).collect();
        set.reset_labels();
        set
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn label_mode(&self) -> LabelMode {
        self.label_mode
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Total number of file records across all groups.
    pub fn total_files(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Iterate every record, group by group, in display order.
    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        self.groups.iter().flat_map(|g| g.files.iter())
    }

    /// Locate a file by path: `(group index, position within group)`.
    pub fn locate(&self, path: &Path) -> Option<(usize, usize)> {
        self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.files
                .iter()
                .position(|f| f.path == path)
                .map(|pos| (gi, pos))
        })
    }

    /// Switch label mode. Entering `Editable` resets every title to its
    /// default; entering `Derived` recomputes every label.
    pub fn set_label_mode(&mut self, mode: LabelMode) {
        self.label_mode = mode;
        self.reset_labels();
    }

    /// Default title for the group at `index`: `"{prefix} {index + 1}"`.
    pub fn default_title(&self, index: usize) -> CompactString {
        format_compact!("{} {}", self.prefix, index + 1)
    }

    /// Overwrite every label with its mode-specific default.
    pub(crate) fn reset_labels(&mut self) {
        for i in 0..self.groups.len() {
            self.groups[i].label = match self.label_mode {
                LabelMode::Derived => self.derived_label(i),
                LabelMode::Editable => self.default_title(i),
            };
        }
    }

    /// Bring labels back in line with the current mode after an edit.
    ///
    /// Derived labels are recomputed from scratch (manual text is discarded);
    /// editable titles are kept unless blank.
    pub(crate) fn refresh_labels(&mut self) {
        for i in 0..self.groups.len() {
            match self.label_mode {
                LabelMode::Derived => {
                    self.groups[i].label = self.derived_label(i);
                }
                LabelMode::Editable => {
                    let trimmed = self.groups[i].label.trim();
                    if trimmed.is_empty() {
                        self.groups[i].label = self.default_title(i);
                    }
                }
            }
        }
    }

    fn derived_label(&self, index: usize) -> CompactString {
        let group = &self.groups[index];
        let (start, end) = match (group.earliest(), group.latest()) {
            (Some(s), Some(e)) => (format_clock(s), format_clock(e)),
            _ => (NO_TIME.to_string(), NO_TIME.to_string()),
        };
        format_compact!(
            "{} {} ({} files) [{} - {}]",
            self.prefix,
            index + 1,
            group.len(),
            start,
            end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn rec(name: &str, secs: u64) -> FileRecord {
        FileRecord::new(format!("/src/{name}"), UNIX_EPOCH + Duration::from_secs(secs))
    }

    #[test]
    fn derived_labels_describe_content() {
        let set = GroupSet::from_partitions(
            vec![vec![rec("a.csv", 100), rec("b.csv", 200)], vec![rec("c.csv", 900)]],
            LabelMode::Derived,
            "Group",
        );
        let first = format!(
            "Group 1 (2 files) [{} - {}]",
            format_clock(UNIX_EPOCH + Duration::from_secs(100)),
            format_clock(UNIX_EPOCH + Duration::from_secs(200))
        );
        assert_eq!(set.groups()[0].label, first);
        assert!(set.groups()[1].label.starts_with("Group 2 (1 files)"));
    }

    #[test]
    fn derived_label_of_empty_group_uses_placeholder() {
        let mut set =
            GroupSet::from_partitions(vec![vec![rec("a.csv", 1)]], LabelMode::Derived, "Group");
        set.groups.push(Group::default());
        set.refresh_labels();
        assert_eq!(set.groups()[1].label, "Group 2 (0 files) [N/A - N/A]");
    }

    #[test]
    fn derived_label_uses_group_extremes_not_display_order() {
        // Display order has the newest file first; the label still spans oldest..newest.
        let set = GroupSet::from_partitions(
            vec![vec![rec("late.csv", 500), rec("early.csv", 50)]],
            LabelMode::Derived,
            "Group",
        );
        let expected = format!(
            "[{} - {}]",
            format_clock(UNIX_EPOCH + Duration::from_secs(50)),
            format_clock(UNIX_EPOCH + Duration::from_secs(500))
        );
        assert!(set.groups()[0].label.ends_with(&expected));
    }

    #[test]
    fn editable_mode_resets_to_plain_titles() {
        let mut set = GroupSet::from_partitions(
            vec![vec![rec("a.csv", 1)], vec![rec("b.csv", 2)]],
            LabelMode::Derived,
            "Batch",
        );
        set.set_label_mode(LabelMode::Editable);
        assert_eq!(set.groups()[0].label, "Batch 1");
        assert_eq!(set.groups()[1].label, "Batch 2");
    }

    #[test]
    fn blank_editable_title_falls_back_to_default() {
        let mut set =
            GroupSet::from_partitions(vec![vec![rec("a.csv", 1)]], LabelMode::Editable, "Group");
        set.groups[0].label = CompactString::new("   ");
        set.refresh_labels();
        assert_eq!(set.groups()[0].label, "Group 1");
    }

    #[test]
    fn locate_finds_group_and_position() {
        let set = GroupSet::from_partitions(
            vec![vec![rec("a.csv", 1)], vec![rec("b.csv", 2), rec("c.csv", 3)]],
            LabelMode::Derived,
            "Group",
        );
        assert_eq!(set.locate(Path::new("/src/c.csv")), Some((1, 1)));
        assert_eq!(set.locate(Path::new("/src/zzz.csv")), None);
        assert_eq!(set.total_files(), 3);
    }
}
