/// Interactive edits on a [`GroupSet`].
///
/// Every operation either succeeds and leaves each file in exactly one
/// group, or fails with an [`InvariantError`] and leaves the set untouched.
/// Labels are refreshed after each successful edit according to the set's
/// [`crate::model::LabelMode`].
///
/// Drag and drop is modelled as [`GroupSet::move_files`]: a front end
/// collects the dragged paths into a [`DragPayload`] and asks for them to be
/// placed in a target group at a target row.
use crate::error::InvariantError;
use crate::model::{FileRecord, Group, GroupSet};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// An ordered list of file paths being transferred between groups.
///
/// The wire form is plain JSON, `{"paths":["/a/b.csv", ...]}`, so any
/// component can produce or consume it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub paths: Vec<PathBuf>,
}

impl DragPayload {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Self {
        Self {
            paths: records.into_iter().map(|r| r.path.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Fails for paths that are not valid UTF-8.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl GroupSet {
    fn check_index(&self, index: usize) -> Result<(), InvariantError> {
        if index < self.groups.len() {
            Ok(())
        } else {
            Err(InvariantError::GroupOutOfRange {
                index,
                len: self.groups.len(),
            })
        }
    }

    /// Insert an empty group directly after `index`. Returns the new group's index.
    pub fn insert_after(&mut self, index: usize) -> Result<usize, InvariantError> {
        self.check_index(index)?;
        let at = index + 1;
        self.groups.insert(at, Group::default());
        // The new group has a blank label; refresh gives it a default.
        self.refresh_labels();
        Ok(at)
    }

    /// Remove the group at `index`.
    ///
    /// The last remaining group cannot be removed. Files of a removed group
    /// are appended to the preceding group, or prepended to the following
    /// group when the first group is removed.
    pub fn remove(&mut self, index: usize) -> Result<(), InvariantError> {
        self.check_index(index)?;
        if self.groups.len() <= 1 {
            return Err(InvariantError::LastGroup);
        }
        let removed = self.groups.remove(index);
        if !removed.files.is_empty() {
            if index > 0 {
                self.groups[index - 1].files.extend(removed.files);
            } else {
                let next = &mut self.groups[0].files;
                let tail = std::mem::replace(next, removed.files);
                next.extend(tail);
            }
        }
        self.refresh_labels();
        Ok(())
    }

    /// Set a group's label. In derived mode the label is immediately
    /// recomputed, so the text is discarded.
    pub fn rename(&mut self, index: usize, label: &str) -> Result<(), InvariantError> {
        self.check_index(index)?;
        self.groups[index].label = CompactString::new(label);
        self.refresh_labels();
        Ok(())
    }

    /// Move the files named by `paths` into group `to_group`, in payload
    /// order, before the file currently at row `position` of that group.
    ///
    /// `position` is clamped; `usize::MAX` appends. Rows occupied by the
    /// moved files themselves are skipped when resolving the insertion
    /// point, so reordering within one group behaves like a list drag.
    /// Duplicate paths in the payload are moved once. Returns the number of
    /// files moved.
    pub fn move_files(
        &mut self,
        paths: &[PathBuf],
        to_group: usize,
        position: usize,
    ) -> Result<usize, InvariantError> {
        self.check_index(to_group)?;

        let mut seen: HashSet<&Path> = HashSet::with_capacity(paths.len());
        let mut ordered: Vec<&Path> = Vec::with_capacity(paths.len());
        for p in paths {
            if seen.insert(p.as_path()) {
                ordered.push(p.as_path());
            }
        }
        // Validate everything before touching the set.
        for p in &ordered {
            if self.locate(p).is_none() {
                return Err(InvariantError::UnknownFile(p.to_path_buf()));
            }
        }
        if ordered.is_empty() {
            return Ok(0);
        }

        // The first unmoved file at or after `position` anchors the insert.
        let anchor: Option<PathBuf> = self.groups[to_group]
            .files
            .iter()
            .skip(position)
            .find(|f| !seen.contains(f.path.as_path()))
            .map(|f| f.path.clone());

        let mut moving: Vec<FileRecord> = Vec::with_capacity(ordered.len());
        for p in &ordered {
            if let Some((gi, pos)) = self.locate(p) {
                moving.push(self.groups[gi].files.remove(pos));
            }
        }

        let target = &mut self.groups[to_group].files;
        let at = anchor
            .and_then(|a| target.iter().position(|f| f.path == a))
            .unwrap_or(target.len());
        let moved = moving.len();
        target.splice(at..at, moving);

        self.refresh_labels();
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelMode;
    use std::time::{Duration, UNIX_EPOCH};

    fn rec(name: &str, secs: u64) -> FileRecord {
        FileRecord::new(format!("/src/{name}"), UNIX_EPOCH + Duration::from_secs(secs))
    }

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/src/{name}"))
    }

    /// Two groups: [a, b, c] and [d, e].
    fn sample(mode: LabelMode) -> GroupSet {
        GroupSet::from_partitions(
            vec![
                vec![rec("a", 1), rec("b", 2), rec("c", 3)],
                vec![rec("d", 1_000), rec("e", 1_001)],
            ],
            mode,
            "Group",
        )
    }

    fn layout(set: &GroupSet) -> Vec<Vec<String>> {
        set.groups()
            .iter()
            .map(|g| g.files.iter().map(|f| f.file_name().into_owned()).collect())
            .collect()
    }

    fn assert_each_file_once(set: &GroupSet, expected: usize) {
        let all: Vec<&Path> = set.files().map(|f| f.path.as_path()).collect();
        let unique: HashSet<&Path> = all.iter().copied().collect();
        assert_eq!(all.len(), expected);
        assert_eq!(unique.len(), expected);
    }

    #[test]
    fn insert_after_adds_empty_group() {
        let mut set = sample(LabelMode::Derived);
        let idx = set.insert_after(0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(set.len(), 3);
        assert!(set.groups()[1].is_empty());
        assert_eq!(set.groups()[1].label, "Group 2 (0 files) [N/A - N/A]");
        assert!(set.groups()[2].label.starts_with("Group 3 (2 files)"));
    }

    #[test]
    fn insert_after_out_of_range_is_rejected() {
        let mut set = sample(LabelMode::Derived);
        assert_eq!(
            set.insert_after(5),
            Err(InvariantError::GroupOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn removing_last_group_is_rejected_without_change() {
        let mut set =
            GroupSet::from_partitions(vec![vec![rec("a", 1)]], LabelMode::Derived, "Group");
        let before = set.clone();
        assert_eq!(set.remove(0), Err(InvariantError::LastGroup));
        assert_eq!(set, before);
    }

    #[test]
    fn remove_merges_files_into_previous_group() {
        let mut set = sample(LabelMode::Derived);
        set.remove(1).unwrap();
        assert_eq!(layout(&set), vec![vec!["a", "b", "c", "d", "e"]]);
        assert_each_file_once(&set, 5);
    }

    #[test]
    fn remove_first_group_merges_into_next() {
        let mut set = sample(LabelMode::Derived);
        set.remove(0).unwrap();
        assert_eq!(layout(&set), vec![vec!["a", "b", "c", "d", "e"]]);
        assert!(set.groups()[0].label.starts_with("Group 1 (5 files)"));
    }

    #[test]
    fn remove_empty_group() {
        let mut set = sample(LabelMode::Derived);
        set.insert_after(1).unwrap();
        set.remove(2).unwrap();
        assert_eq!(set.len(), 2);
        assert_each_file_once(&set, 5);
    }

    #[test]
    fn move_between_groups_at_position() {
        let mut set = sample(LabelMode::Derived);
        let moved = set.move_files(&[p("a"), p("b")], 1, 1).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(layout(&set), vec![vec!["c"], vec!["d", "a", "b", "e"]]);
        assert_each_file_once(&set, 5);
        assert!(set.groups()[1].label.starts_with("Group 2 (4 files)"));
    }

    #[test]
    fn move_appends_with_max_position() {
        let mut set = sample(LabelMode::Derived);
        set.move_files(&[p("c")], 1, usize::MAX).unwrap();
        assert_eq!(layout(&set), vec![vec!["a", "b"], vec!["d", "e", "c"]]);
    }

    #[test]
    fn reorder_within_group_moves_down() {
        let mut set = sample(LabelMode::Derived);
        // Drop "a" before the row currently holding "c".
        set.move_files(&[p("a")], 0, 2).unwrap();
        assert_eq!(layout(&set)[0], vec!["b", "a", "c"]);
    }

    #[test]
    fn reorder_within_group_moves_up() {
        let mut set = sample(LabelMode::Derived);
        set.move_files(&[p("c")], 0, 0).unwrap();
        assert_eq!(layout(&set)[0], vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_onto_own_row_keeps_order() {
        let mut set = sample(LabelMode::Derived);
        set.move_files(&[p("b")], 0, 1).unwrap();
        assert_eq!(layout(&set)[0], vec!["a", "b", "c"]);
    }

    #[test]
    fn move_into_empty_group() {
        let mut set = sample(LabelMode::Derived);
        let new_idx = set.insert_after(0).unwrap();
        set.move_files(&[p("e"), p("a")], new_idx, 0).unwrap();
        assert_eq!(
            layout(&set),
            vec![vec!["b", "c"], vec!["e", "a"], vec!["d"]]
        );
    }

    #[test]
    fn duplicate_paths_move_once() {
        let mut set = sample(LabelMode::Derived);
        set.move_files(&[p("a"), p("a")], 1, 0).unwrap();
        assert_each_file_once(&set, 5);
        assert_eq!(layout(&set)[1], vec!["a", "d", "e"]);
    }

    #[test]
    fn unknown_file_is_rejected_without_change() {
        let mut set = sample(LabelMode::Derived);
        let before = set.clone();
        let err = set.move_files(&[p("a"), p("nope")], 1, 0).unwrap_err();
        assert_eq!(err, InvariantError::UnknownFile(p("nope")));
        assert_eq!(set, before);
    }

    #[test]
    fn move_to_missing_group_is_rejected() {
        let mut set = sample(LabelMode::Derived);
        assert!(matches!(
            set.move_files(&[p("a")], 9, 0),
            Err(InvariantError::GroupOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn rename_is_overwritten_in_derived_mode() {
        let mut set = sample(LabelMode::Derived);
        set.rename(0, "My run").unwrap();
        assert!(set.groups()[0].label.starts_with("Group 1 (3 files)"));
    }

    #[test]
    fn rename_sticks_in_editable_mode() {
        let mut set = sample(LabelMode::Editable);
        set.rename(0, "Calibration").unwrap();
        set.move_files(&[p("d")], 0, 0).unwrap();
        assert_eq!(set.groups()[0].label, "Calibration");
        assert_eq!(set.groups()[1].label, "Group 2");
    }

    #[test]
    fn payload_json_is_a_plain_path_list() {
        let payload = DragPayload::new(vec![p("a"), p("b")]);
        let json = payload.to_json().unwrap();
        assert_eq!(json, r#"{"paths":["/src/a","/src/b"]}"#);
        assert_eq!(DragPayload::from_json(&json).unwrap(), payload);
        assert!(DragPayload::from_json("[1,2]").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn payload_with_non_utf8_path_fails_to_serialize() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let payload = DragPayload::single(OsStr::from_bytes(b"/src/\xffrun.csv"));
        assert!(payload.to_json().is_err());
    }
}
