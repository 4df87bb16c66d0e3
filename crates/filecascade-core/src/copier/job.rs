/// A validated copy job: groups of files paired with their folder names.
use crate::error::ValidationError;
use crate::model::{FileRecord, GroupSet};
use crate::naming::folder_names;
use std::path::{Path, PathBuf};

/// One destination folder and the files that go into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyGroup {
    /// Folder name before sanitization.
    pub folder_name: String,
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    groups: Vec<CopyGroup>,
    destination: PathBuf,
}

impl CopyJob {
    /// Pair `groups` with `names` one-to-one.
    ///
    /// Fails with [`ValidationError::FolderCountMismatch`] when the lengths
    /// differ. Empty groups are accepted and skipped when the job runs.
    pub fn new(
        groups: Vec<Vec<FileRecord>>,
        names: Vec<String>,
        destination: impl Into<PathBuf>,
    ) -> Result<Self, ValidationError> {
        if groups.len() != names.len() {
            return Err(ValidationError::FolderCountMismatch {
                groups: groups.len(),
                names: names.len(),
            });
        }
        let groups = groups
            .into_iter()
            .zip(names)
            .map(|(files, folder_name)| CopyGroup { folder_name, files })
            .collect();
        Ok(Self {
            groups,
            destination: destination.into(),
        })
    }

    /// Build a job from the non-empty groups of `set`, naming folders with
    /// `pattern` (or the group titles in editable mode).
    pub fn from_group_set(
        set: &GroupSet,
        pattern: &str,
        destination: impl Into<PathBuf>,
    ) -> Result<Self, ValidationError> {
        let names = folder_names(set, pattern);
        if names.is_empty() {
            return Err(ValidationError::EmptyGroups);
        }
        let groups = names
            .iter()
            .map(|f| set.groups()[f.group_index].files.clone())
            .collect();
        Self::new(
            groups,
            names.into_iter().map(|f| f.name).collect(),
            destination,
        )
    }

    pub fn groups(&self) -> &[CopyGroup] {
        &self.groups
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of groups that will actually produce a folder.
    pub fn folder_count(&self) -> usize {
        self.groups.iter().filter(|g| !g.files.is_empty()).count()
    }

    pub fn total_files(&self) -> u64 {
        self.groups.iter().map(|g| g.files.len() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelMode;
    use std::time::UNIX_EPOCH;

    fn rec(name: &str) -> FileRecord {
        FileRecord::new(format!("/src/{name}"), UNIX_EPOCH)
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = CopyJob::new(vec![vec![rec("a")], vec![rec("b")]], vec!["x".into()], "/dst")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::FolderCountMismatch { groups: 2, names: 1 }
        );
        assert_eq!(
            err.to_string(),
            "mismatch between group data (2) and folder names (1)"
        );
    }

    #[test]
    fn from_group_set_skips_empty_groups() {
        let mut set = GroupSet::from_partitions(
            vec![vec![rec("a"), rec("b")], vec![rec("c")]],
            LabelMode::Derived,
            "Group",
        );
        set.insert_after(0).unwrap();
        let job = CopyJob::from_group_set(&set, "Run_{num}", "/dst").unwrap();
        let names: Vec<&str> = job.groups().iter().map(|g| g.folder_name.as_str()).collect();
        assert_eq!(names, vec!["Run_1", "Run_3"]);
        assert_eq!(job.total_files(), 3);
        assert_eq!(job.folder_count(), 2);
        assert_eq!(job.destination(), Path::new("/dst"));
    }

    #[test]
    fn all_empty_groups_are_rejected() {
        let set = GroupSet::default();
        assert_eq!(
            CopyJob::from_group_set(&set, "Run_{num}", "/dst"),
            Err(ValidationError::EmptyGroups)
        );
    }
}
