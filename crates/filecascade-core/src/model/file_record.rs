/// A single scanned file: its path and last-modified time.
///
/// The path is the record's identity. Two records with the same path are the
/// same file, which is what lets group edits locate a record from nothing
/// more than a list of paths (see [`crate::editor::DragPayload`]).
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path to the source file.
    pub path: PathBuf,
    /// Modification time read during the scan.
    pub modified: SystemTime,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    /// File name only, for display and as the copy target name.
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy())
    }

    /// Modification time converted to the local timezone.
    pub fn modified_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.modified)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
