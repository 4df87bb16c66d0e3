/// Partition a time-sorted file sequence into groups.
///
/// Two strategies:
///
/// - **Time threshold**: walk the sequence and start a new group whenever
///   the gap to the *previous file* exceeds the threshold. Gaps are measured
///   file-to-file, not from the group's first file, so a slow steady drift
///   chains into one long group.
/// - **Manual count**: split into `n` position-based buckets of
///   `ceil(total / n)` files; the last bucket absorbs the remainder and empty
///   buckets are dropped.
///
/// Both return only non-empty groups and preserve input order, so
/// concatenating the result reproduces the input exactly.
use crate::error::ValidationError;
use crate::model::{FileRecord, GroupSet, LabelMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Which grouping algorithm to run, with its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupingMode {
    TimeThreshold { minutes: u32 },
    ManualCount { count: u32 },
}

impl GroupingMode {
    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::TimeThreshold { minutes } => format!("by time ({minutes} min)"),
            Self::ManualCount { count } => format!("manually into {count} groups"),
        }
    }
}

/// Run the selected algorithm over `files` (which must be sorted ascending by
/// modification time) and wrap the result in a labelled [`GroupSet`].
pub fn apply(
    files: &[FileRecord],
    mode: GroupingMode,
    label_mode: LabelMode,
    prefix: &str,
) -> Result<GroupSet, ValidationError> {
    let partitions = match mode {
        GroupingMode::TimeThreshold { minutes } => group_by_time(files, minutes),
        GroupingMode::ManualCount { count } => group_by_count(files, count)?,
    };
    debug!(
        "Grouped {} files {} -> {} groups",
        files.len(),
        mode.describe(),
        partitions.len()
    );
    Ok(GroupSet::from_partitions(partitions, label_mode, prefix))
}

/// Chain files into groups while consecutive gaps stay within `minutes`.
///
/// A gap exactly equal to the threshold stays in the current group.
pub fn group_by_time(files: &[FileRecord], minutes: u32) -> Vec<Vec<FileRecord>> {
    let threshold = Duration::from_secs(u64::from(minutes) * 60);
    let mut groups: Vec<Vec<FileRecord>> = Vec::new();
    let mut current: Vec<FileRecord> = Vec::new();

    for file in files {
        if let Some(prev) = current.last() {
            // Input is sorted; a clock going backwards counts as no gap.
            let gap = file
                .modified
                .duration_since(prev.modified)
                .unwrap_or_default();
            if gap > threshold {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.push(file.clone());
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Split into at most `count` position-based buckets.
pub fn group_by_count(
    files: &[FileRecord],
    count: u32,
) -> Result<Vec<Vec<FileRecord>>, ValidationError> {
    if count == 0 {
        return Err(ValidationError::ZeroGroupCount);
    }
    if files.is_empty() {
        return Ok(Vec::new());
    }
    let n = count as usize;
    let per_bucket = files.len().div_ceil(n).max(1);

    // Indices never exceed files.len() - 1, so more buckets than files are never filled.
    let mut buckets: Vec<Vec<FileRecord>> = vec![Vec::new(); n.min(files.len())];
    for (i, file) in files.iter().enumerate() {
        let idx = (i / per_bucket).min(n - 1);
        buckets[idx].push(file.clone());
    }
    buckets.retain(|b| !b.is_empty());
    Ok(buckets)
}
