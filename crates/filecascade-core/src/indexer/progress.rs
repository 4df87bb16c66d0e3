/// Scan progress messages sent from the indexer thread to the caller over a
/// crossbeam channel.
use crate::error::ScanError;
use crate::model::FileRecord;
use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// Exactly one terminal message (`Complete`, `Failed` or `Cancelled`) ends
/// every scan.
#[derive(Debug)]
pub enum ScanProgress {
    /// The walk is starting.
    Started { root: String, extensions: String },
    /// Periodic update with the running count of matching files.
    Update {
        files_found: u64,
        current_path: String,
    },
    /// A non-fatal error (e.g. permission denied on one file). The entry is skipped.
    Error { path: String, message: String },
    /// Scanning finished. Records are sorted ascending by modification time.
    Complete {
        records: Vec<FileRecord>,
        duration: Duration,
        error_count: u64,
    },
    /// The root could not be scanned at all.
    Failed(ScanError),
    /// Scan was cancelled by the caller.
    Cancelled,
}

impl ScanProgress {
    /// Human-readable line for the activity log.
    pub fn message(&self) -> String {
        match self {
            Self::Started { root, extensions } => {
                format!("Scanning '{root}' for files matching: {extensions}...")
            }
            Self::Update { files_found, .. } => format!("Scanned {files_found} matching files..."),
            Self::Error { path, message } => format!("Error accessing {path}: {message}"),
            Self::Complete {
                records,
                error_count,
                ..
            } => {
                if *error_count > 0 {
                    format!(
                        "Scan complete. Found {} files ({} entries skipped).",
                        records.len(),
                        error_count
                    )
                } else {
                    format!("Scan complete. Found {} files.", records.len())
                }
            }
            Self::Failed(err) => format!("Error during scanning: {err}"),
            Self::Cancelled => "Scan cancelled.".to_string(),
        }
    }
}
