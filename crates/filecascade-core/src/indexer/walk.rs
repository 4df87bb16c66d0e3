/// Parallel directory walk that collects matching files and their
/// modification times.
///
/// Uses `jwalk`'s rayon-backed traversal. Directory reads run in parallel;
/// entries arrive here in a deterministic, name-sorted order, where each
/// matching file is stat'ed. The collected records are then stable-sorted by
/// modification time so that ties keep walk order.
use crate::error::ScanError;
use crate::extensions::ExtensionSet;
use crate::indexer::progress::ScanProgress;
use crate::model::FileRecord;
use crossbeam_channel::Sender;
use rayon::slice::ParallelSliceMut;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Send an `Update` after this many matching files.
const UPDATE_EVERY: u64 = 100;

/// Check the cancel flag after this many walked entries.
const CANCEL_CHECK_EVERY: u64 = 256;

/// Outcome of a walk that was allowed to start.
pub enum WalkOutcome {
    Complete {
        records: Vec<FileRecord>,
        error_count: u64,
    },
    Cancelled,
}

/// Verify that `root` is a readable directory.
pub fn check_root(root: &Path) -> Result<(), ScanError> {
    let meta = std::fs::metadata(root).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ScanError::RootMissing {
                path: root.to_path_buf(),
            }
        } else {
            ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    std::fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Walk `root` and return every regular file whose extension is in `extensions`,
/// sorted ascending by modification time.
///
/// Per-entry failures are reported on `progress_tx` and skipped. Fails only
/// if the root itself cannot be read.
pub fn scan_files(
    root: &Path,
    extensions: &ExtensionSet,
    progress_tx: &Sender<ScanProgress>,
    cancel_flag: &AtomicBool,
) -> Result<WalkOutcome, ScanError> {
    check_root(root)?;

    let start = Instant::now();
    let mut records: Vec<FileRecord> = Vec::new();
    let mut error_count: u64 = 0;
    let mut walked: u64 = 0;

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        walked += 1;
        if walked % CANCEL_CHECK_EVERY == 0 && cancel_flag.load(Ordering::Relaxed) {
            return Ok(WalkOutcome::Cancelled);
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                error_count += 1;
                let path = err
                    .path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                warn!("Skipping unreadable entry {path}: {err}");
                let _ = progress_tx.send(ScanProgress::Error {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !extensions.matches(&path) {
            continue;
        }

        // Stat outside of jwalk's worker pool; this is the per-file syscall.
        let modified = std::fs::metadata(&path).and_then(|m| m.modified());
        match modified {
            Ok(modified) => {
                records.push(FileRecord::new(path, modified));
                let found = records.len() as u64;
                if found % UPDATE_EVERY == 0 {
                    let current_path = records
                        .last()
                        .map(|r| r.path.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let _ = progress_tx.send(ScanProgress::Update {
                        files_found: found,
                        current_path,
                    });
                }
            }
            Err(err) => {
                error_count += 1;
                warn!("Cannot read modification time of {}: {err}", path.display());
                let _ = progress_tx.send(ScanProgress::Error {
                    path: path.to_string_lossy().into_owned(),
                    message: err.to_string(),
                });
            }
        }
    }

    // Stable: equal timestamps keep the sorted walk order.
    records.par_sort_by_key(|r| r.modified);

    debug!(
        "Walk complete: {} matching files, {} errors in {:?}",
        records.len(),
        error_count,
        start.elapsed()
    );

    Ok(WalkOutcome::Complete {
        records,
        error_count,
    })
}
