/// File indexer: finds the files to group.
///
/// Walks a source directory on a background thread, keeps regular files whose
/// extension is in an [`ExtensionSet`], and reports the result as a list of
/// [`FileRecord`](crate::model::FileRecord)s sorted by modification time.
pub mod progress;
pub mod walk;

use crate::extensions::ExtensionSet;
use progress::ScanProgress;
use walk::WalkOutcome;

use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// Maximum number of progress messages that may queue up in the channel.
///
/// The UI drains this channel once per frame. If it falls behind, the
/// indexer blocks on `send` rather than growing the queue without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    cancel_flag: Arc<AtomicBool>,
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start scanning `root` on a background thread.
///
/// The thread sends `Started`, any number of `Update`/`Error` messages, then
/// exactly one of `Complete`, `Failed` or `Cancelled`.
pub fn start_scan(root: PathBuf, extensions: ExtensionSet) -> ScanHandle {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("filecascade-indexer".into())
        .spawn(move || {
            info!("Starting scan of {} for {}", root.display(), extensions);
            let start = Instant::now();
            let _ = progress_tx.send(ScanProgress::Started {
                root: root.display().to_string(),
                extensions: extensions.to_string(),
            });

            let message = match walk::scan_files(&root, &extensions, &progress_tx, &cancel_clone) {
                Err(err) => {
                    warn!("Scan of {} failed: {err}", root.display());
                    ScanProgress::Failed(err)
                }
                Ok(WalkOutcome::Cancelled) => ScanProgress::Cancelled,
                Ok(WalkOutcome::Complete { .. }) if cancel_clone.load(Ordering::Relaxed) => {
                    ScanProgress::Cancelled
                }
                Ok(WalkOutcome::Complete {
                    records,
                    error_count,
                }) => {
                    let duration = start.elapsed();
                    info!(
                        "Scan complete: {} files, {} errors in {:.2}s",
                        records.len(),
                        error_count,
                        duration.as_secs_f64()
                    );
                    ScanProgress::Complete {
                        records,
                        duration,
                        error_count,
                    }
                }
            };
            if matches!(message, ScanProgress::Cancelled) {
                info!("Scan of {} cancelled", root.display());
            }
            let _ = progress_tx.send(message);
        })
        .expect("failed to spawn indexer thread");

    ScanHandle {
        progress_rx,
        cancel_flag,
        _thread: Some(thread),
    }
}
