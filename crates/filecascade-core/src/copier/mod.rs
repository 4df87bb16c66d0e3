/// Copy engine: materializes groups as folders under a destination root.
///
/// [`start_copy`] runs a validated [`CopyJob`] on a background thread and
/// reports through a [`CopyHandle`], mirroring the indexer's handle.
pub mod engine;
pub mod job;
pub mod progress;
pub mod sanitize;

pub use job::{CopyGroup, CopyJob};
pub use progress::CopyProgress;
pub use sanitize::sanitize_folder_name;

use crate::indexer::PROGRESS_CHANNEL_CAPACITY;
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Handle to a running or completed copy job.
pub struct CopyHandle {
    /// Receiver for progress updates from the copy thread.
    pub progress_rx: Receiver<CopyProgress>,
    cancel_flag: Arc<AtomicBool>,
    _thread: Option<thread::JoinHandle<()>>,
}

impl CopyHandle {
    /// Request the copy to stop before the next file.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start copying `job` on a background thread.
pub fn start_copy(job: CopyJob) -> CopyHandle {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<CopyProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("filecascade-copier".into())
        .spawn(move || {
            info!(
                "Starting copy: {} groups, {} files into {}",
                job.folder_count(),
                job.total_files(),
                job.destination().display()
            );
            let done = engine::run_copy(&job, &progress_tx, &cancel_clone);
            info!("{}", done.message());
            let _ = progress_tx.send(done);
        })
        .expect("failed to spawn copier thread");

    CopyHandle {
        progress_rx,
        cancel_flag,
        _thread: Some(thread),
    }
}
