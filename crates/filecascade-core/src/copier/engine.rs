/// The copy loop: create one folder per group and copy its files.
///
/// Per-file failures are counted and reported, never fatal. A folder that
/// cannot be created counts its whole group as errors.
use crate::copier::job::CopyJob;
use crate::copier::progress::{summary, CopyProgress, COPIED_TICK_PREFIX};
use crate::copier::sanitize::sanitize_folder_name;
use crossbeam_channel::Sender;
use filetime::FileTime;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Run `job` to completion (or cancellation) and return the terminal message.
///
/// Intermediate `Update` and `FileError` messages go to `progress_tx`.
pub fn run_copy(
    job: &CopyJob,
    progress_tx: &Sender<CopyProgress>,
    cancel_flag: &AtomicBool,
) -> CopyProgress {
    let start = Instant::now();
    let total = job.total_files();
    let mut copied: u64 = 0;
    let mut errors: u64 = 0;

    let update = |copied: u64, message: String| {
        let _ = progress_tx.send(CopyProgress::Update {
            copied,
            total,
            message,
        });
    };
    let report_error = |path: &Path, copied: u64, message: String| {
        warn!("{message}");
        let _ = progress_tx.send(CopyProgress::FileError {
            path: path.display().to_string(),
            copied,
            total,
            message,
        });
    };

    update(copied, "Starting copy process...".to_string());

    for group in job.groups().iter().filter(|g| !g.files.is_empty()) {
        if cancel_flag.load(Ordering::Relaxed) {
            return CopyProgress::Cancelled { copied, total };
        }

        let folder_name = sanitize_folder_name(&group.folder_name);
        let target = job.destination().join(&folder_name);
        if let Err(err) = std::fs::create_dir_all(&target) {
            errors += group.files.len() as u64;
            report_error(
                &target,
                copied,
                format!("ERROR creating folder '{folder_name}': {err}"),
            );
            continue;
        }
        let shown = if folder_name == group.folder_name {
            format!("'{folder_name}'")
        } else {
            format!("'{}' (sanitized to '{folder_name}')", group.folder_name)
        };
        update(copied, format!("Using folder: {shown}"));

        let mut seen_names = HashSet::new();
        for file in &group.files {
            if cancel_flag.load(Ordering::Relaxed) {
                return CopyProgress::Cancelled { copied, total };
            }
            let name = file.file_name();
            if !file.path.exists() {
                errors += 1;
                report_error(&file.path, copied, format!("ERROR missing '{name}'"));
                continue;
            }
            let file_name = file.path.file_name().unwrap_or(file.path.as_os_str());
            if !seen_names.insert(file_name) {
                let message =
                    format!("WARNING '{name}' already copied into '{folder_name}', overwriting");
                warn!("{message}");
                update(copied, message);
            }
            let dest = target.join(file_name);
            match copy_preserving_times(&file.path, &dest) {
                Ok(()) => {
                    copied += 1;
                    update(
                        copied,
                        format!("{COPIED_TICK_PREFIX}{copied}/{total} files..."),
                    );
                }
                Err(err) => {
                    errors += 1;
                    report_error(&file.path, copied, format!("ERROR copying '{name}': {err}"));
                }
            }
        }
    }

    let duration = start.elapsed();
    debug!("Copy loop finished in {:?}", duration);
    CopyProgress::Complete {
        success: errors == 0,
        summary: summary(copied, total, errors),
        copied,
        total,
        error_count: errors,
        duration,
    }
}

/// Copy contents and permissions, then carry over access and modification times.
fn copy_preserving_times(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::copy(src, dest)?;
    let meta = std::fs::metadata(src)?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
}
