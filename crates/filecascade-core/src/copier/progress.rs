/// Copy progress messages sent from the copy thread to the caller.
use std::time::Duration;

/// Copy progress updates.
///
/// Exactly one terminal message (`Complete` or `Cancelled`) ends every job.
#[derive(Debug, Clone, PartialEq)]
pub enum CopyProgress {
    /// Sent at start, after every folder and after every file.
    Update {
        copied: u64,
        total: u64,
        message: String,
    },
    /// A non-fatal error. The file (or whole group, for a folder error) is skipped.
    FileError {
        path: String,
        copied: u64,
        total: u64,
        message: String,
    },
    /// All groups processed. `success` is true only when `error_count` is zero.
    Complete {
        success: bool,
        summary: String,
        copied: u64,
        total: u64,
        error_count: u64,
        duration: Duration,
    },
    /// Job was cancelled by the caller before finishing.
    Cancelled { copied: u64, total: u64 },
}

impl CopyProgress {
    /// Whether this message is worth a line in the activity log.
    ///
    /// Per-file ticks are only logged every tenth file and on the last one.
    pub fn is_loggable(&self) -> bool {
        match self {
            Self::Update {
                copied,
                total,
                message,
            } => !message.starts_with(COPIED_TICK_PREFIX) || copied % 10 == 0 || copied == total,
            _ => true,
        }
    }

    /// Human-readable line for the activity log.
    pub fn message(&self) -> String {
        match self {
            Self::Update { message, .. } => message.clone(),
            Self::FileError { message, .. } => message.clone(),
            Self::Complete { summary, .. } => summary.clone(),
            Self::Cancelled { copied, total } => {
                format!("Copy cancelled. {copied}/{total} files copied.")
            }
        }
    }
}

pub(crate) const COPIED_TICK_PREFIX: &str = "Copied ";

/// Final summary line for a finished job.
pub fn summary(copied: u64, total: u64, errors: u64) -> String {
    let mut text = format!("Copy finished. {copied}/{total} files copied.");
    if errors > 0 {
        text.push_str(&format!(" {errors} errors."));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_errors_only_when_present() {
        assert_eq!(summary(3, 3, 0), "Copy finished. 3/3 files copied.");
        assert_eq!(summary(2, 3, 1), "Copy finished. 2/3 files copied. 1 errors.");
    }

    #[test]
    fn per_file_ticks_are_thinned_for_the_log() {
        let tick = |copied| CopyProgress::Update {
            copied,
            total: 25,
            message: format!("{COPIED_TICK_PREFIX}{copied}/25 files..."),
        };
        assert!(!tick(3).is_loggable());
        assert!(tick(10).is_loggable());
        assert!(tick(25).is_loggable());

        let folder = CopyProgress::Update {
            copied: 3,
            total: 25,
            message: "Using folder: 'Run_2'".into(),
        };
        assert!(folder.is_loggable());
    }
}
