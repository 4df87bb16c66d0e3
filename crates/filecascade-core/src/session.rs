/// One interactive FileCascade session.
///
/// Holds the chosen source and destination, the grouping parameters, the
/// scanned records, the live [`GroupSet`], at most one background job and a
/// timestamped activity log. A front end drives it by calling the operations
/// below and [`Session::process_messages`] once per frame.
///
/// While a job is running every operation that would touch the records or
/// the group set is rejected with [`SessionError::Busy`].
use crate::config::Settings;
use crate::copier::{self, CopyHandle, CopyJob, CopyProgress};
use crate::editor::DragPayload;
use crate::error::{SessionError, ValidationError};
use crate::extensions::ExtensionSet;
use crate::grouping;
use crate::indexer::progress::ScanProgress;
use crate::indexer::{self, ScanHandle};
use crate::model::format::format_local;
use crate::model::{FileRecord, GroupSet, LabelMode};
use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Maximum progress messages drained per call to [`Session::process_messages`].
///
/// Keeps a backlog (window hidden during a long job) from stalling a frame.
pub const MAX_MESSAGES_PER_FRAME: usize = 300;

/// Oldest activity-log lines are dropped beyond this many.
pub const MAX_LOG_ENTRIES: usize = 5_000;

/// Per-entry scan errors kept for display.
pub const MAX_SCAN_ERRORS: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Scan,
    Copy,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => f.write_str("Scan"),
            Self::Copy => f.write_str("Copy"),
        }
    }
}

/// Latest progress of the running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub kind: JobKind,
    pub current: u64,
    /// Unknown while scanning.
    pub total: Option<u64>,
    pub message: String,
}

impl JobStatus {
    /// Completed fraction in `0.0..=1.0`, when the total is known.
    pub fn fraction(&self) -> Option<f32> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some((self.current as f32 / total as f32).clamp(0.0, 1.0)),
            None => None,
        }
    }
}

/// How the last job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub kind: JobKind,
    pub success: bool,
    pub summary: String,
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", format_local(self.timestamp), self.message)
    }
}

enum ActiveJob {
    Scan(ScanHandle),
    Copy(CopyHandle),
}

impl ActiveJob {
    fn kind(&self) -> JobKind {
        match self {
            Self::Scan(_) => JobKind::Scan,
            Self::Copy(_) => JobKind::Copy,
        }
    }
}

pub struct Session {
    settings: Settings,
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    records: Vec<FileRecord>,
    groups: GroupSet,
    active: Option<ActiveJob>,
    status: Option<JobStatus>,
    outcome: Option<JobOutcome>,
    scan_errors: Vec<(String, String)>,
    log: VecDeque<LogEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let groups = GroupSet::new(settings.label_mode(), &settings.group_title_prefix);
        let mut session = Self {
            settings,
            source: None,
            destination: None,
            records: Vec::new(),
            groups,
            active: None,
            status: None,
            outcome: None,
            scan_errors: Vec::new(),
            log: VecDeque::new(),
        };
        session.log("Application started. Select source directory.");
        session
    }

    // ── Accessors ─────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Records from the last completed scan, sorted by modification time.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    pub fn status(&self) -> Option<&JobStatus> {
        self.status.as_ref()
    }

    pub fn scan_errors(&self) -> &[(String, String)] {
        &self.scan_errors
    }

    pub fn log_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter()
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_job(&self) -> Option<JobKind> {
        self.active.as_ref().map(ActiveJob::kind)
    }

    /// Whether a copy could be started right now (ignoring the destination).
    pub fn can_copy(&self) -> bool {
        !self.is_busy() && self.destination.is_some() && self.groups.total_files() > 0
    }

    /// Take the outcome of the most recently finished job, once.
    pub fn take_outcome(&mut self) -> Option<JobOutcome> {
        self.outcome.take()
    }

    /// Append a timestamped line to the activity log.
    pub fn log(&mut self, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Local::now(),
            message: message.into(),
        };
        info!("{}", entry.message);
        if self.log.len() >= MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
        self.log.push_back(entry);
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_busy() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    // ── Parameters ────────────────────────────────────────

    /// Select a new source directory. Previous results are discarded.
    pub fn set_source(&mut self, path: PathBuf) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.log(format!("Source directory selected: {}", path.display()));
        self.source = Some(path);
        self.records.clear();
        self.groups = self.empty_groups();
        Ok(())
    }

    pub fn set_destination(&mut self, path: PathBuf) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.log(format!("Destination directory selected: {}", path.display()));
        self.destination = Some(path);
        Ok(())
    }

    pub fn set_time_threshold(&mut self, minutes: u32) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let range = crate::config::THRESHOLD_RANGE;
        self.settings.time_threshold_minutes = minutes.clamp(*range.start(), *range.end());
        self.log(format!(
            "Time threshold set to {} minutes.",
            self.settings.time_threshold_minutes
        ));
        Ok(())
    }

    pub fn set_manual_grouping(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.settings.manual_grouping = enabled;
        self.log(format!(
            "Manual grouping {}.",
            if enabled { "enabled" } else { "disabled" }
        ));
        Ok(())
    }

    pub fn set_manual_group_count(&mut self, count: u32) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let range = crate::config::GROUP_COUNT_RANGE;
        self.settings.manual_group_count = count.clamp(*range.start(), *range.end());
        self.log(format!(
            "Manual group count set to {}.",
            self.settings.manual_group_count
        ));
        Ok(())
    }

    pub fn set_folder_pattern(&mut self, pattern: &str) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.settings.folder_name_pattern = pattern.to_string();
        self.log(format!("Folder name pattern set to: {pattern}"));
        Ok(())
    }

    /// Change the extension list. Takes effect on the next scan.
    pub fn set_extensions(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.settings.extensions = text.to_string();
        self.log(format!(
            "File extensions set to: {text}. Re-scan source to apply."
        ));
        Ok(())
    }

    /// Switch between derived labels and editable titles. Applies immediately.
    pub fn set_title_editing(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.settings.title_editing = enabled;
        self.groups.set_label_mode(self.settings.label_mode());
        self.log(format!(
            "Group title editing {}.",
            if enabled { "enabled" } else { "disabled" }
        ));
        Ok(())
    }

    // ── Jobs ──────────────────────────────────────────────

    /// Start scanning the source directory with the current extension list.
    pub fn start_scan(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let source = self.source.clone().ok_or(ValidationError::NoSource)?;
        let extensions = match ExtensionSet::parse(&self.settings.extensions) {
            Ok(ext) => ext,
            Err(err) => {
                self.log("Scan cancelled: No extensions provided.");
                return Err(err.into());
            }
        };

        self.log(format!("Starting scan with extensions: {extensions}"));
        self.records.clear();
        self.groups = self.empty_groups();
        self.scan_errors.clear();
        self.outcome = None;
        self.status = Some(JobStatus {
            kind: JobKind::Scan,
            current: 0,
            total: None,
            message: "Scanning... Please wait.".to_string(),
        });
        self.active = Some(ActiveJob::Scan(indexer::start_scan(source, extensions)));
        Ok(())
    }

    /// Start copying the current groups into the destination.
    ///
    /// A destination that does not exist yet is reported as
    /// [`ValidationError::DestinationMissing`]; call
    /// [`Session::create_destination`] after the user agrees, then retry.
    pub fn start_copy(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let destination = self
            .destination
            .clone()
            .ok_or(ValidationError::NoDestination)?;
        if self.records.is_empty() {
            return Err(ValidationError::NothingScanned.into());
        }
        if !destination.is_dir() {
            return Err(ValidationError::DestinationMissing(destination).into());
        }

        let empty: Vec<usize> = self
            .groups
            .groups()
            .iter()
            .enumerate()
            .filter(|(_, g)| g.is_empty())
            .map(|(i, _)| i + 1)
            .collect();
        for number in empty {
            self.log(format!("Skipping empty group {number}"));
        }
        let job = match CopyJob::from_group_set(
            &self.groups,
            &self.settings.folder_name_pattern,
            &destination,
        ) {
            Ok(job) => job,
            Err(err) => {
                self.log(format!("Copy not started: {err}"));
                return Err(err.into());
            }
        };

        self.log(format!(
            "Starting copy: {} groups, {} files...",
            job.folder_count(),
            job.total_files()
        ));
        self.outcome = None;
        self.status = Some(JobStatus {
            kind: JobKind::Copy,
            current: 0,
            total: Some(job.total_files()),
            message: String::new(),
        });
        self.active = Some(ActiveJob::Copy(copier::start_copy(job)));
        Ok(())
    }

    /// Create the destination directory (and any missing parents).
    pub fn create_destination(&mut self) -> Result<(), SessionError> {
        let destination = self
            .destination
            .clone()
            .ok_or(ValidationError::NoDestination)?;
        std::fs::create_dir_all(&destination).map_err(|source| {
            SessionError::CreateDestination {
                path: destination.clone(),
                source,
            }
        })?;
        self.log(format!("Destination created: {}", destination.display()));
        Ok(())
    }

    /// Request cancellation of the running job, if any.
    pub fn cancel(&mut self) {
        match &self.active {
            Some(ActiveJob::Scan(h)) => h.cancel(),
            Some(ActiveJob::Copy(h)) => h.cancel(),
            None => return,
        }
        self.log("Cancellation requested...");
    }

    /// Drain pending progress from the running job. Called once per frame.
    ///
    /// Returns `true` if anything changed.
    pub fn process_messages(&mut self) -> bool {
        match self.active.take() {
            Some(ActiveJob::Scan(handle)) => {
                let (changed, finished) = self.drain_scan(&handle.progress_rx);
                if !finished {
                    self.active = Some(ActiveJob::Scan(handle));
                }
                changed
            }
            Some(ActiveJob::Copy(handle)) => {
                let (changed, finished) = self.drain_copy(&handle.progress_rx);
                if !finished {
                    self.active = Some(ActiveJob::Copy(handle));
                }
                changed
            }
            None => false,
        }
    }

    /// Returns `(changed, finished)`.
    fn drain_scan(&mut self, progress_rx: &Receiver<ScanProgress>) -> (bool, bool) {
        let mut changed = false;
        for _ in 0..MAX_MESSAGES_PER_FRAME {
            let Ok(msg) = progress_rx.try_recv() else {
                break;
            };
            changed = true;
            match msg {
                ScanProgress::Started { .. } => {}
                ScanProgress::Update {
                    files_found,
                    ref current_path,
                } => {
                    self.set_status(JobKind::Scan, files_found, None, current_path.clone());
                }
                ScanProgress::Error {
                    ref path,
                    ref message,
                } => {
                    if self.scan_errors.len() < MAX_SCAN_ERRORS {
                        self.scan_errors.push((path.clone(), message.clone()));
                    }
                    self.log(msg.message());
                }
                ScanProgress::Complete { .. } => {
                    let summary = msg.message();
                    if let ScanProgress::Complete {
                        records,
                        error_count,
                        ..
                    } = msg
                    {
                        self.finish_scan(records, error_count, summary);
                    }
                    return (true, true);
                }
                ScanProgress::Failed(ref err) => {
                    warn!("Scan failed: {err}");
                    self.finish(JobKind::Scan, false, msg.message());
                    return (true, true);
                }
                ScanProgress::Cancelled => {
                    self.finish(JobKind::Scan, false, msg.message());
                    return (true, true);
                }
            }
        }
        (changed, false)
    }

    /// Skipped entries make the scan unsuccessful, but the files that were
    /// found are still grouped.
    fn finish_scan(&mut self, records: Vec<FileRecord>, error_count: u64, summary: String) {
        if records.is_empty() {
            self.log("No matching files found.");
            self.records = records;
            self.groups = self.empty_groups();
        } else {
            self.log(format!(
                "Scan found {} files. Applying grouping...",
                records.len()
            ));
            self.records = records;
            if let Err(err) = self.apply_grouping() {
                self.log(format!("Grouping failed: {err}"));
            }
        }
        self.log("Scan finished.");
        self.finish(JobKind::Scan, error_count == 0, summary);
    }

    fn drain_copy(&mut self, progress_rx: &Receiver<CopyProgress>) -> (bool, bool) {
        let mut changed = false;
        for _ in 0..MAX_MESSAGES_PER_FRAME {
            let Ok(msg) = progress_rx.try_recv() else {
                break;
            };
            changed = true;
            if msg.is_loggable() {
                self.log(msg.message());
            }
            match msg {
                CopyProgress::Update {
                    copied,
                    total,
                    message,
                } => {
                    self.set_status(JobKind::Copy, copied, Some(total), message);
                }
                CopyProgress::FileError {
                    copied,
                    total,
                    message,
                    ..
                } => {
                    self.set_status(JobKind::Copy, copied, Some(total), message);
                }
                CopyProgress::Complete {
                    success, summary, ..
                } => {
                    self.finish(JobKind::Copy, success, summary);
                    return (true, true);
                }
                CopyProgress::Cancelled { .. } => {
                    self.finish(JobKind::Copy, false, msg.message());
                    return (true, true);
                }
            }
        }
        (changed, false)
    }

    fn set_status(&mut self, kind: JobKind, current: u64, total: Option<u64>, message: String) {
        self.status = Some(JobStatus {
            kind,
            current,
            total,
            message,
        });
    }

    fn finish(&mut self, kind: JobKind, success: bool, summary: String) {
        // Copy messages are already logged as they are drained.
        if kind == JobKind::Scan {
            self.log(summary.clone());
        }
        self.status = None;
        self.outcome = Some(JobOutcome {
            kind,
            success,
            summary,
        });
    }

    // ── Grouping and edits ────────────────────────────────

    /// Re-run grouping over the scanned records, discarding manual edits.
    pub fn regroup(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        if self.records.is_empty() {
            self.log("No scanned files available to regroup.");
            return Err(ValidationError::NothingScanned.into());
        }
        self.log("Re-applying grouping settings...");
        self.apply_grouping()
    }

    fn apply_grouping(&mut self) -> Result<(), SessionError> {
        let mode = self.settings.grouping_mode();
        self.log(format!("Grouping {}...", mode.describe()));
        let set = grouping::apply(
            &self.records,
            mode,
            self.settings.label_mode(),
            &self.settings.group_title_prefix,
        )?;
        self.log(format!("{} groups formed.", set.len()));
        self.groups = set;
        Ok(())
    }

    fn empty_groups(&self) -> GroupSet {
        GroupSet::new(self.settings.label_mode(), &self.settings.group_title_prefix)
    }

    pub fn insert_group_after(&mut self, index: usize) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let at = self.groups.insert_after(index)?;
        self.log(format!("Adding new group below {}", index + 1));
        Ok(at)
    }

    pub fn remove_group(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.groups.remove(index)?;
        self.log(format!("Removing group {}", index + 1));
        Ok(())
    }

    /// Set a group title. Only meaningful in editable mode; derived labels
    /// are recomputed immediately.
    pub fn rename_group(&mut self, index: usize, title: &str) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.groups.rename(index, title)?;
        Ok(())
    }

    /// Apply a drop of `payload` onto `to_group` before row `position`.
    pub fn move_files(
        &mut self,
        payload: &DragPayload,
        to_group: usize,
        position: usize,
    ) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let moved = self.groups.move_files(&payload.paths, to_group, position)?;
        if moved > 0 {
            self.log("Group modified via drag and drop.");
        }
        Ok(moved)
    }

    pub fn label_mode(&self) -> LabelMode {
        self.groups.label_mode()
    }
}
