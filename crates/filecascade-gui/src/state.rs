/// Application state management.
///
/// Wraps a core [`Session`] with the state that only the UI needs: the
/// theme, the file selection, text-edit buffers and pending dialogs.
/// Background jobs report through the session; [`AppState::process_messages`]
/// runs once per frame, turns finished jobs into notices and keeps the edit
/// buffers in sync with the group set.
use filecascade_core::config::Settings;
use filecascade_core::editor::DragPayload;
use filecascade_core::model::GroupSet;
use filecascade_core::session::{JobKind, JobOutcome, Session};
use filecascade_core::{SessionError, ValidationError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A blocking message window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// All application state.
pub struct AppState {
    pub session: Session,

    // ── Edit buffers ───────────────────────────────────
    pub folder_pattern_input: String,
    pub extensions_input: String,
    /// One title buffer per group, used while title editing is enabled.
    pub title_buffers: Vec<String>,

    // ── Selection ──────────────────────────────────────
    /// Files selected with Ctrl/Cmd-click; dragged together.
    pub selection: HashSet<PathBuf>,

    // ── Dialogs ────────────────────────────────────────
    pub notice: Option<Notice>,
    /// Set while asking whether to create a missing destination.
    pub confirm_create_destination: Option<PathBuf>,
    pub show_about: bool,
    pub show_errors: bool,

    // ── Theme ──────────────────────────────────────────
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let folder_pattern_input = settings.folder_name_pattern.clone();
        let extensions_input = settings.extensions.clone();
        Self {
            session: Session::new(settings),
            folder_pattern_input,
            extensions_input,
            title_buffers: Vec::new(),
            selection: HashSet::new(),
            notice: None,
            confirm_create_destination: None,
            show_about: false,
            show_errors: false,
            dark_mode: true,
        }
    }

    /// Show `err` as a notice and return `None`, or pass the value through.
    fn report<T>(&mut self, title: &str, result: Result<T, SessionError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(err) => {
                warn!("{title}: {err}");
                let kind = match err {
                    SessionError::Busy | SessionError::Validation(_) => NoticeKind::Warning,
                    _ => NoticeKind::Error,
                };
                self.notice = Some(Notice::new(kind, title, capitalize(&err.to_string())));
                None
            }
        }
    }

    // ── Directories ───────────────────────────────────

    /// Use `path` as the source and scan it straight away.
    pub fn choose_source(&mut self, path: PathBuf) {
        let result = self.session.set_source(path);
        if self.report("Source", result).is_some() {
            self.selection.clear();
            self.sync_title_buffers();
            self.start_scan();
        }
    }

    pub fn choose_destination(&mut self, path: PathBuf) {
        let result = self.session.set_destination(path);
        self.report("Destination", result);
    }

    /// Re-scan the current source with the extension text as typed.
    pub fn start_scan(&mut self) {
        let text = self.extensions_input.clone();
        if text != self.session.settings().extensions {
            let result = self.session.set_extensions(&text);
            if self.report("Extensions", result).is_none() {
                return;
            }
        }
        let result = self.session.start_scan();
        if self.report("Scan", result).is_some() {
            self.selection.clear();
            self.sync_title_buffers();
        }
    }

    // ── Copy ──────────────────────────────────────────

    /// Start the copy, or ask first if the destination does not exist.
    pub fn request_copy(&mut self) {
        let pattern = self.folder_pattern_input.clone();
        if pattern != self.session.settings().folder_name_pattern {
            let result = self.session.set_folder_pattern(&pattern);
            if self.report("Folder pattern", result).is_none() {
                return;
            }
        }
        match self.session.start_copy() {
            Ok(()) => {}
            Err(SessionError::Validation(ValidationError::DestinationMissing(path))) => {
                self.confirm_create_destination = Some(path);
            }
            Err(SessionError::Validation(ValidationError::EmptyGroups)) => {
                self.notice = Some(Notice::new(
                    NoticeKind::Info,
                    "Empty Groups",
                    "All groups are empty.",
                ));
            }
            Err(err) => {
                self.report::<()>("Copy", Err(err));
            }
        }
    }

    /// Answer the create-destination prompt.
    pub fn answer_create_destination(&mut self, create: bool) {
        if self.confirm_create_destination.take().is_none() || !create {
            return;
        }
        let result = self.session.create_destination();
        if self.report("Error", result).is_some() {
            self.request_copy();
        }
    }

    pub fn cancel_job(&mut self) {
        self.session.cancel();
    }

    // ── Grouping parameters ───────────────────────────

    pub fn set_time_threshold(&mut self, minutes: u32) {
        let result = self.session.set_time_threshold(minutes);
        self.report("Settings", result);
    }

    pub fn set_manual_grouping(&mut self, enabled: bool) {
        let result = self.session.set_manual_grouping(enabled);
        self.report("Settings", result);
    }

    pub fn set_manual_group_count(&mut self, count: u32) {
        let result = self.session.set_manual_group_count(count);
        self.report("Settings", result);
    }

    /// Store the folder pattern as typed.
    pub fn commit_folder_pattern(&mut self) {
        let pattern = self.folder_pattern_input.clone();
        let result = self.session.set_folder_pattern(&pattern);
        self.report("Folder pattern", result);
    }

    pub fn set_title_editing(&mut self, enabled: bool) {
        let result = self.session.set_title_editing(enabled);
        self.report("Settings", result);
        self.sync_title_buffers();
    }

    /// Re-run grouping with the current parameters, discarding edits.
    pub fn regroup(&mut self) {
        let result = self.session.regroup();
        if self.report("Regroup", result).is_some() {
            self.selection.clear();
        }
        self.sync_title_buffers();
    }

    // ── Group edits ───────────────────────────────────

    pub fn insert_group_after(&mut self, index: usize) {
        let result = self.session.insert_group_after(index);
        self.report("Add group", result);
        self.sync_title_buffers();
    }

    pub fn remove_group(&mut self, index: usize) {
        let result = self.session.remove_group(index);
        self.report("Remove group", result);
        self.sync_title_buffers();
    }

    /// Write the title buffer of group `index` back into the group set.
    pub fn commit_title(&mut self, index: usize) {
        let Some(title) = self.title_buffers.get(index).cloned() else {
            return;
        };
        let result = self.session.rename_group(index, &title);
        self.report("Rename group", result);
        self.sync_title_buffers();
    }

    /// Ctrl/Cmd-click toggles; a plain click selects only `path`.
    pub fn click_file(&mut self, path: &Path, additive: bool) {
        if additive {
            if !self.selection.remove(path) {
                self.selection.insert(path.to_path_buf());
            }
        } else {
            self.selection.clear();
            self.selection.insert(path.to_path_buf());
        }
    }

    /// Payload for a drag that starts on `path`.
    pub fn drag_payload_for(&self, path: &Path) -> DragPayload {
        drag_payload(self.session.groups(), &self.selection, path)
    }

    /// Apply a drop onto `group` before `row` (`usize::MAX` appends).
    pub fn drop_files(&mut self, payload: &DragPayload, group: usize, row: usize) {
        let result = self.session.move_files(payload, group, row);
        if self.report("Move files", result).is_some() {
            self.selection.clear();
        }
        self.sync_title_buffers();
    }

    // ── Frame loop ────────────────────────────────────

    /// Drain background progress. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint.
    pub fn process_messages(&mut self) -> bool {
        let changed = self.session.process_messages();
        if let Some(outcome) = self.session.take_outcome() {
            self.notice = outcome_notice(&outcome);
            self.sync_title_buffers();
            return true;
        }
        changed
    }

    /// Rebuild the title buffers from the current group labels.
    pub fn sync_title_buffers(&mut self) {
        self.title_buffers = self
            .session
            .groups()
            .groups()
            .iter()
            .map(|g| g.label.to_string())
            .collect();
    }
}

/// The whole selection in display order if `path` is part of a multi-file
/// selection, otherwise just `path`.
pub fn drag_payload(set: &GroupSet, selection: &HashSet<PathBuf>, path: &Path) -> DragPayload {
    if selection.contains(path) && selection.len() > 1 {
        DragPayload::from_records(set.files().filter(|f| selection.contains(&f.path)))
    } else {
        DragPayload::single(path)
    }
}

/// Notice shown when a job ends. Successful scans finish silently.
fn outcome_notice(outcome: &JobOutcome) -> Option<Notice> {
    match (outcome.kind, outcome.success) {
        (JobKind::Scan, true) => None,
        (JobKind::Scan, false) => Some(Notice::new(
            NoticeKind::Error,
            "Scan Error",
            outcome.summary.clone(),
        )),
        (JobKind::Copy, true) => Some(Notice::new(
            NoticeKind::Info,
            "Copy Complete",
            outcome.summary.clone(),
        )),
        (JobKind::Copy, false) => Some(Notice::new(
            NoticeKind::Error,
            "Copy Errors",
            outcome.summary.clone(),
        )),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
