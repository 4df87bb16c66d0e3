/// End-to-end tests for `AppState`, the GUI application state machine.
///
/// These drive the real session and background jobs without opening an
/// egui window. Each test pumps `process_messages()` the way the frame loop
/// does until the running job has finished.
use filecascade_core::config::Settings;
use filecascade_core::editor::DragPayload;
use filecascade_gui::state::{AppState, NoticeKind};
use filetime::FileTime;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn touch(path: &Path, minute: i64) {
    fs::write(path, b"1,2,3\n").unwrap();
    let t = FileTime::from_unix_time(1_700_000_000 + minute * 60, 0);
    filetime::set_file_mtime(path, t).unwrap();
}

/// Three files in one burst, two more half an hour later.
fn make_source() -> TempDir {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("a1.csv"), 0);
    touch(&tmp.path().join("a2.csv"), 1);
    touch(&tmp.path().join("a3.csv"), 2);
    touch(&tmp.path().join("b1.csv"), 30);
    touch(&tmp.path().join("b2.csv"), 31);
    touch(&tmp.path().join("notes.txt"), 5);
    tmp
}

/// Pump `process_messages()` until no job is running or the deadline expires.
fn pump_until_idle(state: &mut AppState) {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    loop {
        state.process_messages();
        if !state.session.is_busy() {
            return;
        }
        assert!(
            std::time::Instant::now() < deadline,
            "job did not complete within 30 seconds"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn scanned_state(src: &Path) -> AppState {
    let mut state = AppState::new(Settings::default());
    state.choose_source(src.to_path_buf());
    assert!(state.session.is_busy(), "choosing a source starts a scan");
    pump_until_idle(&mut state);
    state
}

// ── Scan ──────────────────────────────────────────────────────────────────────

#[test]
fn choosing_source_scans_and_groups_silently() {
    let src = make_source();
    let state = scanned_state(src.path());

    assert!(state.notice.is_none(), "successful scans show no notice");
    assert_eq!(state.session.records().len(), 5);
    assert_eq!(state.session.groups().len(), 2);
    assert_eq!(state.title_buffers.len(), 2);
}

#[test]
fn missing_source_reports_scan_error() {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::new(Settings::default());
    state.choose_source(tmp.path().join("gone"));
    pump_until_idle(&mut state);

    let notice = state.notice.expect("scan failure should raise a notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Scan Error");
    assert!(state.session.groups().is_empty());
}

#[test]
fn rescan_uses_typed_extensions() {
    let src = make_source();
    let mut state = scanned_state(src.path());

    state.extensions_input = ".txt".into();
    state.start_scan();
    pump_until_idle(&mut state);

    assert_eq!(state.session.settings().extensions, ".txt");
    assert_eq!(state.session.records().len(), 1);
}

#[test]
fn empty_extension_list_warns_and_does_not_scan() {
    let src = make_source();
    let mut state = scanned_state(src.path());

    state.extensions_input = " , ".into();
    state.start_scan();

    assert!(!state.session.is_busy());
    assert_eq!(state.notice.unwrap().kind, NoticeKind::Warning);
}

// ── Copy ──────────────────────────────────────────────────────────────────────

#[test]
fn copy_into_existing_destination() {
    let src = make_source();
    let dst = TempDir::new().unwrap();
    let mut state = scanned_state(src.path());

    state.choose_destination(dst.path().to_path_buf());
    state.request_copy();
    pump_until_idle(&mut state);

    let notice = state.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.title, "Copy Complete");
    assert!(dst.path().join("Run_1/a1.csv").is_file());
    assert!(dst.path().join("Run_2/b2.csv").is_file());
}

#[test]
fn missing_destination_is_created_after_confirmation() {
    let src = make_source();
    let tmp = TempDir::new().unwrap();
    let dst = tmp.path().join("out");
    let mut state = scanned_state(src.path());

    state.choose_destination(dst.clone());
    state.request_copy();
    assert_eq!(state.confirm_create_destination.as_deref(), Some(dst.as_path()));
    assert!(!state.session.is_busy());

    state.answer_create_destination(true);
    assert!(state.confirm_create_destination.is_none());
    pump_until_idle(&mut state);

    assert!(dst.join("Run_1/a3.csv").is_file());
    assert_eq!(state.notice.unwrap().title, "Copy Complete");
}

#[test]
fn declining_destination_creation_copies_nothing() {
    let src = make_source();
    let tmp = TempDir::new().unwrap();
    let dst = tmp.path().join("out");
    let mut state = scanned_state(src.path());

    state.choose_destination(dst.clone());
    state.request_copy();
    state.answer_create_destination(false);

    assert!(state.confirm_create_destination.is_none());
    assert!(!state.session.is_busy());
    assert!(!dst.exists());
}

#[test]
fn folder_pattern_is_synced_before_copy() {
    let src = make_source();
    let dst = TempDir::new().unwrap();
    let mut state = scanned_state(src.path());

    state.folder_pattern_input = "Batch-{num}".into();
    state.choose_destination(dst.path().to_path_buf());
    state.request_copy();
    pump_until_idle(&mut state);

    assert!(dst.path().join("Batch-1/a1.csv").is_file());
    assert!(dst.path().join("Batch-2/b1.csv").is_file());
}

// ── Editing ───────────────────────────────────────────────────────────────────

#[test]
fn dropping_a_file_moves_it_between_groups() {
    let src = make_source();
    let mut state = scanned_state(src.path());
    let moved = state.session.groups().groups()[0].files[2].path.clone();

    let payload = state.drag_payload_for(&moved);
    state.drop_files(&payload, 1, 0);

    let groups = state.session.groups().groups();
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].len(), 3);
    assert_eq!(groups[1].files[0].path, moved);
    assert!(state.selection.is_empty());
}

#[test]
fn multi_selection_drags_together() {
    let src = make_source();
    let mut state = scanned_state(src.path());
    let first = state.session.groups().groups()[0].files[0].path.clone();
    let second = state.session.groups().groups()[0].files[1].path.clone();

    state.click_file(&first, false);
    state.click_file(&second, true);
    let payload = state.drag_payload_for(&second);
    assert_eq!(payload, DragPayload::new(vec![first, second]));

    state.drop_files(&payload, 1, usize::MAX);
    let groups = state.session.groups().groups();
    assert_eq!(groups[0].len(), 1);
    assert_eq!(groups[1].len(), 4);
}

#[test]
fn edited_titles_name_the_folders() {
    let src = make_source();
    let dst = TempDir::new().unwrap();
    let mut state = scanned_state(src.path());

    state.set_title_editing(true);
    state.title_buffers[0] = "Warmup".into();
    state.commit_title(0);
    state.title_buffers[1] = "Main: Run".into();
    state.commit_title(1);

    state.choose_destination(dst.path().to_path_buf());
    state.request_copy();
    pump_until_idle(&mut state);

    assert!(dst.path().join("Warmup/a1.csv").is_file());
    assert!(dst.path().join("Main Run/b1.csv").is_file());
}

#[test]
fn adding_and_removing_groups_keeps_buffers_in_step() {
    let src = make_source();
    let mut state = scanned_state(src.path());

    state.insert_group_after(0);
    assert_eq!(state.session.groups().len(), 3);
    assert_eq!(state.title_buffers.len(), 3);
    assert!(state.session.groups().groups()[1].is_empty());

    state.remove_group(1);
    assert_eq!(state.session.groups().len(), 2);
    assert_eq!(state.title_buffers.len(), 2);
    assert_eq!(state.session.groups().total_files(), 5);
}

#[test]
fn edits_are_rejected_while_scanning() {
    let src = make_source();
    let mut state = scanned_state(src.path());

    state.start_scan();
    if state.session.is_busy() {
        state.insert_group_after(0);
        let notice = state.notice.take().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
    }
    pump_until_idle(&mut state);
    assert_eq!(state.session.groups().len(), 2);
}

#[test]
fn manual_grouping_splits_evenly() {
    let src = make_source();
    let mut state = scanned_state(src.path());

    state.set_manual_grouping(true);
    state.set_manual_group_count(5);
    state.regroup();

    let sizes: Vec<usize> = state
        .session
        .groups()
        .groups()
        .iter()
        .map(|g| g.len())
        .collect();
    assert_eq!(sizes, vec![1, 1, 1, 1, 1]);
    assert_eq!(state.title_buffers.len(), 5);
}
