/// Full session flow: scan, group, edit, copy.
use filecascade_core::config::Settings;
use filecascade_core::editor::DragPayload;
use filecascade_core::{JobKind, JobOutcome, Session, SessionError, ValidationError};
use filetime::FileTime;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn touch(path: &Path, minute: i64) {
    fs::write(path, b"data").unwrap();
    let t = FileTime::from_unix_time(1_700_000_000 + minute * 60, 0);
    filetime::set_file_mtime(path, t).unwrap();
}

/// Call `process_messages` like a UI frame loop until the job ends.
fn pump(session: &mut Session) -> JobOutcome {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    loop {
        assert!(
            std::time::Instant::now() < deadline,
            "job did not finish within 30 seconds"
        );
        session.process_messages();
        if let Some(outcome) = session.take_outcome() {
            assert!(!session.is_busy());
            return outcome;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Two bursts of CSV files 30 minutes apart, plus a file that should be ignored.
fn source_tree(root: &Path) {
    touch(&root.join("r1.csv"), 0);
    touch(&root.join("r2.csv"), 1);
    touch(&root.join("r3.csv"), 2);
    touch(&root.join("s1.csv"), 32);
    touch(&root.join("s2.csv"), 33);
    touch(&root.join("readme.md"), 1);
}

#[test]
fn scan_groups_and_copies() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    source_tree(src.path());

    let mut session = Session::new(Settings::default());
    session.set_source(src.path().to_path_buf()).unwrap();
    session.start_scan().unwrap();
    assert_eq!(session.active_job(), Some(JobKind::Scan));

    let outcome = pump(&mut session);
    assert!(outcome.success, "{}", outcome.summary);
    assert_eq!(outcome.kind, JobKind::Scan);
    assert_eq!(session.records().len(), 5);
    assert_eq!(session.groups().len(), 2);
    assert_eq!(session.groups().groups()[0].len(), 3);

    session.set_destination(dst.path().to_path_buf()).unwrap();
    assert!(session.can_copy());
    session.start_copy().unwrap();
    let outcome = pump(&mut session);
    assert!(outcome.success, "{}", outcome.summary);
    assert_eq!(outcome.summary, "Copy finished. 5/5 files copied.");
    assert!(dst.path().join("Run_1/r3.csv").is_file());
    assert!(dst.path().join("Run_2/s2.csv").is_file());
    assert!(!dst.path().join("Run_1/readme.md").exists());
}

#[test]
fn edits_shape_the_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    source_tree(src.path());

    let mut session = Session::default();
    session.set_source(src.path().to_path_buf()).unwrap();
    session.start_scan().unwrap();
    pump(&mut session);

    // Empty middle group: numbering of the last folder skips to 3.
    session.insert_group_after(0).unwrap();
    let payload = DragPayload::single(src.path().join("r3.csv"));
    session.move_files(&payload, 2, 0).unwrap();

    session.set_destination(dst.path().to_path_buf()).unwrap();
    session.start_copy().unwrap();
    let outcome = pump(&mut session);
    assert!(outcome.success);

    assert!(dst.path().join("Run_3/r3.csv").is_file());
    assert!(dst.path().join("Run_1/r1.csv").is_file());
    assert!(!dst.path().join("Run_2").exists());
    assert!(session
        .log_entries()
        .any(|e| e.message == "Skipping empty group 2"));
}

#[test]
fn jobs_block_edits_until_finished() {
    let src = TempDir::new().unwrap();
    source_tree(src.path());

    let mut session = Session::default();
    session.set_source(src.path().to_path_buf()).unwrap();
    session.start_scan().unwrap();

    assert!(matches!(session.start_scan(), Err(SessionError::Busy)));
    assert!(matches!(session.regroup(), Err(SessionError::Busy)));
    assert!(matches!(session.insert_group_after(0), Err(SessionError::Busy)));
    assert!(matches!(
        session.set_source(src.path().to_path_buf()),
        Err(SessionError::Busy)
    ));

    pump(&mut session);
    assert!(session.regroup().is_ok());
}

#[test]
fn scan_of_missing_source_reports_failure() {
    let tmp = TempDir::new().unwrap();
    let mut session = Session::default();
    session.set_source(tmp.path().join("missing")).unwrap();
    session.start_scan().unwrap();
    let outcome = pump(&mut session);
    assert!(!outcome.success);
    assert!(outcome.summary.starts_with("Error during scanning:"));
    assert!(session.groups().is_empty());
}

#[test]
fn missing_destination_is_created_on_request() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    source_tree(src.path());
    let out = dst.path().join("new").join("nested");

    let mut session = Session::default();
    session.set_source(src.path().to_path_buf()).unwrap();
    session.start_scan().unwrap();
    pump(&mut session);

    session.set_destination(out.clone()).unwrap();
    assert!(matches!(
        session.start_copy(),
        Err(SessionError::Validation(ValidationError::DestinationMissing(_)))
    ));
    session.create_destination().unwrap();
    session.start_copy().unwrap();
    assert!(pump(&mut session).success);
    assert!(out.join("Run_2/s1.csv").is_file());
}

#[test]
fn manual_grouping_from_settings() {
    let src = TempDir::new().unwrap();
    source_tree(src.path());
    let settings = Settings::from_json(r#"{ "manual_grouping": true, "manual_group_count": 2 }"#)
        .unwrap();

    let mut session = Session::new(settings);
    session.set_source(src.path().to_path_buf()).unwrap();
    session.start_scan().unwrap();
    pump(&mut session);

    let sizes: Vec<usize> = session.groups().groups().iter().map(|g| g.len()).collect();
    assert_eq!(sizes, vec![3, 2]);
}
