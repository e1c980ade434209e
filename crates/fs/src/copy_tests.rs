use super::*;

use crossbeam::channel;
use std::{
    fs::{create_dir, read, write},
    time::{Duration, SystemTime},
};

use crate::{record::Timestamp, walker::scan};

fn by_name<'a>(records: &'a [FileRecord], name: &str) -> &'a FileRecord {
    records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no record named {name}"))
}

#[test]
fn copy_into_missing_destination_fails_before_copying() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    create_dir(&src).expect("create src");
    write(src.join("a.txt"), b"a").expect("write a.txt");

    let records = scan(&src).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();
    let missing = tmp.path().join("does-not-exist");

    match copy_results(&refs, &missing) {
        Err(PathError::NotFound(p)) => assert_eq!(p, missing),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(!missing.exists(), "destination must not be created");
}

#[test]
fn copy_into_file_destination_is_not_a_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let target = tmp.path().join("file.txt");
    write(&target, b"x").expect("write file");

    let err = copy_results(&[], &target).expect_err("file destination");
    assert!(matches!(err, PathError::NotADirectory(_)), "got {err:?}");
}

#[test]
fn copy_counts_same_file_as_skipped_not_failed() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   a.txt        (copying into root puts it onto itself)
    //   sub/
    //     b.txt
    //     c.txt
    write(root.join("a.txt"), b"alpha").expect("write a.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("b.txt"), b"bravo").expect("write b.txt");
    write(root.join("sub").join("c.txt"), b"charlie").expect("write c.txt");

    let records = scan(root).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();

    let report = copy_results(&refs, root).expect("copy");

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.skipped_same_file, 1);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.bytes_copied, 5 + 7);
    assert!(report.is_clean());

    assert_eq!(read(root.join("a.txt")).unwrap(), b"alpha");
    assert_eq!(read(root.join("b.txt")).unwrap(), b"bravo");
    assert_eq!(read(root.join("c.txt")).unwrap(), b"charlie");
}

#[test]
fn copy_records_per_file_failures_and_keeps_going() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    let dest = tmp.path().join("dest");
    create_dir(&src).expect("create src");
    create_dir(&dest).expect("create dest");
    write(src.join("first.txt"), b"1").expect("write first");
    write(src.join("gone.txt"), b"2").expect("write gone");
    write(src.join("last.txt"), b"3").expect("write last");

    let records = scan(&src).expect("scan");
    // The file disappears between scan and copy.
    fs::remove_file(src.join("gone.txt")).expect("remove gone");

    let refs = vec![
        by_name(&records, "first.txt"),
        by_name(&records, "gone.txt"),
        by_name(&records, "last.txt"),
    ];
    let report = copy_results(&refs, &dest).expect("copy");

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.skipped_same_file, 0);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failed[0].path, by_name(&records, "gone.txt").full_path);
    assert!(!report.failed[0].reason.is_empty());
    assert!(!report.is_clean());

    assert!(dest.join("first.txt").exists());
    assert!(dest.join("last.txt").exists());
    assert!(!dest.join("gone.txt").exists());
}

#[test]
fn copy_overwrites_different_file_with_same_name() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    let dest = tmp.path().join("dest");
    create_dir(&src).expect("create src");
    create_dir(&dest).expect("create dest");
    write(src.join("notes.txt"), b"new contents").expect("write source");
    write(dest.join("notes.txt"), b"old").expect("write existing");

    let records = scan(&src).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();
    let report = copy_results(&refs, &dest).expect("copy");

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.skipped_same_file, 0);
    assert_eq!(read(dest.join("notes.txt")).unwrap(), b"new contents");
}

#[cfg(unix)]
#[test]
fn copy_skips_hard_link_to_source_and_leaves_it_intact() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    let dest = tmp.path().join("dest");
    create_dir(&src).expect("create src");
    create_dir(&dest).expect("create dest");
    write(src.join("a.txt"), b"hello, world!").expect("write source");
    fs::hard_link(src.join("a.txt"), dest.join("a.txt")).expect("hard link");

    let records = scan(&src).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();
    let report = copy_results(&refs, &dest).expect("copy");

    assert_eq!(report.attempted, 1);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.skipped_same_file, 1);
    assert!(report.failed.is_empty());
    assert_eq!(read(src.join("a.txt")).unwrap(), b"hello, world!");
}

#[test]
fn copy_fails_second_file_with_a_name_already_written() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    let dest = tmp.path().join("dest");
    create_dir(&src).expect("create src");
    create_dir(&dest).expect("create dest");
    create_dir(src.join("one")).expect("create one");
    create_dir(src.join("two")).expect("create two");
    write(src.join("one").join("a.txt"), b"first").expect("write one/a.txt");
    write(src.join("two").join("a.txt"), b"second").expect("write two/a.txt");

    let records = scan(&src).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();
    let report = copy_results(&refs, &dest).expect("copy");

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failed[0].path, refs[1].full_path);
    assert!(
        report.failed[0]
            .reason
            .contains(&refs[0].full_path.display().to_string()),
        "reason: {}",
        report.failed[0].reason
    );
    assert_eq!(read(dest.join("a.txt")).unwrap(), read(&refs[0].full_path).unwrap());
    assert_eq!(report.bytes_copied, refs[0].size_bytes);
}

#[test]
fn copy_preserves_modification_time() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    let dest = tmp.path().join("dest");
    create_dir(&src).expect("create src");
    create_dir(&dest).expect("create dest");

    let source = src.join("old.log");
    write(&source, b"log line").expect("write source");
    let past = SystemTime::now() - Duration::from_secs(3 * 24 * 60 * 60);
    File::options()
        .write(true)
        .open(&source)
        .and_then(|f| f.set_modified(past))
        .expect("backdate source");

    let records = scan(&src).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();
    copy_results(&refs, &dest).expect("copy");

    let copied = fs::metadata(dest.join("old.log")).expect("stat copy");
    let copied_mtime = Timestamp::from_system_time(copied.modified().ok());
    assert_eq!(copied_mtime, records[0].modified);
}

#[test]
fn copy_stops_between_files_when_cancelled() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("src");
    let dest = tmp.path().join("dest");
    create_dir(&src).expect("create src");
    create_dir(&dest).expect("create dest");
    write(src.join("a.txt"), b"a").expect("write a");
    write(src.join("b.txt"), b"b").expect("write b");

    let records = scan(&src).expect("scan");
    let refs: Vec<&FileRecord> = records.iter().collect();

    let cancel = AtomicBool::new(true);
    let opts = CopyOptions {
        cancel: Some(&cancel),
        progress: None,
    };
    let report = copy_results_with(&refs, &dest, &opts).expect("copy");

    assert!(report.cancelled);
    assert_eq!(report.attempted, 0);
    assert_eq!(report.succeeded, 0);
    assert!(!report.is_clean());
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn copy_emits_one_progress_event_per_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    let dest = root.join("dest");
    create_dir(&dest).expect("create dest");
    write(dest.join("here.txt"), b"h").expect("write here");
    write(root.join("there.txt"), b"tt").expect("write there");

    let records = scan(root).expect("scan");
    let refs = vec![by_name(&records, "here.txt"), by_name(&records, "there.txt")];

    let (tx, rx) = channel::unbounded();
    let opts = CopyOptions {
        cancel: None,
        progress: Some(tx),
    };
    copy_results_with(&refs, &dest, &opts).expect("copy");
    drop(opts);

    let events: Vec<CopyProgress> = rx.iter().collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], CopyProgress::SkippedSameFile { .. }));
    match &events[1] {
        CopyProgress::Copied {
            destination, bytes, ..
        } => {
            assert_eq!(destination.file_name().unwrap(), "there.txt");
            assert_eq!(*bytes, 2);
        }
        other => panic!("expected Copied, got {other:?}"),
    }
}
