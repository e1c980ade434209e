use super::*;

use std::fs::{File, create_dir, write};

fn sized_file(path: &Path, bytes: u64) {
    let f = File::create(path).expect("create file");
    f.set_len(bytes).expect("set file length");
}

fn names(records: &[FileRecord]) -> Vec<&str> {
    let mut names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    names
}

#[test]
fn scan_missing_root_is_not_found() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("nope");

    match scan(&missing) {
        Err(PathError::NotFound(p)) => assert_eq!(p, missing),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn scan_file_root_is_not_a_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("plain.txt");
    write(&file, b"x").expect("write file");

    match scan(&file) {
        Err(PathError::NotADirectory(p)) => assert_eq!(p, file),
        other => panic!("expected NotADirectory, got {:?}", other),
    }
}

#[test]
fn scan_empty_directory_yields_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let records = scan(tmp.path()).expect("scan");
    assert!(records.is_empty());
}

#[test]
fn scan_recurses_and_emits_only_files() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   a.txt
    //   sub/
    //     b.MD
    //     deeper/
    //       c
    write(root.join("a.txt"), b"a").expect("write a.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("b.MD"), b"bb").expect("write b.MD");
    create_dir(root.join("sub").join("deeper")).expect("create deeper");
    write(root.join("sub").join("deeper").join("c"), b"ccc").expect("write c");

    let records = scan(root).expect("scan");
    assert_eq!(names(&records), vec!["a.txt", "b.MD", "c"]);

    let canonical_root = root.canonicalize().expect("canonicalize root");
    for rec in &records {
        assert!(
            rec.full_path.is_absolute(),
            "{:?} should be absolute",
            rec.full_path
        );
        assert!(rec.full_path.starts_with(&canonical_root));
        assert_eq!(
            rec.full_path.file_name().and_then(|n| n.to_str()),
            Some(rec.name.as_str())
        );
    }

    let by_name = |n: &str| records.iter().find(|r| r.name == n).expect("record");
    assert_eq!(by_name("a.txt").file_type, FileType::Ext("txt".into()));
    assert_eq!(by_name("b.MD").file_type, FileType::Ext("md".into()));
    assert_eq!(by_name("c").file_type, FileType::Unknown);
    assert_eq!(by_name("c").size_bytes, 3);
}

#[test]
fn scan_lists_directory_files_before_subdirectory_contents() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("inner.txt"), b"i").expect("write inner");
    write(root.join("top.txt"), b"t").expect("write top");

    let records = scan(root).expect("scan");
    let order: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["top.txt", "inner.txt"]);
}

#[test]
fn scan_sizes_are_rounded_megabytes() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    sized_file(&root.join("half.bin"), 512 * 1024);
    sized_file(&root.join("two.bin"), 2 * 1024 * 1024);
    sized_file(&root.join("ten.bin"), 10 * 1024 * 1024);
    sized_file(&root.join("empty.bin"), 0);

    let records = scan(root).expect("scan");
    let size_of = |n: &str| {
        records
            .iter()
            .find(|r| r.name == n)
            .map(|r| r.size_mb)
            .expect("record")
    };

    assert_eq!(size_of("half.bin"), 0.5);
    assert_eq!(size_of("two.bin"), 2.0);
    assert_eq!(size_of("ten.bin"), 10.0);
    assert_eq!(size_of("empty.bin"), 0.0);

    for rec in &records {
        assert!(rec.size_mb >= 0.0);
    }
}

#[test]
fn scan_resolves_modified_time_for_fresh_files() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join("f.txt"), b"x").expect("write file");

    let records = scan(tmp.path()).expect("scan");
    assert_eq!(records.len(), 1);
    assert!(records[0].modified.is_known());
    assert!(records[0].accessed.is_known());
}

#[test]
fn scan_with_hidden_excluded_skips_dot_entries() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join(".hidden"), b"h").expect("write .hidden");
    create_dir(root.join(".git")).expect("create .git");
    write(root.join(".git").join("HEAD"), b"ref").expect("write HEAD");
    write(root.join("shown.txt"), b"s").expect("write shown");

    let all = scan(root).expect("scan");
    assert_eq!(names(&all), vec![".hidden", "HEAD", "shown.txt"]);

    let opts = ScanOptions {
        include_hidden: false,
    };
    let visible = scan_with(root, &opts).expect("scan_with");
    assert_eq!(names(&visible), vec!["shown.txt"]);
}

#[cfg(unix)]
#[test]
fn scan_skips_symlinks_to_files_and_directories() {
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("real.txt"), b"r").expect("write real");
    create_dir(root.join("dir")).expect("create dir");
    write(root.join("dir").join("inside.txt"), b"i").expect("write inside");
    symlink(root.join("real.txt"), root.join("link.txt")).expect("file symlink");
    symlink(root.join("dir"), root.join("dirlink")).expect("dir symlink");
    symlink(root.join("gone"), root.join("dangling")).expect("dangling symlink");

    let records = scan(root).expect("scan");
    assert_eq!(names(&records), vec!["inside.txt", "real.txt"]);
}

#[cfg(unix)]
#[test]
fn scan_skips_unreadable_directories_without_failing() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("ok.txt"), b"ok").expect("write ok");
    let locked = root.join("locked");
    create_dir(&locked).expect("create locked");
    write(locked.join("secret.txt"), b"s").expect("write secret");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod 000");

    let result = scan(root);

    // Restore so the temp dir can be cleaned up.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod 755");

    let records = result.expect("scan should not fail on one unreadable dir");
    // Running as root can still read the directory.
    assert!(records.iter().any(|r| r.name == "ok.txt"));
}
