use std::{
    fs::{self, read_dir},
    io::Result,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    error::{PathError, require_dir},
    record::{FileRecord, FileType, Timestamp, bytes_to_megabytes},
};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Whether dot-prefixed files and directories are visited.
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_hidden: true,
        }
    }
}

/// Collect a [`FileRecord`] for every regular file below `root`.
pub fn scan(root: &Path) -> std::result::Result<Vec<FileRecord>, PathError> {
    scan_with(root, &ScanOptions::default())
}

/// Depth-first, single-threaded walk of `root`.
///
/// Unreadable directories and entries, symlinks, and special files are
/// skipped; only a bad `root` fails the call. Records come back in walk
/// order: a directory's files before the contents of its subdirectories.
pub fn scan_with(
    root: &Path,
    opts: &ScanOptions,
) -> std::result::Result<Vec<FileRecord>, PathError> {
    let root = require_dir(root)?;

    let mut records = Vec::new();
    let mut pending = vec![root.clone()];

    while let Some(dir) = pending.pop() {
        let mut subdirs = Vec::new();
        if let Err(e) = scan_dir(&dir, &mut subdirs, &mut records, opts) {
            warn!("[scan] scan_dir({:?}) failed: {e}", dir);
        }
        // Reverse so the stack pops subdirectories in read_dir order.
        pending.extend(subdirs.into_iter().rev());
    }

    info!("[scan] {} files under {}", records.len(), root.display());

    Ok(records)
}

/// List one directory: files become records, subdirectories are queued.
/// Fails only when the directory itself cannot be read.
fn scan_dir(
    dir: &Path,
    subdirs: &mut Vec<PathBuf>,
    records: &mut Vec<FileRecord>,
    opts: &ScanOptions,
) -> Result<()> {
    for entry_res in read_dir(dir)? {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[scan] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        if !opts.include_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        // DirEntry::file_type does not follow symlinks.
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                warn!("[scan] file_type({:?}) failed: {e}", entry.path());
                continue;
            }
        };

        if file_type.is_symlink() {
            debug!("[scan] skipping symlink {:?}", entry.path());
        } else if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if file_type.is_file() {
            match inspect_file(&entry) {
                Ok(rec) => records.push(rec),
                Err(e) => warn!("[scan] stat({:?}) failed: {e}", entry.path()),
            }
        } else {
            debug!("[scan] skipping special file {:?}", entry.path());
        }
    }

    Ok(())
}

fn inspect_file(entry: &fs::DirEntry) -> Result<FileRecord> {
    let metadata = entry.metadata()?;
    let full_path = entry.path();
    let name = entry.file_name().to_string_lossy().into_owned();

    // A failing timestamp only blanks that one field. Birth time in
    // particular is missing on many Unix filesystems.
    let created = Timestamp::from_system_time(metadata.created().ok());
    let modified = Timestamp::from_system_time(metadata.modified().ok());
    let accessed = Timestamp::from_system_time(metadata.accessed().ok());

    let size_bytes = metadata.len();

    Ok(FileRecord {
        file_type: FileType::from_path(&full_path),
        full_path,
        name,
        created,
        modified,
        accessed,
        size_bytes,
        size_mb: bytes_to_megabytes(size_bytes),
    })
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
