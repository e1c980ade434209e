use std::{
    ffi::OsString,
    fs::{self, File, FileTimes},
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use crossbeam::channel::Sender;
use hashbrown::HashMap;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    error::{PathError, require_dir},
    record::FileRecord,
};

/// Per-file event emitted while a copy batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyProgress {
    Copied {
        source: PathBuf,
        destination: PathBuf,
        bytes: u64,
    },
    SkippedSameFile {
        source: PathBuf,
    },
    Failed {
        source: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a copy batch. Counters only cover files that were attempted;
/// after a cancellation the untouched remainder appears nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub skipped_same_file: usize,
    pub failed: Vec<CopyFailure>,
    pub bytes_copied: u64,
    pub cancelled: bool,
}

impl CopyReport {
    #[inline]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Every attempted file was either copied or already in place.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.cancelled
    }
}

#[derive(Debug, Default)]
pub struct CopyOptions<'a> {
    /// Checked before each file. Never interrupts a copy in flight.
    pub cancel: Option<&'a AtomicBool>,
    /// Receives one event per attempted file. A dropped receiver is ignored.
    pub progress: Option<Sender<CopyProgress>>,
}

enum Outcome {
    Copied { destination: PathBuf, bytes: u64 },
    SameFile,
}

/// Copy every record into `dest` under its own file name.
pub fn copy_results(records: &[&FileRecord], dest: &Path) -> Result<CopyReport, PathError> {
    copy_results_with(records, dest, &CopyOptions::default())
}

/// Copy every record into `dest`, preserving permissions and timestamps.
///
/// The destination is validated up front; after that no single file can fail
/// the batch. A source that resolves to the same file as its destination is
/// counted as skipped, anything else that goes wrong is recorded in
/// [`CopyReport::failed`]. Files already in `dest` before the batch are
/// overwritten, but a name this batch already wrote is never written twice:
/// the later record fails with a name collision.
pub fn copy_results_with(
    records: &[&FileRecord],
    dest: &Path,
    opts: &CopyOptions<'_>,
) -> Result<CopyReport, PathError> {
    let dest = require_dir(dest)?;
    let mut report = CopyReport::default();
    // Destination name -> source that claimed it in this batch.
    let mut claimed: HashMap<OsString, PathBuf> = HashMap::new();

    debug!(
        "[copy] copying {} files into {}",
        records.len(),
        dest.display()
    );

    for rec in records {
        if opts.cancel.is_some_and(|flag| flag.load(Ordering::Acquire)) {
            info!(
                "[copy] cancelled after {} of {} files",
                report.attempted,
                records.len()
            );
            report.cancelled = true;
            break;
        }

        report.attempted += 1;
        let source = rec.full_path.as_path();

        let event = match copy_one(source, &dest, &mut claimed) {
            Ok(Outcome::Copied { destination, bytes }) => {
                debug!("[copy] {:?} -> {:?} ({bytes} bytes)", source, destination);
                report.succeeded += 1;
                report.bytes_copied += bytes;
                CopyProgress::Copied {
                    source: source.to_path_buf(),
                    destination,
                    bytes,
                }
            }
            Ok(Outcome::SameFile) => {
                debug!("[copy] {:?} is already in place, skipping", source);
                report.skipped_same_file += 1;
                CopyProgress::SkippedSameFile {
                    source: source.to_path_buf(),
                }
            }
            Err(e) => {
                warn!("[copy] {:?} failed: {e}", source);
                let reason = e.to_string();
                report.failed.push(CopyFailure {
                    path: source.to_path_buf(),
                    reason: reason.clone(),
                });
                CopyProgress::Failed {
                    source: source.to_path_buf(),
                    reason,
                }
            }
        };

        if let Some(tx) = &opts.progress {
            let _ = tx.send(event);
        }
    }

    info!(
        "[copy] attempted={} succeeded={} skipped={} failed={}",
        report.attempted,
        report.succeeded,
        report.skipped_same_file,
        report.failed_count()
    );

    Ok(report)
}

fn copy_one(
    source: &Path,
    dest_dir: &Path,
    claimed: &mut HashMap<OsString, PathBuf>,
) -> io::Result<Outcome> {
    let name = source.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "source has no file name")
    })?;

    if let Some(earlier) = claimed.get(name) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("name collides with {}", earlier.display()),
        ));
    }

    let destination = dest_dir.join(name);

    if is_same_file(source, &destination) {
        claimed.insert(name.to_os_string(), source.to_path_buf());
        return Ok(Outcome::SameFile);
    }

    // Read before copying: the copy itself bumps the source's atime.
    let meta = fs::metadata(source)?;
    let bytes = fs::copy(source, &destination)?;
    claimed.insert(name.to_os_string(), source.to_path_buf());

    if let Err(e) = preserve_times(&meta, &destination) {
        debug!("[copy] could not preserve times on {:?}: {e}", destination);
    }

    Ok(Outcome::Copied { destination, bytes })
}

/// Same device and inode, so hard links count as the same file.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn preserve_times(source_meta: &fs::Metadata, destination: &Path) -> io::Result<()> {
    let mut times = FileTimes::new().set_modified(source_meta.modified()?);
    if let Ok(accessed) = source_meta.accessed() {
        times = times.set_accessed(accessed);
    }

    // fs::copy carries permissions over, so a read-only source leaves a
    // read-only copy. Owners can still set times through a read handle on Unix.
    let file = match File::options().write(true).open(destination) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => File::open(destination)?,
        Err(e) => return Err(e),
    };
    file.set_times(times)
}

#[cfg(test)]
#[path = "copy_tests.rs"]
mod tests;
