mod copy;
mod error;
mod record;
mod walker;

pub use copy::{CopyFailure, CopyOptions, CopyProgress, CopyReport, copy_results, copy_results_with};
pub use error::PathError;
pub use record::{FileRecord, FileType, Timestamp, bytes_to_megabytes};
pub use walker::{ScanOptions, scan, scan_with};
