pub mod copy;
pub mod filter;
pub mod scan;

use std::error::Error;
use std::io::{Stderr, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Subcommand};
use filesift_engine::{
    CriteriaParseError, FilterCriteria, FilterError, parse_date_range, parse_size_range,
    parse_time_range, parse_type_filter,
};
use filesift_fs::{FileRecord, PathError, ScanOptions, scan_with};
use log::debug;

pub use copy::CopyArgs;
pub use filter::FilterArgs;
pub use scan::ScanArgs;

use crate::printer::{
    ColorChoice, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig, ResultPrinter,
};

/// Common error type for command handlers
pub type CommandResult<T> = Result<T, Box<dyn Error>>;

pub const EXIT_USAGE: u8 = 1;
pub const EXIT_PATH: u8 = 2;
pub const EXIT_COPY_FAILURES: u8 = 3;
pub const EXIT_CANCELLED: u8 = 130;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a directory and show the values each criterion can take.
    ///
    /// Example:
    ///   filesift scan ~/Downloads
    Scan(ScanArgs),

    /// List the files under a directory that match every given criterion.
    ///
    /// Example:
    ///   filesift filter ~/Downloads --type .pdf --size 1..20
    ///   filesift filter . --created 2024-01-01..2024-03-31 --json
    Filter(FilterArgs),

    /// Copy the files matching every given criterion into a directory.
    ///
    /// Example:
    ///   filesift copy ~/Pictures /mnt/backup --type .jpg --modified 2024-06-01..2024-06-30
    Copy(CopyArgs),
}

/// Directory to scan and how to walk it.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Directory to scan recursively
    pub root: PathBuf,

    /// Skip dot-prefixed files and directories
    #[arg(long)]
    pub no_hidden: bool,
}

impl SourceArgs {
    pub fn scan(&self) -> Result<Vec<FileRecord>, PathError> {
        let opts = ScanOptions {
            include_hidden: !self.no_hidden,
        };
        scan_with(&self.root, &opts)
    }
}

/// Filter criteria. Ranges are written `MIN..MAX` (inclusive); a single
/// value means exactly that value.
#[derive(Debug, Default, Args)]
pub struct CriteriaArgs {
    /// File type: an extension such as `.txt`, `Unknown` for files without
    /// one, or `.all` for any type
    #[arg(long = "type", value_name = "TYPE")]
    pub file_type: Option<String>,

    /// Size in megabytes, e.g. `1..5` or `0.5`
    #[arg(long, value_name = "MB")]
    pub size: Option<String>,

    /// Creation date, e.g. `2024-01-01..2024-01-31`
    #[arg(long, value_name = "DATE")]
    pub created: Option<String>,

    /// Creation time of day on any date, e.g. `09:00..17:30`
    #[arg(long, value_name = "TIME")]
    pub created_time: Option<String>,

    /// Modification date
    #[arg(long, value_name = "DATE")]
    pub modified: Option<String>,

    /// Access date
    #[arg(long, value_name = "DATE")]
    pub accessed: Option<String>,
}

impl CriteriaArgs {
    /// Every flag left out stays disabled.
    pub fn to_criteria(&self) -> Result<FilterCriteria, CriteriaParseError> {
        let mut criteria = FilterCriteria::new();

        if let Some(s) = &self.file_type {
            criteria = criteria.with_file_type(parse_type_filter(s)?);
        }
        if let Some(s) = &self.size {
            criteria = criteria.with_size_mb(parse_size_range(s)?);
        }
        if let Some(s) = &self.created {
            criteria = criteria.with_created_date(parse_date_range(s)?);
        }
        if let Some(s) = &self.created_time {
            criteria = criteria.with_created_time(parse_time_range(s)?);
        }
        if let Some(s) = &self.modified {
            criteria = criteria.with_modified_date(parse_date_range(s)?);
        }
        if let Some(s) = &self.accessed {
            criteria = criteria.with_accessed_date(parse_date_range(s)?);
        }

        Ok(criteria)
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress summaries and per-file progress
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn make_printer(&self, limit: usize) -> Box<dyn ResultPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let cfg = PrinterConfig {
            format,
            color: ColorChoice::parse(&self.color),
            limit,
            verbose_summary: !self.quiet,
        };

        match cfg.format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

/// Exit status for an error that ended a command.
///
/// Bad criteria are the user's to fix and map to [`EXIT_USAGE`]; anything
/// else is a path or I/O problem.
pub fn exit_code_for(err: &(dyn Error + 'static)) -> u8 {
    if err.is::<FilterError>() || err.is::<CriteriaParseError>() {
        EXIT_USAGE
    } else {
        EXIT_PATH
    }
}

/// Print `[kind] message` to stderr and pick the exit status.
pub fn report_error(kind: &str, err: &(dyn Error + 'static)) -> ExitCode {
    debug!("[{kind}] {err:?}");
    eprintln!("[{kind}] {err}");

    if err.is::<FilterError>() {
        eprintln!(
            "[{kind}] choose at least one of --type, --size, --created, --created-time, \
             --modified, --accessed and try again"
        );
    }

    ExitCode::from(exit_code_for(err))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
