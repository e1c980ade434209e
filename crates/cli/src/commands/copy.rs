use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;

use anyhow::{Context, anyhow};
use clap::Args;
use crossbeam::channel;
use filesift_engine::{FilterError, apply_filters};
use filesift_fs::{CopyOptions, CopyProgress, CopyReport, FileRecord, copy_results_with};
use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

use crate::commands::{
    CommandResult, CriteriaArgs, EXIT_CANCELLED, EXIT_COPY_FAILURES, OutputOptions, SourceArgs,
    report_error,
};
use crate::printer::ResultPrinter;

#[derive(Debug, Args)]
pub struct CopyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Existing directory to copy the matching files into
    pub dest: PathBuf,

    #[command(flatten)]
    pub criteria: CriteriaArgs,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: CopyArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => report_error("copy", e.as_ref()),
    }
}

fn execute(args: CopyArgs) -> CommandResult<ExitCode> {
    let criteria = args.criteria.to_criteria()?;
    if criteria.is_empty() {
        return Err(FilterError::NoCriteriaSelected.into());
    }

    let records = args.source.scan()?;
    let result = apply_filters(&records, &criteria)?;
    info!(
        "[copy] {} of {} files selected for {}",
        result.len(),
        records.len(),
        args.dest.display()
    );

    // Handlers only raise the flag; the batch stops before its next file.
    let cancel = Arc::new(AtomicBool::new(false));
    for sig in [SIGINT, SIGTERM] {
        flag::register(sig, Arc::clone(&cancel))
            .with_context(|| format!("failed to register signal handler for {sig}"))?;
    }

    let mut printer = args.output.make_printer(usize::MAX);
    let report = copy_with_progress(result.hits(), &args.dest, &cancel, printer.as_mut())?;

    printer
        .print_report(&args.dest, &report)
        .context("failed to write copy report")?;

    Ok(ExitCode::from(report_status(&report)))
}

/// Run the copy on a worker thread and print its progress events here as
/// they arrive.
pub(crate) fn copy_with_progress(
    hits: &[&FileRecord],
    dest: &Path,
    cancel: &AtomicBool,
    printer: &mut dyn ResultPrinter,
) -> CommandResult<CopyReport> {
    let (tx, rx) = channel::unbounded::<CopyProgress>();

    thread::scope(|s| -> CommandResult<CopyReport> {
        let worker = s.spawn(move || {
            let opts = CopyOptions {
                cancel: Some(cancel),
                progress: Some(tx),
            };
            copy_results_with(hits, dest, &opts)
        });

        // The channel closes when the worker drops its options.
        let mut print_failed = false;
        for event in rx.iter() {
            if print_failed {
                continue;
            }
            if let Err(e) = printer.print_progress(&event) {
                warn!("[copy] could not print progress: {e}");
                print_failed = true;
            }
        }

        let report = worker
            .join()
            .map_err(|_| anyhow!("copy worker thread panicked"))??;

        if cancel.load(Ordering::Acquire) && !report.cancelled {
            info!("[copy] interrupt arrived after the last file");
        }

        Ok(report)
    })
}

/// Cancellation outranks per-file failures.
pub(crate) fn report_status(report: &CopyReport) -> u8 {
    if report.cancelled {
        EXIT_CANCELLED
    } else if report.failed_count() > 0 {
        EXIT_COPY_FAILURES
    } else {
        0
    }
}

#[cfg(test)]
#[path = "copy_tests.rs"]
mod tests;
