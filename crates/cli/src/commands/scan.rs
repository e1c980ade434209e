use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use filesift_engine::derive_ranges;
use log::info;

use crate::commands::{CommandResult, OutputOptions, SourceArgs, report_error};

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => report_error("scan", e.as_ref()),
    }
}

fn execute(args: ScanArgs) -> CommandResult<ExitCode> {
    let records = args.source.scan()?;
    let summary = derive_ranges(&records);

    info!(
        "[scan] {} files, {} types under {}",
        records.len(),
        summary.types.len().saturating_sub(1),
        args.source.root.display()
    );

    let mut printer = args.output.make_printer(usize::MAX);
    printer
        .print_ranges(&args.source.root, records.len(), &summary)
        .context("failed to write scan summary")?;

    Ok(ExitCode::SUCCESS)
}
