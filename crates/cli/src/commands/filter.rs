use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use filesift_engine::{FilterError, apply_filters};

use crate::commands::{CommandResult, CriteriaArgs, OutputOptions, SourceArgs, report_error};
use crate::printer::ListContext;

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub criteria: CriteriaArgs,

    /// Maximum number of files to display
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: FilterArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => report_error("filter", e.as_ref()),
    }
}

fn execute(args: FilterArgs) -> CommandResult<ExitCode> {
    // Reject bad criteria before paying for a scan.
    let criteria = args.criteria.to_criteria()?;
    if criteria.is_empty() {
        return Err(FilterError::NoCriteriaSelected.into());
    }

    let started = Instant::now();
    let records = args.source.scan()?;
    let result = apply_filters(&records, &criteria)?;
    let elapsed = started.elapsed();

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut printer = args.output.make_printer(limit);

    let ctx = ListContext {
        kind: "filter",
        root: &args.source.root,
        scanned: records.len(),
        total: result.len(),
        truncated: result.len() > limit,
        elapsed: Some(elapsed),
    };

    printer.begin(&ctx).context("failed to write output")?;
    for rec in result.iter().take(limit) {
        printer
            .print_record(rec, &ctx)
            .context("failed to write output")?;
    }
    printer.finish(&ctx).context("failed to write output")?;

    Ok(ExitCode::SUCCESS)
}
