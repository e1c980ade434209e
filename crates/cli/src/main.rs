use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use filesift_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "filesift",
    version,
    about = "Find files by type, size and timestamps, then copy them",
    propagate_version = true
)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace) on top of FILESIFT_LOG_LEVEL
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_verbosity(cli.verbose).ok();

    match cli.command {
        Command::Scan(args) => commands::scan::run(args),
        Command::Filter(args) => commands::filter::run(args),
        Command::Copy(args) => commands::copy::run(args),
    }
}
