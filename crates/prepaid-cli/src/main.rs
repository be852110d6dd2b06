//! Freight-prepaid converter CLI.

use clap::Parser;
use prepaid_cli::logging::init_logging;
use prepaid_cli::pipeline::ConvertOutcome;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_convert, run_inspect};
use crate::summary::{print_convert, print_inspect};

/// Exit code when product names are still required.
const EXIT_NEEDS_NAMES: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Convert(args) => match run_convert(&args) {
            Ok(report) => {
                print_convert(&report);
                match report.outcome {
                    ConvertOutcome::Written { .. } => 0,
                    ConvertOutcome::NeedsNames { .. } => EXIT_NEEDS_NAMES,
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(report) => {
                print_inspect(&args.input, &report);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
