mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    logging::setup_logging(cli.verbose);
    logging::log_version_info();

    match commands::run(cli.command, cli.json) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!("Command failed: {:?}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
