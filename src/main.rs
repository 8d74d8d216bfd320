mod builder;
mod cleaner;
mod cli;
mod error;
mod interrupt;
mod models;
mod process;
mod runner;
mod scaffold;
mod workspace;

#[cfg(test)]
mod testutil;

use std::error::Error as _;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::HarnessError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = cli::run(cli);
    match &result {
        Ok(()) => {}
        Err(HarnessError::Interrupted) => eprintln!("Aborting by user request!"),
        Err(HarnessError::InvalidBuildDirectory(dir)) => {
            eprintln!("ERROR: Invalid build directory: {}", dir.display());
        }
        Err(e) => {
            eprintln!("Unexpected error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
        }
    }
    ExitCode::from(cli::exit_status(&result))
}
