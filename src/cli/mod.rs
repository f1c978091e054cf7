//! Command line interface for glr.
//!
//! Parses arguments, runs the release workflow and turns the outcome into
//! a process exit code.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::{execute_command, execute_release, report};
pub use output::OutputManager;

use crate::config::EnvConfig;
use crate::error::{EXIT_OK, EXIT_PARSE_ERROR};
use clap::error::ErrorKind;

/// Main CLI entry point, returns the process exit code
pub async fn run() -> i32 {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_PARSE_ERROR,
            };
        }
    };

    execute_command(args, &EnvConfig::from_process()).await
}
