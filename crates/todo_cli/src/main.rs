//! Command-line front end for the to-do list.
//!
//! # Responsibility
//! - Parse arguments and environment configuration.
//! - Initialize logging, open the task database, run one command.
//! - Map container errors to a non-zero exit status.

mod cli;
mod config;
mod render;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    if let Err(err) = config::init_logging_from(&args) {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli::run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
