//! Command-line entry point
//!
//! Thin wrapper over the library: parse the standard schema from the process
//! arguments, then run the bootstrapper with the default collaborators.
//! Help goes to stdout and exits 0; parse errors exit 2; bootstrap failures
//! exit 1.

use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use crate::bootstrap::Bootstrapper;
use crate::options::{self, OptionsError};

const APP_NAME: &str = "theophanie";

pub fn run() -> ExitCode {
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    run_with_args(args)
}

fn run_with_args(args: Vec<OsString>) -> ExitCode {
    let parsed = match options::parse(args, options::standard_options()) {
        Ok(parsed) => parsed,
        Err(OptionsError::HelpRequested { text }) => {
            println!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match Bootstrapper::new().start(&parsed, APP_NAME) {
        Ok(_bootstrap) => {
            tracing::info!("bootstrap complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{:#}", anyhow::Error::new(err));
            ExitCode::FAILURE
        }
    }
}
