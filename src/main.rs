//! theophanie-utils: bootstrap a Theophanie application from the command line
//!
//! Parses the standard option schema, initializes logging, loads the ini
//! settings file and the dotenv file, then exits.

use std::process::ExitCode;

use theophanie_utils::cli;

fn main() -> ExitCode {
    cli::run()
}
