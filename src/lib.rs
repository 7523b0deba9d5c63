//! theophanie-utils: startup helpers for Theophanie applications
//!
//! Parses command-line options against a data-driven schema, validates the
//! mandatory configuration keys, initializes logging, loads the ini settings
//! file and the dotenv file. Applications call [`options::parse`] followed by
//! [`Bootstrapper::start`] once at process start; [`environ::get`] reads
//! single environment variables ad hoc afterwards.

pub mod bootstrap;
pub mod cli;
pub mod envfile;
pub mod environ;
pub mod logging;
pub mod options;
pub mod settings;

pub use bootstrap::{Bootstrap, BootstrapError, BootstrapParameters, Bootstrapper};
pub use logging::LogLevel;
pub use options::{parse, standard_options, OptionKind, OptionSpec, OptionsError, ParsedOptions};
pub use settings::Settings;
