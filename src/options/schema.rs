//! Option schema definitions
//!
//! The standard schema covers everything the bootstrapper needs. Applications
//! with extra options build their own `Vec<OptionSpec>` and pass it to
//! [`parse`](crate::options::parse); the long names must be unique within a
//! schema.

use once_cell::sync::Lazy;

/// How an option consumes tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// Renders the option listing and stops parsing.
    Help,
    /// Requires an attached value (`--name=value` or `--name value`).
    Value,
    /// Boolean. A bare occurrence means `true`; an explicit value must use
    /// the `=` form (`--name=false`).
    Switch,
}

/// One recognized command-line option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub long: String,
    pub short: Option<char>,
    pub default_value: Option<String>,
    pub help_text: String,
    pub kind: OptionKind,
}

impl OptionSpec {
    fn new(long: impl Into<String>, help_text: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            long: long.into(),
            short: None,
            default_value: None,
            help_text: help_text.into(),
            kind,
        }
    }

    /// A help option; parsing reports the rendered listing instead of a map.
    pub fn help(long: impl Into<String>, help_text: impl Into<String>) -> Self {
        Self::new(long, help_text, OptionKind::Help)
    }

    /// An option that requires an attached value.
    pub fn value(long: impl Into<String>, help_text: impl Into<String>) -> Self {
        Self::new(long, help_text, OptionKind::Value)
    }

    /// A boolean option that may appear bare.
    pub fn switch(long: impl Into<String>, help_text: impl Into<String>) -> Self {
        Self::new(long, help_text, OptionKind::Switch)
    }

    /// Attach a single-character alias.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Value used when the option is absent from the command line.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

pub static STANDARD_OPTIONS: Lazy<Vec<OptionSpec>> = Lazy::new(|| {
    vec![
        OptionSpec::help("help", "Print this help"),
        OptionSpec::value("settings", "Path for the ini settings file, relative or absolute")
            .default_value("conf/settings.ini"),
        OptionSpec::value("env", "Path for the env file if needed, relative or absolute")
            .default_value("conf/.env"),
        OptionSpec::switch("log_console", "Print the logs to the console")
            .default_value("true"),
        OptionSpec::value("log_info_file", "Path for the log file receiving info level and above"),
        OptionSpec::value("log_crit_file", "Path for the log file receiving error level and above"),
        OptionSpec::value(
            "log_level",
            "Minimal log level: 10=debug, 20=info, 30=error, 40=critical",
        )
        .default_value("20"),
    ]
});

/// The schema shared by every Theophanie application.
pub fn standard_options() -> &'static [OptionSpec] {
    &STANDARD_OPTIONS
}
