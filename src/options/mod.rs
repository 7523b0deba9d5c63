//! Command-line option parsing
//!
//! A schema of [`OptionSpec`] entries is turned into a clap command at parse
//! time, and the matches are flattened into a [`ParsedOptions`] map covering
//! every schema entry, either from the input or from the entry's default.
//! Help is reported as [`OptionsError::HelpRequested`] carrying the rendered
//! listing; deciding to print it and exit belongs to the binary, not here.

mod schema;

pub use schema::{standard_options, OptionKind, OptionSpec, STANDARD_OPTIONS};

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, Command};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    /// The help option was supplied; `text` is the rendered listing.
    #[error("help requested")]
    HelpRequested { text: String },

    /// A token does not match any schema entry.
    #[error("unrecognized option: {token}")]
    UnrecognizedOption { token: String },

    /// One or more mandatory keys are absent.
    #[error("missing mandatory options: {}", missing.join(", "))]
    MissingOptions { missing: Vec<String> },

    /// A key is present but its value cannot be coerced.
    #[error("invalid value for --{option}: {reason}")]
    InvalidValue { option: String, reason: String },

    /// Any other command-line error surfaced by the parsing primitive.
    #[error("invalid command line: {0}")]
    Parse(#[source] clap::Error),
}

/// Mapping from option long name to value.
///
/// `None` marks an option that was neither supplied nor given a default.
/// Bare switches are stored as `"true"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: BTreeMap<String, Option<String>>,
}

impl ParsedOptions {
    /// Store `name -> value`. Also used to hand-build maps in tests and in
    /// applications that source parameters from somewhere other than the
    /// command line.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    /// The value for `name`, flattening the absence marker to `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|value| value.as_deref())
    }

    /// Whether `name` is a key at all; an absence marker still counts.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse `args` (excluding the program name) against `schema`.
///
/// The result covers every schema entry: supplied options keep their value,
/// the rest fall back to their `default_value`. When an option repeats, the
/// last token wins.
pub fn parse<I, T>(args: I, schema: &[OptionSpec]) -> Result<ParsedOptions, OptionsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(schema).try_get_matches_from(args).map_err(map_clap_error)?;

    let mut options = ParsedOptions::default();
    for spec in schema {
        if spec.kind == OptionKind::Help {
            options.insert(spec.long.clone(), None);
            continue;
        }
        let value = matches
            .get_one::<String>(&spec.long)
            .cloned()
            .or_else(|| spec.default_value.clone());
        options.insert(spec.long.clone(), value);
    }
    Ok(options)
}

fn command(schema: &[OptionSpec]) -> Command {
    let mut cmd = Command::new("theophanie-utils")
        .about("Bootstrap helper for Theophanie applications")
        .no_binary_name(true)
        .disable_help_flag(true);

    for spec in schema {
        let mut arg = Arg::new(spec.long.clone())
            .long(spec.long.clone())
            .help(spec.help_text.clone());
        if let Some(short) = spec.short {
            arg = arg.short(short);
        }
        arg = match spec.kind {
            OptionKind::Help => arg.action(ArgAction::Help),
            OptionKind::Value => {
                arg.action(ArgAction::Set).overrides_with(spec.long.clone())
            }
            OptionKind::Switch => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .overrides_with(spec.long.clone()),
        };
        cmd = cmd.arg(arg);
    }
    cmd
}

fn map_clap_error(err: clap::Error) -> OptionsError {
    match err.kind() {
        ErrorKind::DisplayHelp => OptionsError::HelpRequested { text: err.to_string() },
        ErrorKind::UnknownArgument => {
            let token = err
                .get(ContextKind::InvalidArg)
                .and_then(|value| match value {
                    ContextValue::String(token) => Some(token.clone()),
                    _ => None,
                })
                .unwrap_or_else(|| err.to_string());
            OptionsError::UnrecognizedOption { token }
        }
        _ => OptionsError::Parse(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_standard(args: &[&str]) -> Result<ParsedOptions, OptionsError> {
        parse(args.iter().copied(), standard_options())
    }

    #[test]
    fn test_parse_covers_every_schema_entry() {
        let options = parse_standard(&[]).expect("parse");
        for spec in standard_options() {
            assert!(options.contains(&spec.long), "missing key {}", spec.long);
        }
        assert_eq!(options.len(), standard_options().len());
    }

    #[test]
    fn test_unsupplied_options_take_defaults() {
        let options = parse_standard(&[]).expect("parse");
        assert_eq!(options.get("settings"), Some("conf/settings.ini"));
        assert_eq!(options.get("env"), Some("conf/.env"));
        assert_eq!(options.get("log_console"), Some("true"));
        assert_eq!(options.get("log_level"), Some("20"));
        assert_eq!(options.get("log_info_file"), None);
        assert_eq!(options.get("log_crit_file"), None);
    }

    #[test]
    fn test_parse_equals_form() {
        let options = parse_standard(&["--settings=/tmp/x.ini"]).expect("parse");
        assert_eq!(options.get("settings"), Some("/tmp/x.ini"));
    }

    #[test]
    fn test_parse_space_form() {
        let options = parse_standard(&["--settings", "/tmp/x.ini"]).expect("parse");
        assert_eq!(options.get("settings"), Some("/tmp/x.ini"));
    }

    #[test]
    fn test_bare_switch_stores_true() {
        let options = parse_standard(&["--log_console"]).expect("parse");
        assert_eq!(options.get("log_console"), Some("true"));
    }

    #[test]
    fn test_switch_accepts_explicit_false() {
        let options = parse_standard(&["--log_console=false"]).expect("parse");
        assert_eq!(options.get("log_console"), Some("false"));
    }

    #[test]
    fn test_unrecognized_option_is_an_error() {
        let err = parse_standard(&["--bogus=1"]).expect_err("must fail");
        match err {
            OptionsError::UnrecognizedOption { token } => {
                assert!(token.contains("--bogus"), "token was {token:?}");
            }
            other => panic!("expected UnrecognizedOption, got {other:?}"),
        }
    }

    #[test]
    fn test_help_reports_rendered_listing() {
        let err = parse_standard(&["--help"]).expect_err("help short-circuits");
        match err {
            OptionsError::HelpRequested { text } => {
                assert!(text.contains("--settings"));
                assert!(text.contains("--log_level"));
            }
            other => panic!("expected HelpRequested, got {other:?}"),
        }
    }

    #[test]
    fn test_last_token_wins_on_repeat() {
        let options =
            parse_standard(&["--settings=/tmp/a.ini", "--settings=/tmp/b.ini"]).expect("parse");
        assert_eq!(options.get("settings"), Some("/tmp/b.ini"));
    }

    #[test]
    fn test_short_alias() {
        let schema = vec![
            OptionSpec::help("help", "Print this help"),
            OptionSpec::value("settings", "Settings path").short('s'),
        ];
        let options = parse(["-s", "/tmp/x.ini"], &schema).expect("parse");
        assert_eq!(options.get("settings"), Some("/tmp/x.ini"));
    }

    #[test]
    fn test_custom_schema_defaulting() {
        let schema = vec![
            OptionSpec::value("alpha", "First").default_value("one"),
            OptionSpec::value("beta", "Second"),
        ];
        let options = parse(["--beta=two"], &schema).expect("parse");
        assert_eq!(options.get("alpha"), Some("one"));
        assert_eq!(options.get("beta"), Some("two"));
        assert!(options.contains("beta"));
    }
}
