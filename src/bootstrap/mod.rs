//! Application bootstrap
//!
//! Takes the parsed option map, coerces it into typed parameters, then runs
//! the one-time startup sequence: configure logging, log the received
//! options, load the settings file, load the env file. Logging comes first
//! so that failures in the later steps are observable.
//!
//! Collaborators are injected handles. A collaborator that is absent is
//! skipped with a diagnostic on stderr; a collaborator that is present but
//! fails aborts the bootstrap.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::envfile::{Dotenv, EnvFileLoader};
use crate::logging::{LogLevel, LoggerBackend, LoggerConfig, LoggerGuard, TracingLogger};
use crate::options::{standard_options, OptionKind, OptionSpec, OptionsError, ParsedOptions};
use crate::settings::{IniSettings, Settings, SettingsLoader};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("failed to initialize logging")]
    Logger(#[source] anyhow::Error),

    #[error("failed to load settings from {}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to load env file {}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Check that every mandatory key of `schema` is present in `params`.
///
/// The mandatory set is every non-help schema entry. The check is purely
/// presence-based; an absence marker still counts as present, and values are
/// not inspected.
pub fn validate(params: &ParsedOptions, schema: &[OptionSpec]) -> Result<(), OptionsError> {
    let missing: Vec<String> = schema
        .iter()
        .filter(|spec| spec.kind != OptionKind::Help)
        .filter(|spec| !params.contains(&spec.long))
        .map(|spec| spec.long.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(OptionsError::MissingOptions { missing })
    }
}

/// The typed subset of the option map the bootstrapper runs on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapParameters {
    pub settings_file: PathBuf,
    pub env_file: PathBuf,
    pub log_console: bool,
    pub log_level: LogLevel,
    pub log_info_file: Option<PathBuf>,
    pub log_crit_file: Option<PathBuf>,
}

impl BootstrapParameters {
    /// Validate `params` against the standard schema and coerce the six
    /// mandatory keys into their typed form.
    pub fn from_options(params: &ParsedOptions) -> Result<Self, OptionsError> {
        validate(params, standard_options())?;

        Ok(Self {
            settings_file: PathBuf::from(require_value(params, "settings")?),
            env_file: PathBuf::from(require_value(params, "env")?),
            log_console: parse_bool("log_console", require_value(params, "log_console")?)?,
            log_level: parse_level("log_level", require_value(params, "log_level")?)?,
            log_info_file: params.get("log_info_file").map(PathBuf::from),
            log_crit_file: params.get("log_crit_file").map(PathBuf::from),
        })
    }
}

fn require_value<'a>(params: &'a ParsedOptions, option: &str) -> Result<&'a str, OptionsError> {
    params.get(option).ok_or_else(|| OptionsError::InvalidValue {
        option: option.to_owned(),
        reason: "no value supplied".to_owned(),
    })
}

fn parse_bool(option: &str, value: &str) -> Result<bool, OptionsError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(OptionsError::InvalidValue {
            option: option.to_owned(),
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}

fn parse_level(option: &str, value: &str) -> Result<LogLevel, OptionsError> {
    value
        .parse::<u8>()
        .ok()
        .and_then(LogLevel::from_number)
        .ok_or_else(|| OptionsError::InvalidValue {
            option: option.to_owned(),
            reason: format!("expected one of 10, 20, 30, 40, got {value:?}"),
        })
}

/// Everything `start` produced: the typed parameters, the logger guard that
/// must outlive the application's logging, and the settings snapshot when a
/// settings collaborator was configured.
#[derive(Debug)]
pub struct Bootstrap {
    pub params: BootstrapParameters,
    pub logger: Option<LoggerGuard>,
    pub settings: Option<Settings>,
}

/// Runs the startup sequence with injected collaborators.
pub struct Bootstrapper {
    logger: Option<Box<dyn LoggerBackend>>,
    settings: Option<Box<dyn SettingsLoader>>,
    env_file: Box<dyn EnvFileLoader>,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrapper {
    /// A bootstrapper with the default collaborators: [`TracingLogger`],
    /// [`IniSettings`] and [`Dotenv`].
    pub fn new() -> Self {
        Self {
            logger: Some(Box::new(TracingLogger)),
            settings: Some(Box::new(IniSettings)),
            env_file: Box::new(Dotenv),
        }
    }

    pub fn logger(mut self, backend: impl LoggerBackend + 'static) -> Self {
        self.logger = Some(Box::new(backend));
        self
    }

    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn settings_loader(mut self, loader: impl SettingsLoader + 'static) -> Self {
        self.settings = Some(Box::new(loader));
        self
    }

    pub fn without_settings(mut self) -> Self {
        self.settings = None;
        self
    }

    pub fn env_file_loader(mut self, loader: impl EnvFileLoader + 'static) -> Self {
        self.env_file = Box::new(loader);
        self
    }

    /// The one-time startup sequence.
    ///
    /// Validates and coerces `options`, initializes logging, logs the
    /// received configuration, loads settings, then loads the env file.
    pub fn start(
        &self,
        options: &ParsedOptions,
        app_name: &str,
    ) -> Result<Bootstrap, BootstrapError> {
        let params = BootstrapParameters::from_options(options)?;

        let logger = match &self.logger {
            Some(backend) => {
                let config = LoggerConfig {
                    info_file: params.log_info_file.as_deref(),
                    critical_file: params.log_crit_file.as_deref(),
                    console: params.log_console,
                    level: params.log_level,
                    app_name,
                };
                Some(backend.load_logger(&config).map_err(BootstrapError::Logger)?)
            }
            None => {
                eprintln!("no logger configured, skipping log setup");
                None
            }
        };

        // The received configuration goes into the log before it is acted on.
        info!("given options:");
        info!("--settings={}", params.settings_file.display());
        info!("--env={}", params.env_file.display());
        info!("--log_console={}", params.log_console);
        info!("--log_level={}", params.log_level.as_number());
        info!("--log_info_file={}", display_opt(params.log_info_file.as_deref()));
        info!("--log_crit_file={}", display_opt(params.log_crit_file.as_deref()));

        let settings = match &self.settings {
            Some(loader) => {
                let loaded = loader.load_settings(&params.settings_file).map_err(|source| {
                    BootstrapError::Settings { path: params.settings_file.clone(), source }
                })?;
                Some(loaded)
            }
            None => {
                eprintln!("no settings loader configured, skipping settings load");
                None
            }
        };

        self.env_file
            .load(&params.env_file)
            .map_err(|source| BootstrapError::EnvFile { path: params.env_file.clone(), source })?;

        Ok(Bootstrap { params, logger, settings })
    }
}

fn display_opt(path: Option<&Path>) -> Cow<'_, str> {
    match path {
        Some(path) => path.to_string_lossy(),
        None => Cow::Borrowed("unset"),
    }
}
