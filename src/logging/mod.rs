//! Logging collaborator
//!
//! [`TracingLogger`] wires the tracing-subscriber registry for an
//! application: an optional console layer on stderr, a file layer receiving
//! info level and above, and a second file layer receiving error level and
//! above. File writers are non-blocking; the returned [`LoggerGuard`] must
//! stay alive for the duration of the process or buffered lines are lost.
//!
//! `RUST_LOG` in the environment always takes precedence; the numeric level
//! from the command line is the fallback directive.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Minimal log severity, using the numeric scheme shared by every
/// Theophanie application: a lower level includes everything above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
    Critical,
}

impl LogLevel {
    /// Maps the wire numbers 10/20/30/40; anything else is rejected.
    pub fn from_number(value: u8) -> Option<Self> {
        match value {
            10 => Some(Self::Debug),
            20 => Some(Self::Info),
            30 => Some(Self::Error),
            40 => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_number(self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Error => 30,
            Self::Critical => 40,
        }
    }

    /// The subscriber filter equivalent. Tracing has no level above error,
    /// so `Critical` also maps to `ERROR`.
    pub fn as_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Everything the logging collaborator needs to configure itself.
#[derive(Clone, Copy, Debug)]
pub struct LoggerConfig<'a> {
    pub info_file: Option<&'a Path>,
    pub critical_file: Option<&'a Path>,
    pub console: bool,
    pub level: LogLevel,
    pub app_name: &'a str,
}

/// Keeps the non-blocking file writers alive; dropping it flushes them.
#[derive(Debug)]
pub struct LoggerGuard {
    _workers: Vec<WorkerGuard>,
}

/// The logging collaborator interface consumed by the bootstrapper.
pub trait LoggerBackend {
    fn load_logger(&self, config: &LoggerConfig<'_>) -> Result<LoggerGuard>;
}

/// Default backend: a tracing-subscriber registry. Registration of the
/// global subscriber is first-call-wins; a second `load_logger` keeps the
/// existing subscriber and only opens the requested files.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl LoggerBackend for TracingLogger {
    fn load_logger(&self, config: &LoggerConfig<'_>) -> Result<LoggerGuard> {
        let mut workers = Vec::new();

        let filter = EnvFilter::from_default_env().add_directive(config.level.as_filter().into());

        let console_layer = config.console.then(|| fmt::layer().with_writer(io::stderr));

        let info_layer = match config.info_file {
            Some(path) => {
                let (writer, guard) = file_writer(path)?;
                workers.push(guard);
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer)
                        .with_filter(LevelFilter::INFO),
                )
            }
            None => None,
        };

        let critical_layer = match config.critical_file {
            Some(path) => {
                let (writer, guard) = file_writer(path)?;
                workers.push(guard);
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer)
                        .with_filter(LevelFilter::ERROR),
                )
            }
            None => None,
        };

        let _ = registry()
            .with(filter)
            .with(console_layer)
            .with(info_layer)
            .with(critical_layer)
            .try_init();

        info!(app = config.app_name, "logging configured");
        Ok(LoggerGuard { _workers: workers })
    }
}

/// Open `path` for appending behind a non-blocking writer, creating parent
/// directories as needed.
fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}
