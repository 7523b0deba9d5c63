//! Environment accessor
//!
//! A thin reader for single process-environment variables with fallback
//! semantics. Reads never fail outward: unset, empty, and unreadable
//! variables all collapse to the supplied default.

use std::env;

use tracing::{debug, warn};

/// Read `name` from the process environment.
///
/// Returns the value when it is present and non-empty, `default` otherwise.
/// Unset and unreadable variables are reported at warning level;
/// present-but-empty values fall back silently.
///
/// Successful reads are written to the debug log verbatim, so avoid routing
/// secrets through this helper when the debug level is enabled.
pub fn get(name: &str, default: Option<&str>) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => {
            debug!("imported value of {name} is {value}");
            Some(value)
        }
        Ok(_) => default.map(str::to_owned),
        Err(env::VarError::NotPresent) => {
            warn!("environment variable {name} is not set");
            default.map(str::to_owned)
        }
        Err(env::VarError::NotUnicode(_)) => {
            warn!("environment variable {name} could not be read");
            default.map(str::to_owned)
        }
    }
}

/// Like [`get`], but with a mandatory fallback.
pub fn get_or(name: &str, default: &str) -> String {
    get(name, Some(default)).unwrap_or_else(|| default.to_owned())
}
