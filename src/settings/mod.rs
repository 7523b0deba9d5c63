//! Settings collaborator
//!
//! Applications keep their durable configuration in an ini file
//! (`conf/settings.ini` by default). [`IniSettings`] parses it into a
//! [`Settings`] snapshot with typed getters; the bootstrapper only triggers
//! the load and hands the snapshot back to the application.

use std::path::Path;

use anyhow::Result;
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

/// The settings collaborator interface consumed by the bootstrapper.
pub trait SettingsLoader {
    fn load_settings(&self, path: &Path) -> Result<Settings>;
}

/// Immutable snapshot of a parsed settings file.
///
/// Keys are addressed `section.key`.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    inner: Config,
}

impl Settings {
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.inner.get_string(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.inner.get_int(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        self.inner.get_bool(key)
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        self.inner.get_float(key)
    }

    /// Deserialize the value at `key` into any `Deserialize` type.
    pub fn get<'de, T: Deserialize<'de>>(&self, key: &str) -> Result<T, ConfigError> {
        self.inner.get(key)
    }
}

/// Default loader for ini settings files. The file must exist; a bad path
/// here is a deployment error the caller needs to see.
#[derive(Clone, Copy, Debug, Default)]
pub struct IniSettings;

impl SettingsLoader for IniSettings {
    fn load_settings(&self, path: &Path) -> Result<Settings> {
        let inner = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()?;
        Ok(Settings { inner })
    }
}
