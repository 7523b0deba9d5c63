//! Env-file collaborator
//!
//! Loads `KEY=value` pairs from a dotenv file into the process environment.
//! Variables that are already set are left untouched, and a missing file is
//! not an error: most deployments only ship one in development.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

/// The env-file collaborator interface consumed by the bootstrapper.
pub trait EnvFileLoader {
    fn load(&self, path: &Path) -> Result<()>;
}

/// Default loader backed by dotenvy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dotenv;

impl EnvFileLoader for Dotenv {
    fn load(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            debug!("env file {} not found, nothing to load", path.display());
            return Ok(());
        }
        dotenvy::from_path(path)?;
        Ok(())
    }
}
