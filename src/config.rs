//! User settings for the command-line tool.
//!
//! Settings are read from a JSON file:
//! ```json
//! { "algorithm": "sha512", "rounds": 10000, "salt_len": 16 }
//! ```
//! Every field is optional; command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::registry::Crypt;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Algorithm used when neither a flag nor the settings choose one.
pub const DEFAULT_ALGORITHM: Crypt = Crypt::Sha512;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    algorithm: Option<Crypt>,
    rounds: Option<u32>,
    salt_len: Option<usize>,
}

impl Settings {
    pub fn new(algorithm: Option<Crypt>, rounds: Option<u32>, salt_len: Option<usize>) -> Result<Self> {
        let settings = Self {
            algorithm,
            rounds,
            salt_len,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn algorithm(&self) -> Crypt {
        self.algorithm.unwrap_or(DEFAULT_ALGORITHM)
    }

    pub fn rounds(&self) -> Option<u32> {
        self.rounds
    }

    pub fn salt_len(&self) -> Option<usize> {
        self.salt_len
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == Some(0) {
            bail!("rounds must be >= 1");
        }
        if self.salt_len == Some(0) {
            bail!("salt length must be >= 1");
        }
        Ok(())
    }

    /// Reads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, holds
    /// unknown fields or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_slice(&data)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        settings.validate().context("invalid settings")?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reads settings from `path` if given, otherwise from the default
    /// location if a file exists there.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Platform-specific location of the settings file, if a home directory can
/// be determined.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "unixcrypt").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
