//! Settings file support.
//!
//! Reads `$HOME/.wayfarer/settings.json` and uses its `env` map as a
//! fallback for environment variables, so credentials can live outside the
//! shell profile. The file is read once per configuration resolution.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

const SETTINGS_DIR: &str = ".wayfarer";
const SETTINGS_FILE: &str = "settings.json";

/// Settings loaded from `$HOME/.wayfarer/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Fallback values for environment variables.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from_path(Self::get_settings_path()?)
    }

    /// Loads settings from the default location, treating any problem as an
    /// empty file.
    ///
    /// An unreadable or malformed file is logged and skipped so that the
    /// process environment alone can still configure the provider.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            warn!(error = %format!("{err:#}"), "Ignoring settings file");
            Self::default()
        })
    }

    /// Loads settings from a specific path.
    ///
    /// A missing file yields empty settings.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "No settings file");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        debug!(path = %path.display(), keys = settings.env.len(), "Loaded settings file");
        Ok(settings)
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Returns an environment variable, falling back to the settings `env` map.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }
}
