use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::{locale::Locale, model::Location, units::UnitPreferences};

/// Top-level configuration stored on disk.
///
/// Read once at startup and written back on every mutation, so unit
/// preferences, locale and the saved location survive restarts. The
/// default location lives here as an injected value rather than a
/// constant buried in the fetch path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Two-letter locale code, e.g. "en" or "de".
    pub locale: String,

    /// Display units, read by every formatting call.
    pub units: UnitPreferences,

    /// Location the user pinned, if any.
    pub location: Option<Location>,

    /// Used until a location is saved.
    pub default_location: Location,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            units: UnitPreferences::default(),
            location: None,
            default_location: Location {
                latitude: 41.89193,
                longitude: 12.51133,
                name: "Rome, Italy".to_string(),
            },
        }
    }
}

impl Config {
    /// The saved location, or the configured default.
    pub fn effective_location(&self) -> &Location {
        self.location.as_ref().unwrap_or(&self.default_location)
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn save_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn clear_location(&mut self) {
        self.location = None;
    }

    /// Locale as a strongly-typed value; unsupported codes fall back.
    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.locale)
    }

    /// Load config from disk, or return the defaults if the file
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, start from the defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
