//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cmdset/cmdset.toml`
//! 3. Explicit config file (e.g. `--config`)
//! 4. Environment variables: `CMDSET_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{SettingsError, SettingsResult};

/// Settings of the `cmdset` binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Log verbosity: 0=warn, 1=info, 2=debug, 3=trace
    pub verbosity: u8,
    /// Default output of generating commands (`-` is standard output)
    pub output: String,
    /// Colored error output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbosity: 0,
            output: "-".into(),
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "not specified".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub verbosity: Option<u8>,
    pub output: Option<String>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for cmdset.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cmdset").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cmdset.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// A missing global config is skipped; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        Ok(current)
    }

    /// Load only defaults and the given file, ignoring global config and environment.
    pub fn from_file(path: &Path) -> SettingsResult<Self> {
        let mut settings = Self::default().merge_with(&load_raw_settings(path)?);
        settings.expand_paths();
        Ok(settings)
    }

    /// Overlay values win where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            verbosity: overlay.verbosity.unwrap_or(self.verbosity),
            output: overlay.output.clone().unwrap_or_else(|| self.output.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Apply CMDSET_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CMDSET").try_parsing(true))
            .build()?;

        if let Ok(val) = config.get::<u8>("verbosity") {
            settings.verbosity = val;
        }
        if let Ok(val) = config.get_string("output") {
            settings.output = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }
        Ok(settings)
    }

    /// Expand `~` and `$VAR` in the output path; `-` is left alone.
    fn expand_paths(&mut self) {
        if self.output != "-" {
            self.output = shellexpand::full(&self.output)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| self.output.clone());
        }
    }
}
