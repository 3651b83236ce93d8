//  _  __               ____                __  _
// | |/ /  ___  _   _  / ___| _ __   __ _  / _|| |_   ___  _ __
// | ' /  / _ \| | | || |    | '__| / _` || |_ | __| / _ \| '__|
// | . \ |  __/| |_| || |___ | |   | (_| ||  _|| |_ |  __/| |
// |_|\_\ \___| \__, | \____||_|    \__,_||_|   \__| \___||_|
//              |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Config Tools

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::history::DEFAULT_DISPLAY_LIMIT;
use crate::passgen::{GenerationOptions, LengthBounds};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub min_length: usize,
    pub max_length: usize,
    pub default_length: usize,
    pub history_display: usize,
    pub include_lowercase: bool,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_special: bool,
}

impl Default for Config {
    fn default() -> Self {
        let bounds = LengthBounds::default();
        let options = GenerationOptions::default();
        Self {
            min_length: bounds.min,
            max_length: bounds.max,
            default_length: options.length,
            history_display: DEFAULT_DISPLAY_LIMIT,
            include_lowercase: options.include_lower,
            include_uppercase: options.include_upper,
            include_numbers: options.include_digits,
            include_special: options.include_special,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the user config directory when
    /// `path` is `None`. Only the implicit location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::Invalid("min_length must be at least 1".to_string()));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::Invalid(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        if !self.bounds().contains(self.default_length) {
            return Err(ConfigError::Invalid(format!(
                "default_length {} is outside {}-{}",
                self.default_length, self.min_length, self.max_length
            )));
        }
        if self.history_display == 0 {
            return Err(ConfigError::Invalid("history_display must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn bounds(&self) -> LengthBounds {
        LengthBounds {
            min: self.min_length,
            max: self.max_length,
        }
    }

    /// Initial option state of a session.
    pub fn initial_options(&self) -> GenerationOptions {
        GenerationOptions {
            length: self.default_length,
            include_lower: self.include_lowercase,
            include_upper: self.include_uppercase,
            include_digits: self.include_numbers,
            include_special: self.include_special,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|path| path.join("keycrafter").join("config.json"))
}
