//! Configuration file handling for nocturne.
//!
//! The config lives at `<config dir>/nocturne/config.toml`. Every section
//! and field is optional; missing values fall back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::debug;
use nocturne_core::SkyParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "nocturne.log";

/// Errors raised while loading, validating or saving the config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("no home directory to place the config in")]
    NoConfigDir,
}

/// Terminal display and input delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Time between frames in milliseconds.
    pub frame_interval_ms: u64,
    /// Quiet period before a terminal resize is applied.
    pub resize_debounce_ms: u64,
    /// Quiet period before a mouse move is applied.
    pub pointer_throttle_ms: u64,
    /// Virtual pixels per terminal column.
    pub cell_width_px: f64,
    /// Virtual pixels per terminal row.
    pub cell_height_px: f64,
    /// Show the key help line.
    pub show_help: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            resize_debounce_ms: 250,
            pointer_throttle_ms: 16,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            show_help: true,
        }
    }
}

impl DisplayConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn pointer_throttle(&self) -> Duration {
        Duration::from_millis(self.pointer_throttle_ms)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset, e.g. `"warn"` or `"nocturne_sky=debug"`.
    pub level: String,
    /// Log file path. Defaults to the platform cache directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// The full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sky: SkyParams,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "nocturne")
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Default location of the log file.
    pub fn default_log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.cache_dir().join(LOG_FILE))
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a config from TOML text without validating it.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Write to `path`, or the default location when `None`.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoConfigDir)?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Check every value is usable by the sky and the display loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sky = &self.sky;
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(0.0..=1.0).contains(&sky.spawn_probability) {
            return invalid("sky.spawn_probability", "must be between 0 and 1");
        }
        if !(sky.easing > 0.0 && sky.easing <= 1.0) {
            return invalid("sky.easing", "must be greater than 0 and at most 1");
        }
        let finite = [
            ("sky.drift_speed", sky.drift_speed),
            ("sky.parallax_x", sky.parallax_x),
            ("sky.parallax_y", sky.parallax_y),
            ("sky.ambient_depth", sky.ambient_depth),
            ("sky.band_depth", sky.band_depth),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return invalid(field, "must be a finite number");
        }
        if !(sky.hover_radius.is_finite() && sky.hover_radius > 0.0) {
            return invalid("sky.hover_radius", "must be positive");
        }

        let display = &self.display;
        if display.frame_interval_ms == 0 {
            return invalid("display.frame_interval_ms", "must be at least 1");
        }
        for (field, value) in [
            ("display.cell_width_px", display.cell_width_px),
            ("display.cell_height_px", display.cell_height_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "must be positive");
            }
        }
        Ok(())
    }

    /// Log file to write to: the configured one, else the default.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(Self::default_log_path)
    }
}
