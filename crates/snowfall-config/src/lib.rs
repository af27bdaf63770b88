//! Configuration for the snowfall animation.
//!
//! Settings live in `config.toml` inside the platform configuration
//! directory. Every key is optional; a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use snowfall_core::{AnimationSpeed, DEFAULT_FLAKES, SimError, SpawnParams};
use thiserror::Error;

/// File name inside the configuration directory.
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Simulation(#[from] SimError),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How frames are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameSourceKind {
    /// Pick the best source the terminal supports.
    #[default]
    Auto,
    /// Frames paced at the display refresh budget.
    Native,
    /// Fixed-interval timer.
    Interval,
}

/// Glyph set used to paint flakes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    #[default]
    Braille,
    Dot,
    Block,
    HalfBlock,
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of flakes.
    pub flakes: usize,
    /// Playback speed.
    pub speed: AnimationSpeed,
    /// Frame scheduling strategy.
    pub frame_source: FrameSourceKind,
    /// Target frame time for native pacing, in milliseconds.
    pub frame_budget_ms: u64,
    /// Period of the interval timer, in milliseconds.
    pub interval_ms: u64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Background colour as RGB.
    pub background: [u8; 3],
    /// Glyph set for flakes.
    pub marker: MarkerKind,
    /// Flake spawn parameters.
    pub spawn: SpawnParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flakes: DEFAULT_FLAKES,
            speed: AnimationSpeed::default(),
            frame_source: FrameSourceKind::default(),
            frame_budget_ms: 16,
            interval_ms: 70,
            seed: None,
            background: [0, 0, 0],
            marker: MarkerKind::default(),
            spawn: SpawnParams::default(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "snowfall").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("loading config from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse and validate TOML.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<()> {
        self.spawn.validate()?;
        if self.frame_budget_ms == 0 {
            return Err(ConfigError::ZeroDuration("frame_budget_ms"));
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("interval_ms"));
        }
        Ok(())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        debug!("saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use snowfall_core::SizeDistribution;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.flakes, 300);
        assert_eq!(config.interval_ms, 70);
        assert_eq!(config.frame_source, FrameSourceKind::Auto);
        assert_eq!(config.spawn.size_distribution, SizeDistribution::Legacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            flakes = 42
            speed = "fast"
            frame_source = "interval"
            marker = "half-block"

            [spawn]
            size_distribution = "uniform"
            "#,
        )
        .unwrap();
        assert_eq!(config.flakes, 42);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert_eq!(config.frame_source, FrameSourceKind::Interval);
        assert_eq!(config.marker, MarkerKind::HalfBlock);
        assert_eq!(config.spawn.size_distribution, SizeDistribution::Uniform);
        assert_eq!(config.spawn.speed_min, 0.1);
        assert_eq!(config.interval_ms, 70);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::parse("flakes = -1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::parse("interval_ms = 0"),
            Err(ConfigError::ZeroDuration("interval_ms"))
        ));
        assert!(matches!(
            Config::parse("[spawn]\nspeed_min = 0.9\nspeed_max = 0.1"),
            Err(ConfigError::Simulation(SimError::InvalidSpeedRange { .. }))
        ));
        assert!(matches!(
            Config::parse("speed = \"ludicrous\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            flakes: 12,
            seed: Some(7),
            speed: AnimationSpeed::Slow,
            background: [10, 20, 30],
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
