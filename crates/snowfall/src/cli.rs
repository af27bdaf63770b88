//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use snowfall_config::{Config, FrameSourceKind};
use snowfall_core::AnimationSpeed;

#[derive(Debug, Parser)]
#[command(name = "snowfall")]
#[command(about = "Falling snow in your terminal", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Number of flakes
    #[arg(short = 'n', long)]
    pub flakes: Option<usize>,

    /// Animation speed
    #[arg(short, long, value_enum)]
    pub speed: Option<SpeedArg>,

    /// Frame scheduling strategy
    #[arg(long, value_enum)]
    pub frame_source: Option<FrameSourceArg>,

    /// Seed for a reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to the config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Override config values with any flags given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(flakes) = self.flakes {
            config.flakes = flakes;
        }
        if let Some(speed) = self.speed {
            config.speed = speed.into();
        }
        if let Some(frame_source) = self.frame_source {
            config.frame_source = frame_source.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeedArg {
    Slow,
    Medium,
    Fast,
}

impl From<SpeedArg> for AnimationSpeed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => Self::Slow,
            SpeedArg::Medium => Self::Medium,
            SpeedArg::Fast => Self::Fast,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameSourceArg {
    Auto,
    Native,
    Interval,
}

impl From<FrameSourceArg> for FrameSourceKind {
    fn from(arg: FrameSourceArg) -> Self {
        match arg {
            FrameSourceArg::Auto => Self::Auto,
            FrameSourceArg::Native => Self::Native,
            FrameSourceArg::Interval => Self::Interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "snowfall",
            "-n",
            "50",
            "--speed",
            "fast",
            "--frame-source",
            "interval",
            "--seed",
            "9",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.flakes, 50);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert_eq!(config.frame_source, FrameSourceKind::Interval);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["snowfall"]);
        let mut config = Config {
            flakes: 7,
            seed: Some(1),
            ..Default::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.flakes, 7);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
