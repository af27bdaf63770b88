//! Animation speed presets.

use serde::{Deserialize, Serialize};

/// Global playback speed, applied to every frame delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to the real elapsed time before advancing.
    pub fn time_scale(self) -> f64 {
        match self {
            Self::Slow => 0.5,
            Self::Medium => 1.0,
            Self::Fast => 2.0,
        }
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all() {
        let start = AnimationSpeed::Slow;
        assert_eq!(start.next(), AnimationSpeed::Medium);
        assert_eq!(start.next().next(), AnimationSpeed::Fast);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_medium_is_real_time() {
        assert_eq!(AnimationSpeed::default().time_scale(), 1.0);
    }
}
