//! Snowflake particles.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Smallest and largest flake size, in pixels.
const MIN_SIZE: u8 = 1;
const MAX_SIZE: u8 = 3;

/// How flake sizes are sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeDistribution {
    /// `max(1, floor(random * 4))`: size 1 comes up twice as often as 2 or 3.
    #[default]
    Legacy,
    /// Each of 1, 2 and 3 with equal probability.
    Uniform,
}

impl SizeDistribution {
    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u8 {
        match self {
            Self::Legacy => ((rng.random::<f64>() * 4.0).floor() as u8).clamp(MIN_SIZE, MAX_SIZE),
            Self::Uniform => rng.random_range(MIN_SIZE..=MAX_SIZE),
        }
    }
}

/// Parameters used whenever a particle is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    /// Lower bound of the fall speed, in pixels per millisecond.
    pub speed_min: f64,
    /// Upper bound (exclusive) of the fall speed.
    pub speed_max: f64,
    /// Fraction of the height, from the top, used for the initial population.
    pub initial_band: f64,
    /// Flake size sampling.
    pub size_distribution: SizeDistribution,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            speed_min: 0.1,
            speed_max: 0.5,
            initial_band: 0.45,
            size_distribution: SizeDistribution::Legacy,
        }
    }
}

impl SpawnParams {
    /// Check that the speed range and spawn band are usable.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.speed_min, self.speed_max);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
            return Err(SimError::InvalidSpeedRange { min, max });
        }
        if !(self.initial_band > 0.0 && self.initial_band <= 1.0) {
            return Err(SimError::InvalidSpawnBand(self.initial_band));
        }
        Ok(())
    }
}

/// A single snowflake.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    x: f64,
    y: f64,
    /// Pixels per millisecond, always > 0.
    speed: f64,
    /// Edge length of the drawn square, in 1..=3.
    size: u8,
}

impl Particle {
    /// Spawn a flake at `(x, y)` with a random speed and size.
    ///
    /// `params` is assumed to have passed [`SpawnParams::validate`].
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64, params: &SpawnParams) -> Self {
        Self {
            x,
            y,
            speed: rng.random_range(params.speed_min..params.speed_max),
            size: params.size_distribution.sample(rng),
        }
    }

    /// Build a flake from explicit state.
    pub fn from_parts(x: f64, y: f64, speed: f64, size: u8) -> Result<Self> {
        if !(speed.is_finite() && speed > 0.0) || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SimError::InvalidParticle { speed, size });
        }
        Ok(Self { x, y, speed, size })
    }

    /// Fall for `delta_ms` milliseconds. No clamping to the visible area.
    pub fn advance(&mut self, delta_ms: f64) {
        self.y += delta_ms * self.speed;
    }

    /// True iff `0 < x < width` and `0 < y < height`.
    pub fn is_visible(&self, width: f64, height: f64) -> bool {
        0.0 < self.x && self.x < width && 0.0 < self.y && self.y < height
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Visual state handed to the renderer.
    pub fn state(&self) -> FlakeState {
        FlakeState {
            x: self.x,
            y: self.y,
            size: self.size,
        }
    }
}

/// What a renderer needs to draw one flake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlakeState {
    pub x: f64,
    pub y: f64,
    pub size: u8,
}
