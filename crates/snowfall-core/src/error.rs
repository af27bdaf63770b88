//! Error types for the simulation core.

use thiserror::Error;

/// Validation failures raised while configuring a simulation.
///
/// Steady-state calls (`advance`, `snapshot`) never fail; every variant here
/// comes from construction or reconfiguration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Width or height is zero, negative, NaN or infinite.
    #[error("invalid bounds {width}x{height}: dimensions must be finite and positive")]
    InvalidBounds { width: f64, height: f64 },

    /// Speed range is empty, non-positive or not finite.
    #[error("invalid speed range [{min}, {max}): expected 0 < min < max")]
    InvalidSpeedRange { min: f64, max: f64 },

    /// Initial spawn band is outside (0, 1].
    #[error("invalid initial spawn band {0}: expected a fraction in (0, 1]")]
    InvalidSpawnBand(f64),

    /// Explicit particle state violates the speed or size invariant.
    #[error("invalid particle: speed {speed} must be > 0 and size {size} in 1..=3")]
    InvalidParticle { speed: f64, size: u8 },
}

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
