//! Particle simulation core for the snowfall animation.
//!
//! This crate owns the snowflake state and nothing else: a fixed-size
//! population of [`Particle`]s falling through a rectangular [`Bounds`],
//! advanced by real frame deltas and recycled at the top edge once they
//! leave the visible area. Drawing and frame scheduling live elsewhere.

mod bounds;
mod error;
mod particle;
mod simulation;
mod speed;

pub use bounds::Bounds;
pub use error::SimError;
pub use particle::{FlakeState, Particle, SizeDistribution, SpawnParams};
pub use simulation::{DEFAULT_FLAKES, Simulation};
pub use speed::AnimationSpeed;
