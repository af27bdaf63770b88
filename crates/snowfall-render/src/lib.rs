//! Terminal rendering for the snowfall animation.
//!
//! Maps the simulation's pixel space onto a ratatui canvas and paints each
//! flake as a small translucent white square.

mod color;
mod flakes;
mod state;

pub use state::{CELL_HEIGHT_PX, CELL_WIDTH_PX, SnowfallRenderer, viewport_size};
