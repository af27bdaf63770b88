//! Explicit animation driver.

use std::time::{Duration, Instant};

use log::{info, warn};
use snowfall_core::{AnimationSpeed, Bounds, Simulation};

use crate::frame_source::FrameSource;

/// Owns a simulation and feeds it real frame deltas while running.
#[derive(Debug)]
pub struct Snowfall {
    simulation: Simulation,
    frames: FrameSource,
    speed: AnimationSpeed,
    running: bool,
}

impl Snowfall {
    /// Create a stopped driver.
    pub fn new(simulation: Simulation, frames: FrameSource, speed: AnimationSpeed) -> Self {
        Self {
            simulation,
            frames,
            speed,
            running: false,
        }
    }

    /// Start ticking. The first frame after a (re)start advances by zero.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.frames.reset();
        self.running = true;
        info!(
            "snowfall started: {} flakes, {} frames, {} speed",
            self.simulation.len(),
            self.frames.name(),
            self.speed.name()
        );
    }

    /// Stop ticking. Flakes stay where they are.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!("snowfall stopped");
        }
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time until the next frame, or `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.running.then(|| self.frames.time_until_next(now))
    }

    /// Advance the simulation if running and a frame is due. Returns the
    /// number of recycled flakes when a frame was produced.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if !self.running || !self.frames.is_due(now) {
            return None;
        }
        let delta = self.frames.mark_frame(now) * self.speed.time_scale();
        Some(self.simulation.advance(delta))
    }

    /// Apply a new visible area. Invalid sizes (a minimised terminal) are
    /// ignored and the previous bounds kept.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        match self.simulation.set_bounds(width, height) {
            Ok(()) => true,
            Err(e) => {
                warn!("ignoring resize: {e}");
                false
            }
        }
    }

    /// Switch to the next speed and return it.
    pub fn cycle_speed(&mut self) -> AnimationSpeed {
        self.speed = self.speed.next();
        info!("speed set to {}", self.speed.name());
        self.speed
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    /// Re-seed all flakes near the top.
    pub fn reset(&mut self) {
        self.simulation.reset();
    }

    pub fn bounds(&self) -> Bounds {
        self.simulation.bounds()
    }

    pub fn frame_source(&self) -> &FrameSource {
        &self.frames
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }
}
