//! Fixed-size snowflake population.

use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::bounds::Bounds;
use crate::error::Result;
use crate::particle::{FlakeState, Particle, SpawnParams};

/// Population size used when nothing else is configured.
pub const DEFAULT_FLAKES: usize = 300;

/// A fixed population of falling flakes inside a visible area.
///
/// The population length never changes after construction: flakes that
/// leave the visible area are replaced in place by new ones at the top edge.
#[derive(Debug, Clone)]
pub struct Simulation<R = StdRng> {
    bounds: Bounds,
    params: SpawnParams,
    particles: Vec<Particle>,
    rng: R,
}

impl Simulation<StdRng> {
    /// Create a simulation with default spawn parameters and an OS-seeded RNG.
    pub fn new(max: usize, bounds: Bounds) -> Result<Self> {
        Self::with_params(max, bounds, SpawnParams::default())
    }

    /// Create a simulation with an OS-seeded RNG.
    pub fn with_params(max: usize, bounds: Bounds, params: SpawnParams) -> Result<Self> {
        Self::with_rng(max, bounds, params, StdRng::from_os_rng())
    }

    /// Create a reproducible simulation from a fixed seed.
    pub fn seeded(max: usize, bounds: Bounds, params: SpawnParams, seed: u64) -> Result<Self> {
        Self::with_rng(max, bounds, params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation of `max` flakes using the given random source.
    ///
    /// Initial flakes are placed anywhere horizontally and within the top
    /// `params.initial_band` of the height, or on the top edge when that band
    /// is too thin to sample.
    pub fn with_rng(max: usize, bounds: Bounds, params: SpawnParams, rng: R) -> Result<Self> {
        params.validate()?;
        let mut sim = Self {
            bounds,
            params,
            particles: Vec::with_capacity(max),
            rng,
        };
        sim.populate(max);
        Ok(sim)
    }

    fn populate(&mut self, max: usize) {
        let width = self.bounds.width();
        let band = self.bounds.height() * self.params.initial_band;

        self.particles.clear();
        for _ in 0..max {
            let x = self.rng.random_range(0.0..width);
            // The band can underflow to zero for vanishingly small heights.
            let y = if band > 0.0 {
                self.rng.random_range(0.0..band)
            } else {
                0.0
            };
            let flake = Particle::spawn(&mut self.rng, x, y, &self.params);
            self.particles.push(flake);
        }
    }

    /// Re-seed every flake using the initial placement.
    pub fn reset(&mut self) {
        let max = self.particles.len();
        self.populate(max);
        debug!("reset {max} flakes");
    }

    /// Advance every flake by `delta_ms` milliseconds and recycle the ones
    /// that are no longer visible. Returns how many were recycled.
    ///
    /// Negative or non-finite deltas are treated as zero. A zero delta still
    /// recycles flakes left outside the area by a bounds change.
    pub fn advance(&mut self, delta_ms: f64) -> usize {
        let delta = if delta_ms.is_finite() && delta_ms > 0.0 {
            delta_ms
        } else {
            0.0
        };

        let Self {
            bounds,
            params,
            particles,
            rng,
        } = self;
        let (width, height) = (bounds.width(), bounds.height());

        for flake in particles.iter_mut() {
            flake.advance(delta);
        }

        // Replace by index so adjacent invisible flakes are all recycled.
        let mut recycled = 0;
        for slot in particles.iter_mut() {
            if !slot.is_visible(width, height) {
                let x = rng.random_range(0.0..width);
                *slot = Particle::spawn(rng, x, 0.0, params);
                recycled += 1;
            }
        }

        if recycled > 0 {
            trace!("recycled {recycled} flakes after {delta:.1}ms");
        }
        recycled
    }

    /// Change the visible area. Existing flakes keep their positions and are
    /// recycled on the next advance if they fall outside the new area.
    pub fn set_bounds(&mut self, width: f64, height: f64) -> Result<()> {
        self.bounds = Bounds::new(width, height)?;
        debug!("bounds set to {width}x{height}");
        Ok(())
    }

    /// Draw-ready copy of every flake, in population order.
    pub fn snapshot(&self) -> Vec<FlakeState> {
        self.particles.iter().map(Particle::state).collect()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to individual flakes. The population length stays fixed.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
