//! Firework Particles - pooled shell/shrapnel simulation
//!
//! Provides a fixed-capacity particle simulation with:
//! - First-dead-slot pool reuse; exhaustion silently drops spawns
//! - Per-tick gravity/friction integration and apex-triggered bursts
//! - Per-particle time-based fades whose completion frees the slot
//! - TOML-loadable tuning constants

pub mod config;
pub mod fade;
pub mod particle;
pub mod rand;
pub mod sim;

use firework_core::Result;
use firework_runtime::RuntimeSystem;

pub use config::{CountRange, FireworkConfig, Range};
pub use fade::{Easing, Fade, FadeAction};
pub use particle::{Particle, ParticlePool, Role, SlotHandle};
pub use sim::{Explosion, FireworkSim};

/// The firework simulation as a system ticked by the player loop.
pub struct FireworkSystem {
    pub sim: FireworkSim,
}

impl FireworkSystem {
    /// Build a system seeded from `seed`, or from OS entropy when `None`
    pub fn new(config: FireworkConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => crate::rand::ParticleRng::new(seed),
            None => crate::rand::ParticleRng::from_entropy(),
        };
        Ok(Self {
            sim: FireworkSim::new(config, rng)?,
        })
    }
}

impl RuntimeSystem for FireworkSystem {
    fn initialize(&mut self) -> Result<()> {
        let config = self.sim.config();
        tracing::info!(
            target: "particles",
            capacity = config.capacity,
            palette = config.palette.len(),
            "Particle pool ready"
        );
        Ok(())
    }

    fn fixed_update(&mut self, dt: f64) -> Result<()> {
        self.sim.update(dt);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        tracing::info!(
            target: "particles",
            active = self.sim.pool().active_count(),
            "Particle system shut down"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
