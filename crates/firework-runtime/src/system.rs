//! Runtime system trait

use firework_core::Result;

/// A system ticked by the player loop at a fixed rate
pub trait RuntimeSystem {
    /// Called once before the first tick
    fn initialize(&mut self) -> Result<()>;

    /// Called at a fixed rate (e.g. 60Hz) for deterministic simulation
    fn fixed_update(&mut self, dt: f64) -> Result<()>;

    /// Called when the player is shutting down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
