//! Simulation lifecycle events

use firework_core::{Color, Vec2};

/// Something that happened during a simulation tick or launch
#[derive(Debug, Clone, PartialEq)]
pub enum FireworkEvent {
    /// A shell was placed in pool slot `slot`
    ShellLaunched { slot: usize, position: Vec2 },
    /// A launch was skipped because every pool slot was active
    LaunchDropped { position: Vec2 },
    /// A shell reached its apex and burst
    ShellExploded {
        position: Vec2,
        color: Color,
        /// Shrapnel pieces placed in the pool
        spawned: usize,
        /// Pieces skipped because the pool ran out
        dropped: usize,
    },
}
