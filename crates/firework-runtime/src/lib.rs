//! Firework Runtime - Game loop infrastructure
//!
//! Provides the core loop building blocks:
//! - `GameClock` - continuous clock with a fixed-timestep accumulator for simulation ticks
//! - `InputState` - pointer tracking that turns clicks into launch requests
//! - `FireworkEvent` / `EventBus` - lifecycle event queue drained by the player for logging
//! - `RuntimeSystem` - trait for systems ticked by the loop

mod clock;
mod event;
mod event_bus;
mod input;
mod system;

pub use clock::GameClock;
pub use event::FireworkEvent;
pub use event_bus::EventBus;
pub use input::{InputState, LaunchRequest};
pub use system::RuntimeSystem;
