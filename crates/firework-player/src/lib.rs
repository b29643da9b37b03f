//! Firework Player - interactive firework window and headless renderer
//!
//! This crate provides the `PlayerApp` application handler that turns
//! clicks into shells, and `render_headless` for writing a burst to PNG
//! without a window.

mod frame;
mod headless;
mod player_app;

pub use frame::run_fixed_steps;
pub use headless::{parse_point, render_headless, HeadlessOptions};
pub use player_app::{PlayerApp, WindowOptions};

use firework_runtime::FireworkEvent;

/// Report drained simulation events through `tracing`
pub fn log_events(events: impl IntoIterator<Item = FireworkEvent>) {
    for event in events {
        match event {
            FireworkEvent::ShellLaunched { slot, position } => {
                tracing::debug!(target: "fireworks", slot, x = position.x, y = position.y, "Shell launched");
            }
            FireworkEvent::LaunchDropped { position } => {
                tracing::debug!(target: "fireworks", x = position.x, y = position.y, "Pool full, launch dropped");
            }
            FireworkEvent::ShellExploded {
                position,
                color,
                spawned,
                dropped,
            } => {
                tracing::debug!(
                    target: "fireworks",
                    x = position.x,
                    y = position.y,
                    color = %color.to_hex_string(),
                    spawned,
                    dropped,
                    "Shell exploded"
                );
            }
        }
    }
}
