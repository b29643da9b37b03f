//! Firework Core - Foundational types for the firework simulation
//!
//! This crate provides the core types that all other firework crates depend on:
//! - `Vec2` - Surface-space positions and velocities
//! - `Color` - RGBA colors with `#rrggbb` parsing
//! - Error types and Result alias

mod error;
mod types;

pub use error::{FireworkError, Result};
pub use types::{Color, Vec2};
