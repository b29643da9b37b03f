//! Firework Render - draws the particle pool
//!
//! The per-frame pass paints a translucent overlay and then adds every
//! live particle as a glowing circle onto a [`Surface`]. [`Canvas`] is the
//! CPU implementation; [`PresentPipeline`] puts it on screen through wgpu,
//! and [`Canvas::save_png`] writes it to disk for headless renders.

mod canvas;
mod context;
pub mod present_pipeline;
mod renderer;
mod surface;

pub use canvas::Canvas;
pub use context::{RenderContext, RenderError};
pub use present_pipeline::{PresentPipeline, CANVAS_FORMAT};
pub use renderer::FireworkRenderer;
pub use surface::{BlendMode, Surface};
