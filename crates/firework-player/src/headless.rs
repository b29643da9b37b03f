//! Windowless simulation straight to a canvas

use crate::{log_events, run_fixed_steps};
use firework_core::{Color, FireworkError, Result, Vec2};
use firework_particles::{FireworkConfig, FireworkSystem};
use firework_render::{Canvas, FireworkRenderer};
use firework_runtime::{GameClock, RuntimeSystem};

/// Parameters for a headless render
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub width: u32,
    pub height: u32,
    /// Frames to simulate and draw; one fixed tick per frame
    pub frames: u32,
    /// Shells launched before the first frame
    pub launches: Vec<Vec2>,
    pub seed: Option<u64>,
    pub config: FireworkConfig,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 120,
            launches: Vec::new(),
            seed: None,
            config: FireworkConfig::default(),
        }
    }
}

/// Run the simulation for `frames` ticks and return the final canvas
pub fn render_headless(options: &HeadlessOptions) -> Result<Canvas> {
    if options.width == 0 || options.height == 0 {
        return Err(FireworkError::RenderError(format!(
            "canvas size must be non-zero, got {}x{}",
            options.width, options.height
        )));
    }

    let mut system = FireworkSystem::new(options.config.clone(), options.seed)?;
    system.initialize()?;
    let renderer = FireworkRenderer::from_config(system.sim.config());
    let mut canvas = Canvas::new(options.width, options.height, Color::BLACK);
    let mut clock = GameClock::new();

    for &position in &options.launches {
        system.sim.launch(position);
    }

    for _ in 0..options.frames {
        clock.advance(clock.fixed_timestep);
        run_fixed_steps(&mut clock, &mut system, &renderer, &mut canvas)?;
        log_events(system.sim.drain_events());
    }

    tracing::info!(
        target: "headless",
        frames = options.frames,
        active = system.sim.pool().active_count(),
        "Headless render finished"
    );
    system.shutdown()?;
    Ok(canvas)
}

/// Parse an `X,Y` pixel coordinate
pub fn parse_point(s: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("invalid x in '{s}'"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("invalid y in '{s}'"))?;
    Ok(Vec2::new(x, y))
}
