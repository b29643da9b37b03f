//! Firework Player - click to launch fireworks
//!
//! Usage:
//!   firework-player [--config <file.toml>] [--seed <u64>] [--fullscreen]
//!   firework-player render --output out.png [--frames N] [--launch X,Y ...]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use firework_core::Vec2;
use firework_particles::{FireworkConfig, FireworkSystem};
use firework_player::{parse_point, render_headless, HeadlessOptions, PlayerApp, WindowOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "firework-player")]
#[command(about = "Interactive particle fireworks - left click to launch a shell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    sim: SimArgs,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

#[derive(Args)]
struct SimArgs {
    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible bursts (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

impl SimArgs {
    fn load_config(&self) -> Result<FireworkConfig> {
        match &self.config {
            Some(path) => FireworkConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(FireworkConfig::default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate without a window and write the last frame as PNG
    Render {
        /// Output PNG path
        #[arg(long, short)]
        output: PathBuf,

        /// Frames to simulate (60 per second)
        #[arg(long, default_value_t = 120)]
        frames: u32,

        /// Shell launch point as X,Y; repeat for several shells
        #[arg(long = "launch", value_parser = parse_point)]
        launches: Vec<Vec2>,

        #[command(flatten)]
        sim: SimArgs,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Render {
            output,
            frames,
            launches,
            sim,
        }) => run_render(output, frames, launches, sim),
        None => run_player(cli.sim, cli.fullscreen),
    }
}

fn run_player(sim: SimArgs, fullscreen: bool) -> Result<()> {
    let config = sim.load_config()?;
    let fireworks =
        FireworkSystem::new(config, sim.seed).context("Invalid firework configuration")?;

    println!("Controls:");
    println!("  Left click - Launch a shell");
    println!("  Escape     - Exit");
    println!("  F11        - Toggle fullscreen");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let options = WindowOptions {
        width: sim.width,
        height: sim.height,
        fullscreen,
    };
    let mut app = PlayerApp::new(fireworks, options);
    event_loop.run_app(&mut app)?;

    Ok(())
}

fn run_render(output: PathBuf, frames: u32, launches: Vec<Vec2>, sim: SimArgs) -> Result<()> {
    let options = HeadlessOptions {
        width: sim.width,
        height: sim.height,
        frames,
        launches,
        seed: sim.seed,
        config: sim.load_config()?,
    };

    let canvas = render_headless(&options).context("Headless render failed")?;
    canvas
        .save_png(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}
