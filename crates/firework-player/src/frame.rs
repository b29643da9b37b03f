//! Fixed-step simulation and drawing for one redraw

use firework_core::Result;
use firework_particles::FireworkSystem;
use firework_render::{FireworkRenderer, Surface};
use firework_runtime::{GameClock, RuntimeSystem};

/// Run every fixed step the clock has banked, drawing after each one.
///
/// The trail overlay is painted exactly once per simulation tick, so a redraw
/// with no step leaves the surface untouched. Returns the number of steps run.
pub fn run_fixed_steps<S: Surface + ?Sized>(
    clock: &mut GameClock,
    system: &mut FireworkSystem,
    renderer: &FireworkRenderer,
    surface: &mut S,
) -> Result<usize> {
    let mut steps = 0;
    while clock.should_fixed_update() {
        system.fixed_update(clock.fixed_timestep)?;
        renderer.draw_frame(system.sim.pool(), surface);
        clock.consume_fixed_step();
        steps += 1;
    }
    Ok(steps)
}
