//! Per-frame firework draw pass: trail overlay, then additive particles

use crate::surface::{BlendMode, Surface};
use firework_core::Color;
use firework_particles::{FireworkConfig, ParticlePool};

/// Draws the particle pool onto a [`Surface`]
#[derive(Debug, Clone, Copy)]
pub struct FireworkRenderer {
    /// Overlay color painted each frame
    pub trail_color: Color,
    /// Overlay opacity; the fraction of last frame erased per frame
    pub trail_alpha: f32,
}

impl Default for FireworkRenderer {
    fn default() -> Self {
        Self::from_config(&FireworkConfig::default())
    }
}

impl FireworkRenderer {
    pub fn new(trail_color: Color, trail_alpha: f32) -> Self {
        Self {
            trail_color,
            trail_alpha,
        }
    }

    pub fn from_config(config: &FireworkConfig) -> Self {
        Self::new(config.trail_color, config.trail_alpha)
    }

    /// Render one frame. Returns how many particles were drawn.
    ///
    /// The overlay darkens what is already there instead of clearing it, so
    /// moving particles leave trails. Dead and fully transparent particles are skipped.
    pub fn draw_frame<S: Surface + ?Sized>(&self, pool: &ParticlePool, surface: &mut S) -> usize {
        surface.set_blend_mode(BlendMode::SourceOver);
        surface.fill(self.trail_color.with_alpha(self.trail_alpha));

        surface.set_blend_mode(BlendMode::Lighter);
        let mut drawn = 0;
        for (_, p) in pool.iter_active() {
            if p.alpha <= 0.0 {
                continue;
            }
            surface.fill_circle(p.position, p.size, p.color.with_alpha(p.color.a * p.alpha));
            drawn += 1;
        }
        drawn
    }
}
