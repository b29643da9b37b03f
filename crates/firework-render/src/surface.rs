//! The 2D raster target the firework renderer draws into

use firework_core::{Color, Vec2};

/// How a fill combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// `dst = src * a + dst * (1 - a)`
    #[default]
    SourceOver,
    /// `dst = dst + src * a`, saturating
    Lighter,
}

/// A canvas-like drawing target with a current blend mode
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Change the pixel size. Existing content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Blend mode used by subsequent fills
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Fill the whole surface with `color` (its alpha is the fill opacity)
    fn fill(&mut self, color: Color);

    /// Fill a circle centered at `center` (pixels)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}
