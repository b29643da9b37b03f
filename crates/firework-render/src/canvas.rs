//! CPU raster canvas with source-over and additive compositing

use crate::surface::{BlendMode, Surface};
use firework_core::{Color, FireworkError, Result, Vec2};
use std::path::Path;

/// Opaque RGB float framebuffer, values in [0, 1] (sRGB-encoded like a 2D canvas)
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
    background: Color,
    blend: BlendMode,
}

impl Canvas {
    /// New canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb(background); (width as usize) * (height as usize)],
            background,
            blend: BlendMode::SourceOver,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Pixel at integer coordinates, or None outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Tightly packed RGBA8 bytes, row-major from the top-left
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            bytes.extend_from_slice(&[to_u8(px[0]), to_u8(px[1]), to_u8(px[2]), 255]);
        }
        bytes
    }

    pub fn to_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8()).ok_or_else(|| {
            FireworkError::ImageError(format!(
                "canvas buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }

    /// Encode the canvas as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image()?
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|e| FireworkError::ImageError(e.to_string()))
    }

    fn blend_pixel(&mut self, index: usize, src: [f32; 3], alpha: f32) {
        let dst = &mut self.pixels[index];
        match self.blend {
            BlendMode::SourceOver => {
                for c in 0..3 {
                    dst[c] = src[c] * alpha + dst[c] * (1.0 - alpha);
                }
            }
            BlendMode::Lighter => {
                for c in 0..3 {
                    dst[c] = (dst[c] + src[c] * alpha).min(1.0);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![rgb(self.background); (width as usize) * (height as usize)];
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn fill(&mut self, color: Color) {
        let alpha = color.a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let src = rgb(color);
        for i in 0..self.pixels.len() {
            self.blend_pixel(i, src, alpha);
        }
    }

    /// Antialiased by how far each pixel center sits inside the radius
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let alpha = color.a.clamp(0.0, 1.0);
        if radius <= 0.0 || alpha <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }

        let reach = radius + 0.5;
        let x0 = (center.x - reach).floor().max(0.0);
        let y0 = (center.y - reach).floor().max(0.0);
        let x1 = (center.x + reach).ceil().min(self.width as f32);
        let y1 = (center.y + reach).ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = rgb(color);
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (reach - pixel_center.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let index = (y * self.width + x) as usize;
                    self.blend_pixel(index, src, alpha * coverage);
                }
            }
        }
    }
}

fn rgb(color: Color) -> [f32; 3] {
    [color.r, color.g, color.b]
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
