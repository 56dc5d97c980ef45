//! Software rasterizer
//!
//! An RGBA8 buffer at physical resolution. Drawing coordinates are logical and
//! get multiplied by the pixel ratio; pixels are covered when their center
//! falls inside the shape. Blending is source-over with straight alpha.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use super::{Canvas, Ink, Paint};
use crate::viewport::{PhysicalSize, Viewport};

/// One RGBA8 pixel (straight alpha)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn opaque(ink: Ink) -> Self {
        Self {
            r: ink.r,
            g: ink.g,
            b: ink.b,
            a: 255,
        }
    }

    /// Draw `ink` at `alpha` over this pixel
    pub fn blend(self, ink: Ink, alpha: f32) -> Self {
        let src_a = alpha.clamp(0.0, 1.0);
        let dst_a = self.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| {
            ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a).round() as u8
        };
        Self {
            r: mix(ink.r, self.r),
            g: mix(ink.g, self.g),
            b: mix(ink.b, self.b),
            a: (out_a * 255.0).round() as u8,
        }
    }

    /// Flatten onto an opaque background
    pub fn over(self, background: Ink) -> [u8; 3] {
        let Rgba8 { r, g, b, .. } = Rgba8::opaque(background).blend(
            Ink::new(self.r, self.g, self.b),
            self.a as f32 / 255.0,
        );
        [r, g, b]
    }
}

/// Pixel rows covered by `lo..hi` (physical units), clipped to `0..limit`.
///
/// Shapes thinner than a pixel still cover the pixel they start in.
fn span(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    let mut start = (lo - 0.5).ceil();
    let mut end = (hi - 0.5).ceil();
    if end <= start {
        start = lo.floor();
        end = start + 1.0;
    }
    let clip = |v: f32| v.clamp(0.0, limit as f32) as u32;
    clip(start)..clip(end)
}

/// Canvas backed by an in-memory RGBA8 buffer
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    size: PhysicalSize,
    /// Physical pixels per logical pixel
    scale: f32,
    pixels: Vec<Rgba8>,
}

impl PixelCanvas {
    pub fn new(size: PhysicalSize, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            size,
            scale,
            pixels: vec![Rgba8::TRANSPARENT; size.pixel_count()],
        }
    }

    /// Buffer matching the viewport's backing size and pixel ratio
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self::new(viewport.physical_size(), viewport.pixel_ratio())
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Pixels with any coverage at all
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Binary PPM (P6) of the frame flattened onto `background`
    pub fn to_ppm(&self, background: Ink) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.size.width, self.size.height);
        let mut out = Vec::with_capacity(header.len() + self.pixels.len() * 3);
        out.extend_from_slice(header.as_bytes());
        for pixel in &self.pixels {
            out.extend_from_slice(&pixel.over(background));
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    fn blend_at(&mut self, x: u32, y: u32, paint: Paint) {
        let idx = self.index(x, y);
        if let Some(pixel) = self.pixels.get_mut(idx) {
            *pixel = pixel.blend(paint.ink, paint.alpha);
        }
    }
}

impl Canvas for PixelCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let cols = span(0.0, width * self.scale, self.size.width);
        for y in span(0.0, height * self.scale, self.size.height) {
            for x in cols.clone() {
                let idx = self.index(x, y);
                self.pixels[idx] = Rgba8::TRANSPARENT;
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: Paint) {
        if !(width > 0.0 && height > 0.0) || paint.alpha <= 0.0 {
            return;
        }
        let s = self.scale;
        let cols = span(x * s, (x + width) * s, self.size.width);
        for py in span(y * s, (y + height) * s, self.size.height) {
            for px in cols.clone() {
                self.blend_at(px, py, paint);
            }
        }
    }

    fn stroke_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        line_width: f32,
        paint: Paint,
    ) {
        if !(rx > 0.0 && ry > 0.0) || paint.alpha <= 0.0 {
            return;
        }
        let s = self.scale;
        let (cx, cy, rx, ry) = (cx * s, cy * s, rx * s, ry * s);
        let half = (line_width * s * 0.5).max(0.5);

        let cols = span(cx - rx - half, cx + rx + half, self.size.width);
        for py in span(cy - ry - half, cy + ry + half, self.size.height) {
            for px in cols.clone() {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                // First-order distance to the outline: f / |grad f|
                let f = (dx / rx).powi(2) + (dy / ry).powi(2) - 1.0;
                let grad = 2.0 * ((dx / (rx * rx)).powi(2) + (dy / (ry * ry)).powi(2)).sqrt();
                if grad <= f32::EPSILON {
                    continue;
                }
                if (f / grad).abs() <= half {
                    self.blend_at(px, py, paint);
                }
            }
        }
    }
}
