//! Viewport sizing
//!
//! Entity coordinates are logical (density-independent) pixels. The backing
//! surface is allocated at logical size times the device pixel ratio so thin
//! strokes stay sharp on high-density displays.

use serde::{Deserialize, Serialize};

/// Backing-store size in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Logical drawing area plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
    pixel_ratio: f32,
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            pixel_ratio: sanitize_ratio(pixel_ratio),
        }
    }

    /// Apply a new logical size and return the backing size to allocate
    pub fn resize(&mut self, width: f32, height: f32) -> PhysicalSize {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.physical_size()
    }

    /// Change density (e.g. window moved to another monitor)
    pub fn set_pixel_ratio(&mut self, ratio: f32) -> PhysicalSize {
        self.pixel_ratio = sanitize_ratio(ratio);
        self.physical_size()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Ground line for impacts
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize {
            width: (self.width * self.pixel_ratio).round() as u32,
            height: (self.height * self.pixel_ratio).round() as u32,
        }
    }

    /// Zero-area viewports are valid but draw nothing
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
