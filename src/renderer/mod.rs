//! 2D rendering module
//!
//! Entities are drawn through the [`Canvas`] trait with a single foreground ink.
//! Backends: the browser 2D context (`platform::web`), a software raster
//! ([`PixelCanvas`]) and a command recorder ([`RecordingCanvas`]).

pub mod raster;
pub mod recorder;
pub mod shapes;

pub use raster::{PixelCanvas, Rgba8};
pub use recorder::{DrawCommand, RecordingCanvas};
pub use shapes::{draw_body, draw_debris, draw_shockwave};

use serde::{Deserialize, Serialize};

/// Page color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    /// Foreground ink: black on light pages, white on dark ones
    pub fn ink(self) -> Ink {
        match self {
            Theme::Light => Ink::BLACK,
            Theme::Dark => Ink::WHITE,
        }
    }

    /// Page background behind the canvas
    pub fn background(self) -> Ink {
        match self {
            Theme::Light => Ink::WHITE,
            Theme::Dark => Ink::BLACK,
        }
    }
}

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ink {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Ink {
    pub const BLACK: Ink = Ink::new(0, 0, 0);
    pub const WHITE: Ink = Ink::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#ffffff`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Ink plus the global alpha it is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub ink: Ink,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub alpha: f32,
}

impl Paint {
    pub fn new(ink: Ink, alpha: f32) -> Self {
        Self {
            ink,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// A drawing surface addressed in logical pixels
pub trait Canvas {
    /// Erase everything inside `(0, 0, width, height)`
    fn clear(&mut self, width: f32, height: f32);

    /// Fill an axis-aligned rectangle. Negative extents are not drawn.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: Paint);

    /// Stroke an axis-aligned ellipse outline centered at `(cx, cy)`
    fn stroke_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        line_width: f32,
        paint: Paint,
    );
}
