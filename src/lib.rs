//! Meteor Shower - decorative particle animation for a hero backdrop
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawn policy, physics, entity pools)
//! - `renderer`: 2D drawing primitives and per-entity draw functions
//! - `viewport`: Logical/physical surface sizing
//! - `driver`: Frame loop state machine the host ticks
//! - `platform`: Browser host (canvas, resize listener, animation frames)
//! - `settings`: User-facing configuration

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use driver::{Driver, DriverPhase};
pub use renderer::{Canvas, Ink, Paint, Theme};
pub use settings::{QualityPreset, Settings};
pub use viewport::{PhysicalSize, Viewport};

/// Simulation constants (all units are logical pixels and ticks)
pub mod consts {
    /// Chance per tick of spawning a falling body
    pub const SPAWN_CHANCE: f32 = 0.04;

    /// Falling bodies start this far above the top edge at minimum
    pub const BODY_SPAWN_MIN_HEIGHT: f32 = 100.0;
    /// Additional random spawn height range above the minimum
    pub const BODY_SPAWN_HEIGHT_RANGE: f32 = 500.0;
    pub const BODY_MIN_SPEED: f32 = 8.0;
    pub const BODY_SPEED_RANGE: f32 = 5.0;
    pub const BODY_MIN_SIZE: f32 = 1.0;
    pub const BODY_SIZE_RANGE: f32 = 1.5;
    /// Added to a body's vertical velocity every tick
    pub const BODY_ACCEL: f32 = 0.05;
    /// Trail length per unit of vertical speed
    pub const BODY_TRAIL_PER_SPEED: f32 = 4.0;
    pub const BODY_TRAIL_ALPHA: f32 = 0.4;

    /// Debris per impact: MIN + floor(r * RANGE), so 4..=9
    pub const DEBRIS_MIN_COUNT: u32 = 4;
    pub const DEBRIS_COUNT_RANGE: u32 = 6;
    pub const DEBRIS_MIN_FORCE: f32 = 4.0;
    pub const DEBRIS_FORCE_RANGE: f32 = 8.0;
    pub const DEBRIS_SPREAD_X: f32 = 1.5;
    pub const DEBRIS_LIFT_Y: f32 = 0.8;
    pub const DEBRIS_MIN_SIZE: f32 = 1.0;
    pub const DEBRIS_SIZE_RANGE: f32 = 2.0;
    /// Downward acceleration on debris (pixels/tick²)
    pub const DEBRIS_GRAVITY: f32 = 0.25;
    /// Velocity multiplier per tick (air resistance)
    pub const DEBRIS_DRAG: f32 = 0.96;
    pub const DEBRIS_START_LIFE: f32 = 1.0;
    /// Life lost per tick
    pub const DEBRIS_FADE: f32 = 0.02;
    /// Ticks until life reaches zero (START_LIFE / FADE)
    pub const DEBRIS_LIFETIME_TICKS: u32 = 50;

    pub const SHOCKWAVE_START_RADIUS: f32 = 2.0;
    pub const SHOCKWAVE_GROWTH: f32 = 3.0;
    pub const SHOCKWAVE_START_OPACITY: f32 = 0.8;
    /// Opacity lost per tick
    pub const SHOCKWAVE_FADE: f32 = 0.04;
    /// Ticks until opacity reaches zero (START_OPACITY / FADE)
    pub const SHOCKWAVE_LIFETIME_TICKS: u32 = 20;
    /// Vertical radius as a fraction of horizontal (ground perspective)
    pub const SHOCKWAVE_FLATTEN: f32 = 0.3;
    pub const SHOCKWAVE_LINE_WIDTH: f32 = 1.0;
}
