//! Frame loop driver
//!
//! The host calls [`Driver::tick`] once per display frame. A driver starts
//! running and can be stopped exactly once; a stopped driver never ticks again.

use rand_pcg::Pcg32;

use crate::renderer::{Canvas, Paint, Theme};
use crate::settings::Settings;
use crate::sim::random::{RandomSource, seeded};
use crate::sim::{ShowerState, TickInput, TickReport, tick};
use crate::viewport::{PhysicalSize, Viewport};

/// Lifecycle of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Running,
    Stopped,
}

/// Surface for zero-area viewports: the shower keeps simulating unseen
struct Offscreen;

impl Canvas for Offscreen {
    fn clear(&mut self, _width: f32, _height: f32) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _paint: Paint) {}

    fn stroke_ellipse(
        &mut self,
        _cx: f32,
        _cy: f32,
        _rx: f32,
        _ry: f32,
        _line_width: f32,
        _paint: Paint,
    ) {
    }
}

/// Owns the shower state, viewport and random source
#[derive(Debug, Clone)]
pub struct Driver<R: RandomSource = Pcg32> {
    state: ShowerState,
    viewport: Viewport,
    settings: Settings,
    rng: R,
    phase: DriverPhase,
}

impl Driver<Pcg32> {
    /// Driver with a seeded PCG generator
    pub fn with_seed(seed: u64, viewport: Viewport, settings: Settings) -> Self {
        Self::new(viewport, settings, seeded(seed))
    }
}

impl<R: RandomSource> Driver<R> {
    pub fn new(viewport: Viewport, settings: Settings, rng: R) -> Self {
        let viewport = Viewport::new(
            viewport.width(),
            viewport.height(),
            settings.clamp_pixel_ratio(viewport.pixel_ratio()),
        );
        Self {
            state: ShowerState::new(),
            viewport,
            settings,
            rng,
            phase: DriverPhase::Running,
        }
    }

    /// Clear the viewport and advance one step.
    ///
    /// Returns `None` without drawing once the driver is stopped. A zero-area
    /// viewport still advances but issues no draw calls.
    pub fn tick<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        theme: Theme,
    ) -> Option<TickReport> {
        if self.phase == DriverPhase::Stopped {
            return None;
        }

        let input = TickInput {
            spawn_chance: self.settings.effective_spawn_chance(),
            ..TickInput::new(self.viewport.width(), self.viewport.height(), theme.ink())
        };
        let report = if self.viewport.is_empty() {
            tick(&mut self.state, &input, &mut self.rng, &mut Offscreen)
        } else {
            canvas.clear(self.viewport.width(), self.viewport.height());
            tick(&mut self.state, &input, &mut self.rng, canvas)
        };
        if report.impacts > 0 {
            log::trace!(
                "tick {}: {} impact(s), {} debris",
                self.state.time_ticks,
                report.impacts,
                report.debris_created
            );
        }
        Some(report)
    }

    /// New logical size; returns the backing size the host should allocate
    pub fn resize(&mut self, width: f32, height: f32) -> PhysicalSize {
        let size = self.viewport.resize(width, height);
        log::debug!(
            "Viewport resized to {}x{} ({}x{} physical)",
            self.viewport.width(),
            self.viewport.height(),
            size.width,
            size.height
        );
        size
    }

    /// New device pixel ratio, capped by the quality preset
    pub fn set_pixel_ratio(&mut self, device_ratio: f32) -> PhysicalSize {
        self.viewport
            .set_pixel_ratio(self.settings.clamp_pixel_ratio(device_ratio))
    }

    /// Stop ticking for good. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.phase == DriverPhase::Stopped {
            return false;
        }
        self.phase = DriverPhase::Stopped;
        log::info!(
            "Meteor shower stopped after {} ticks ({} impacts)",
            self.state.time_ticks,
            self.state.impacts
        );
        true
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    pub fn state(&self) -> &ShowerState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings. The new pixel ratio cap applies from the next
    /// [`Driver::set_pixel_ratio`] call; [`Driver::resize`] keeps the current ratio.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}
