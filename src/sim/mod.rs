//! Deterministic simulation module
//!
//! All meteor shower logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Injected random source only
//! - Stable iteration order (oldest entity first)
//! - Drawing goes through the `Canvas` trait only

pub mod random;
pub mod state;
pub mod tick;

pub use random::{RandomSource, ScriptedRandom};
pub use state::{Debris, FallingBody, ShowerState, Shockwave, spawn_impact};
pub use tick::{TickInput, TickReport, tick};
