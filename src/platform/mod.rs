//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, a plain loop natively)
//! - Viewport size and pixel ratio
//! - Theme detection (the page's `dark` class)

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::MeteorShower;
