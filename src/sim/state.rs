//! Shower state and entity types
//!
//! Entities are plain values. They have no ids: pools are only iterated and
//! filtered, never searched.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::consts::*;

/// A meteor falling straight down toward the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingBody {
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub vy: f32,
    /// Stroke width, and the minimum core length
    pub size: f32,
}

impl FallingBody {
    /// Spawn above the top edge at a random x within `width`
    pub fn spawn<R: RandomSource + ?Sized>(rng: &mut R, width: f32) -> Self {
        let x = rng.next_unit() * width;
        let y = -BODY_SPAWN_MIN_HEIGHT - rng.next_unit() * BODY_SPAWN_HEIGHT_RANGE;
        let vy = BODY_MIN_SPEED + rng.next_unit() * BODY_SPEED_RANGE;
        let size = BODY_MIN_SIZE + rng.next_unit() * BODY_SIZE_RANGE;
        Self {
            pos: Vec2::new(x, y),
            vy,
            size,
        }
    }

    pub fn update(&mut self) {
        self.vy += BODY_ACCEL;
        self.pos.y += self.vy;
    }

    /// True once the body has reached or crossed the ground line
    pub fn has_landed(&self, ground_y: f32) -> bool {
        self.pos.y >= ground_y
    }
}

/// A fragment thrown up from an impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks survived so far
    pub age: u32,
    pub size: f32,
}

impl Debris {
    /// Launch from `origin` upward or level, never downward.
    ///
    /// Draws five values per particle: launch angle, force, vx, vy, size. The
    /// angle in `[π, 2π)` only orients the burst; the velocity comes from the
    /// component rolls.
    pub fn burst<R: RandomSource + ?Sized>(rng: &mut R, origin: Vec2) -> Self {
        let _angle = PI + rng.next_unit() * PI;
        let force = DEBRIS_MIN_FORCE + rng.next_unit() * DEBRIS_FORCE_RANGE;
        let vx = (rng.next_unit() - 0.5) * force * DEBRIS_SPREAD_X;
        let vy = -rng.next_unit() * force * DEBRIS_LIFT_Y;
        let size = DEBRIS_MIN_SIZE + rng.next_unit() * DEBRIS_SIZE_RANGE;
        Self {
            pos: origin,
            vel: Vec2::new(vx, vy),
            age: 0,
            size,
        }
    }

    pub fn update(&mut self) {
        self.vel.y += DEBRIS_GRAVITY;
        self.vel *= DEBRIS_DRAG;
        self.pos += self.vel;
        self.age += 1;
    }

    /// Remaining life, 1.0 at birth and 0.0 after the last tick.
    ///
    /// Derived from the age so the fade lands exactly on zero.
    pub fn life(&self) -> f32 {
        let spent = self.age as f32 / DEBRIS_LIFETIME_TICKS as f32;
        DEBRIS_START_LIFE * (1.0 - spent)
    }

    pub fn is_spent(&self) -> bool {
        self.life() <= 0.0
    }
}

/// An expanding ring left on the ground at an impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shockwave {
    pub pos: Vec2,
    pub age: u32,
}

impl Shockwave {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, age: 0 }
    }

    pub fn update(&mut self) {
        self.age += 1;
    }

    /// Horizontal radius
    pub fn radius(&self) -> f32 {
        SHOCKWAVE_START_RADIUS + SHOCKWAVE_GROWTH * self.age as f32
    }

    pub fn opacity(&self) -> f32 {
        let spent = self.age as f32 / SHOCKWAVE_LIFETIME_TICKS as f32;
        SHOCKWAVE_START_OPACITY * (1.0 - spent)
    }

    pub fn is_faded(&self) -> bool {
        self.opacity() <= 0.0
    }
}

/// Fan out one impact: debris plus a single shockwave at `ground_point`.
///
/// Returns the number of debris created (4..=9).
pub fn spawn_impact<R: RandomSource + ?Sized>(
    rng: &mut R,
    ground_point: Vec2,
    debris: &mut Vec<Debris>,
    shockwaves: &mut Vec<Shockwave>,
) -> u32 {
    let roll = rng.next_unit() * DEBRIS_COUNT_RANGE as f32;
    let extra = (roll as u32).min(DEBRIS_COUNT_RANGE - 1);
    let count = DEBRIS_MIN_COUNT + extra;
    debris.extend((0..count).map(|_| Debris::burst(rng, ground_point)));
    shockwaves.push(Shockwave::new(ground_point));
    count
}

/// All live entities, one ordered pool per kind (oldest first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowerState {
    pub bodies: Vec<FallingBody>,
    pub debris: Vec<Debris>,
    pub shockwaves: Vec<Shockwave>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bodies that have reached the ground so far
    pub impacts: u64,
}

impl ShowerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total live entities across all pools
    pub fn entity_count(&self) -> usize {
        self.bodies.len() + self.debris.len() + self.shockwaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }
}
