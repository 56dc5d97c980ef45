//! Per-frame simulation tick
//!
//! Advances every pool by one step and draws each entity right after it moves.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{FallingBody, ShowerState, spawn_impact};
use crate::consts::SPAWN_CHANCE;
use crate::renderer::{Canvas, Ink, draw_body, draw_debris, draw_shockwave};

/// Host-supplied inputs for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Logical viewport width (spawn range)
    pub width: f32,
    /// Logical viewport height (ground line)
    pub height: f32,
    /// Foreground ink for this frame
    pub ink: Ink,
    /// Probability of spawning a body this tick
    pub spawn_chance: f32,
}

impl TickInput {
    pub fn new(width: f32, height: f32, ink: Ink) -> Self {
        Self {
            width,
            height,
            ink,
            spawn_chance: SPAWN_CHANCE,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: bool,
    /// Bodies that reached the ground this tick
    pub impacts: u32,
    /// Debris created by those impacts
    pub debris_created: u32,
}

/// Advance the shower by one step, drawing into `canvas`.
///
/// Pools are processed bodies, then debris, then shockwaves, each oldest
/// first. Debris and shockwaves created by this tick's impacts are stepped in
/// the same tick. The canvas is not cleared here.
pub fn tick<R, C>(
    state: &mut ShowerState,
    input: &TickInput,
    rng: &mut R,
    canvas: &mut C,
) -> TickReport
where
    R: RandomSource + ?Sized,
    C: Canvas + ?Sized,
{
    state.time_ticks += 1;
    let mut report = TickReport::default();

    if rng.next_unit() < input.spawn_chance {
        state.bodies.push(FallingBody::spawn(rng, input.width));
        report.spawned = true;
    }

    let ShowerState {
        bodies,
        debris,
        shockwaves,
        ..
    } = state;
    let ink = input.ink;
    let ground = input.height;

    bodies.retain_mut(|body| {
        body.update();
        draw_body(canvas, body, ink);
        if !body.has_landed(ground) {
            return true;
        }
        let impact = Vec2::new(body.pos.x, ground);
        report.debris_created += spawn_impact(rng, impact, debris, shockwaves);
        report.impacts += 1;
        false
    });

    debris.retain_mut(|particle| {
        particle.update();
        draw_debris(canvas, particle, ink);
        !particle.is_spent()
    });

    shockwaves.retain_mut(|wave| {
        wave.update();
        draw_shockwave(canvas, wave, ink);
        !wave.is_faded()
    });

    state.impacts += report.impacts as u64;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingCanvas};
    use crate::sim::random::{ScriptedRandom, seeded};
    use crate::sim::state::{Debris, Shockwave};

    fn quiet_input() -> TickInput {
        TickInput {
            spawn_chance: 0.0,
            ..TickInput::new(800.0, 600.0, Ink::WHITE)
        }
    }

    #[test]
    fn test_spawn_roll_below_chance_spawns() {
        let mut state = ShowerState::new();
        let mut canvas = RecordingCanvas::new();
        let input = TickInput::new(800.0, 600.0, Ink::BLACK);

        let mut rng = ScriptedRandom::new([0.039, 0.5, 0.5, 0.5, 0.5], 0.5);
        let report = tick(&mut state, &input, &mut rng, &mut canvas);
        assert!(report.spawned);
        assert_eq!(state.bodies.len(), 1);

        let mut rng = ScriptedRandom::new([0.04], 0.5);
        let report = tick(&mut state, &input, &mut rng, &mut canvas);
        assert!(!report.spawned);
        assert_eq!(state.bodies.len(), 1);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_new_body_is_stepped_on_spawn_tick() {
        let mut state = ShowerState::new();
        let mut canvas = RecordingCanvas::new();
        let input = TickInput::new(800.0, 600.0, Ink::BLACK);
        let mut rng = ScriptedRandom::new([0.0, 0.5, 0.4, 0.4, 0.5], 0.9);
        tick(&mut state, &input, &mut rng, &mut canvas);

        let body = state.bodies[0];
        assert!((body.vy - 10.05).abs() < 1e-5);
        assert!((body.pos.y - -289.95).abs() < 1e-3);
        assert_eq!(canvas.commands.len(), 2);
    }

    #[test]
    fn test_landing_removes_body_without_skipping_siblings() {
        let mut state = ShowerState::new();
        state.bodies = vec![
            FallingBody {
                pos: Vec2::new(10.0, 100.0),
                vy: 8.0,
                size: 1.0,
            },
            FallingBody {
                pos: Vec2::new(20.0, 595.0),
                vy: 8.0,
                size: 1.0,
            },
            FallingBody {
                pos: Vec2::new(30.0, 200.0),
                vy: 8.0,
                size: 1.0,
            },
        ];
        let mut canvas = RecordingCanvas::new();
        let mut rng = ScriptedRandom::new([], 0.5);
        let report = tick(&mut state, &quiet_input(), &mut rng, &mut canvas);

        assert_eq!(report.impacts, 1);
        assert_eq!(report.debris_created, 7);
        assert_eq!(state.impacts, 1);
        let xs: Vec<f32> = state.bodies.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, vec![10.0, 30.0]);
        // Every survivor moved exactly once
        assert!((state.bodies[0].pos.y - 108.05).abs() < 1e-3);
        assert!((state.bodies[1].pos.y - 208.05).abs() < 1e-3);

        assert_eq!(state.shockwaves.len(), 1);
        assert_eq!(state.shockwaves[0].pos, Vec2::new(20.0, 600.0));
        assert_eq!(state.shockwaves[0].age, 1);
        assert_eq!(state.debris.len(), 7);
        assert!(state.debris.iter().all(|d| d.age == 1 && d.pos.x == 20.0));
    }

    #[test]
    fn test_draw_order_is_bodies_debris_shockwaves() {
        let mut state = ShowerState::new();
        state.shockwaves.push(Shockwave::new(Vec2::new(1.0, 600.0)));
        state.debris.push(Debris {
            pos: Vec2::new(1.0, 600.0),
            vel: Vec2::ZERO,
            age: 0,
            size: 1.0,
        });
        state.bodies.push(FallingBody {
            pos: Vec2::new(1.0, 0.0),
            vy: 8.0,
            size: 1.0,
        });
        let mut canvas = RecordingCanvas::new();
        let mut rng = ScriptedRandom::new([], 0.5);
        tick(&mut state, &quiet_input(), &mut rng, &mut canvas);

        let kinds: Vec<&str> = canvas
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Clear { .. } => "clear",
                DrawCommand::FillRect { .. } => "rect",
                DrawCommand::StrokeEllipse { .. } => "ellipse",
            })
            .collect();
        assert_eq!(kinds, vec!["rect", "rect", "rect", "ellipse"]);
    }

    #[test]
    fn test_spent_entities_removed_on_final_tick() {
        let mut state = ShowerState::new();
        state.debris.push(Debris {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age: 48,
            size: 1.0,
        });
        state.shockwaves.push(Shockwave {
            pos: Vec2::ZERO,
            age: 18,
        });
        let mut canvas = RecordingCanvas::new();
        let mut rng = ScriptedRandom::new([], 0.5);

        tick(&mut state, &quiet_input(), &mut rng, &mut canvas);
        assert_eq!(state.debris.len(), 1);
        assert_eq!(state.shockwaves.len(), 1);

        canvas.commands.clear();
        tick(&mut state, &quiet_input(), &mut rng, &mut canvas);
        assert!(state.is_empty());
        // Nothing is drawn at zero life/opacity
        assert!(canvas.commands.is_empty());
    }

    #[test]
    fn test_determinism() {
        let input = TickInput::new(640.0, 480.0, Ink::WHITE);
        let mut state1 = ShowerState::new();
        let mut state2 = ShowerState::new();
        let mut rng1 = seeded(7);
        let mut rng2 = seeded(7);
        let mut canvas1 = RecordingCanvas::new();
        let mut canvas2 = RecordingCanvas::new();

        for _ in 0..600 {
            tick(&mut state1, &input, &mut rng1, &mut canvas1);
            tick(&mut state2, &input, &mut rng2, &mut canvas2);
        }

        assert!(state1.impacts > 0);
        assert_eq!(state1.impacts, state2.impacts);
        assert_eq!(state1.bodies, state2.bodies);
        assert_eq!(state1.debris, state2.debris);
        assert_eq!(state1.shockwaves, state2.shockwaves);
        assert_eq!(canvas1.commands, canvas2.commands);
    }
}
