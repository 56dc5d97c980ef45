//! Per-entity draw functions
//!
//! Each function only reads its entity and writes to the canvas.

use super::{Canvas, Ink, Paint};
use crate::consts::*;
use crate::sim::{Debris, FallingBody, Shockwave};

/// Motion-blur trail behind the body, then an opaque core.
///
/// Both scale with speed, so faster bodies read as longer streaks.
pub fn draw_body<C: Canvas + ?Sized>(canvas: &mut C, body: &FallingBody, ink: Ink) {
    let x = body.pos.x;
    let y = body.pos.y;

    let trail_length = body.vy * BODY_TRAIL_PER_SPEED;
    canvas.fill_rect(
        x,
        y - trail_length,
        body.size,
        trail_length,
        Paint::new(ink, BODY_TRAIL_ALPHA),
    );

    let core_length = body.size.max(body.vy);
    canvas.fill_rect(x, y, body.size, core_length, Paint::new(ink, 1.0));
}

pub fn draw_debris<C: Canvas + ?Sized>(canvas: &mut C, debris: &Debris, ink: Ink) {
    let life = debris.life();
    if life <= 0.0 {
        return;
    }
    canvas.fill_rect(
        debris.pos.x,
        debris.pos.y,
        debris.size,
        debris.size,
        Paint::new(ink, life),
    );
}

/// Flattened ellipse so the ring appears to lie on the ground
pub fn draw_shockwave<C: Canvas + ?Sized>(canvas: &mut C, wave: &Shockwave, ink: Ink) {
    let opacity = wave.opacity();
    if opacity <= 0.0 {
        return;
    }
    let radius = wave.radius();
    canvas.stroke_ellipse(
        wave.pos.x,
        wave.pos.y,
        radius,
        radius * SHOCKWAVE_FLATTEN,
        SHOCKWAVE_LINE_WIDTH,
        Paint::new(ink, opacity),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingCanvas};
    use glam::Vec2;

    #[test]
    fn test_body_trail_and_core() {
        let mut canvas = RecordingCanvas::new();
        let body = FallingBody {
            pos: Vec2::new(100.0, 50.0),
            vy: 10.0,
            size: 2.0,
        };
        draw_body(&mut canvas, &body, Ink::WHITE);

        assert_eq!(
            canvas.commands,
            vec![
                DrawCommand::FillRect {
                    x: 100.0,
                    y: 10.0,
                    width: 2.0,
                    height: 40.0,
                    paint: Paint::new(Ink::WHITE, 0.4),
                },
                DrawCommand::FillRect {
                    x: 100.0,
                    y: 50.0,
                    width: 2.0,
                    height: 10.0,
                    paint: Paint::new(Ink::WHITE, 1.0),
                },
            ]
        );
    }

    #[test]
    fn test_body_core_never_shorter_than_size() {
        let mut canvas = RecordingCanvas::new();
        let body = FallingBody {
            pos: Vec2::ZERO,
            vy: 0.5,
            size: 2.0,
        };
        draw_body(&mut canvas, &body, Ink::BLACK);
        match canvas.commands[1] {
            DrawCommand::FillRect { height, .. } => assert_eq!(height, 2.0),
            ref other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_debris_alpha_follows_life() {
        let mut canvas = RecordingCanvas::new();
        let debris = Debris {
            pos: Vec2::new(3.0, 4.0),
            vel: Vec2::ZERO,
            age: 25,
            size: 1.5,
        };
        draw_debris(&mut canvas, &debris, Ink::BLACK);
        assert_eq!(
            canvas.commands,
            vec![DrawCommand::FillRect {
                x: 3.0,
                y: 4.0,
                width: 1.5,
                height: 1.5,
                paint: Paint::new(Ink::BLACK, 0.5),
            }]
        );

        let spent = Debris { age: 50, ..debris };
        canvas.commands.clear();
        draw_debris(&mut canvas, &spent, Ink::BLACK);
        assert!(canvas.commands.is_empty());
    }

    #[test]
    fn test_shockwave_is_flattened_stroke() {
        let mut canvas = RecordingCanvas::new();
        let wave = Shockwave {
            pos: Vec2::new(200.0, 600.0),
            age: 6,
        };
        draw_shockwave(&mut canvas, &wave, Ink::WHITE);
        match canvas.commands.as_slice() {
            [
                DrawCommand::StrokeEllipse {
                    cx,
                    cy,
                    rx,
                    ry,
                    line_width,
                    paint,
                },
            ] => {
                assert_eq!((*cx, *cy), (200.0, 600.0));
                assert_eq!(*rx, 20.0);
                assert!((*ry - 6.0).abs() < 1e-5);
                assert_eq!(*line_width, 1.0);
                assert!((paint.alpha - 0.56).abs() < 1e-5);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }
}
