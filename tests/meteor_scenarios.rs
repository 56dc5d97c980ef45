//! End-to-end shower scenarios driven through the public API

use glam::Vec2;
use meteor_shower::renderer::{DrawCommand, RecordingCanvas};
use meteor_shower::sim::ScriptedRandom;
use meteor_shower::{Driver, Settings, Theme, Viewport};
use proptest::prelude::*;

/// Forced spawn on the first tick: x=400, y0=-300, v0=10, size=2
fn scripted_driver() -> Driver<ScriptedRandom> {
    let draws = [0.0, 0.5, 0.4, 0.4, 2.0 / 3.0];
    Driver::new(
        Viewport::new(800.0, 600.0, 1.0),
        Settings::default(),
        ScriptedRandom::new(draws, 0.5),
    )
}

#[test]
fn meteor_follows_accelerating_trajectory_then_fans_out() {
    let mut driver = scripted_driver();
    let mut canvas = RecordingCanvas::new();

    for t in 1..=75u32 {
        let report = driver.tick(&mut canvas, Theme::Dark).unwrap();
        assert_eq!(report.impacts, 0, "landed early at tick {t}");
        let body = driver.state().bodies[0];
        let t = t as f32;
        let expected = -300.0 + 10.0 * t + 0.025 * t * (t + 1.0);
        assert!(
            (body.pos.y - expected).abs() < 1e-2,
            "tick {t}: y={} expected {expected}",
            body.pos.y
        );
        assert_eq!(body.pos.x, 400.0);
    }
    assert!(driver.state().bodies[0].pos.y < 600.0);

    let report = driver.tick(&mut canvas, Theme::Dark).unwrap();
    assert_eq!(report.impacts, 1);
    assert_eq!(report.debris_created, 7);

    let state = driver.state();
    assert!(state.bodies.is_empty());
    assert_eq!(state.impacts, 1);
    assert_eq!(state.shockwaves.len(), 1);
    assert_eq!(state.shockwaves[0].pos, Vec2::new(400.0, 600.0));
    assert_eq!(state.debris.len(), 7);
    for debris in &state.debris {
        // Created at the impact point and stepped once in the same tick
        assert_eq!(debris.age, 1);
        assert_eq!(debris.pos.x, 400.0);
        assert!((debris.pos.y - 597.168).abs() < 1e-3);
    }
}

#[test]
fn impact_effects_expire_on_schedule() {
    let mut driver = scripted_driver();
    let mut canvas = RecordingCanvas::new();
    for _ in 0..76 {
        driver.tick(&mut canvas, Theme::Light);
    }
    assert_eq!(driver.state().impacts, 1);

    // Shockwave born on tick 76 fades on its 20th step (tick 95)
    for _ in 77..=94 {
        driver.tick(&mut canvas, Theme::Light);
    }
    assert_eq!(driver.state().shockwaves.len(), 1);
    driver.tick(&mut canvas, Theme::Light);
    assert!(driver.state().shockwaves.is_empty());

    // Debris lasts 50 steps (tick 125)
    for _ in 96..=124 {
        driver.tick(&mut canvas, Theme::Light);
    }
    assert_eq!(driver.state().debris.len(), 7);
    driver.tick(&mut canvas, Theme::Light);
    assert!(driver.state().is_empty());
}

#[test]
fn golden_trace_is_reproducible() {
    let mut a = scripted_driver();
    let mut b = scripted_driver();
    let mut canvas_a = RecordingCanvas::new();
    let mut canvas_b = RecordingCanvas::new();

    for _ in 0..130 {
        a.tick(&mut canvas_a, Theme::Dark);
        b.tick(&mut canvas_b, Theme::Dark);
        assert_eq!(canvas_a.take(), canvas_b.take());
        assert_eq!(
            serde_json::to_string(a.state()).unwrap(),
            serde_json::to_string(b.state()).unwrap()
        );
    }
}

#[test]
fn stopped_driver_stays_silent() {
    let mut driver = scripted_driver();
    let mut canvas = RecordingCanvas::new();
    driver.tick(&mut canvas, Theme::Dark);
    assert!(driver.stop());
    assert!(!driver.stop());

    canvas.commands.clear();
    for _ in 0..10 {
        assert!(driver.tick(&mut canvas, Theme::Dark).is_none());
    }
    assert!(canvas.commands.is_empty());
    assert_eq!(driver.state().time_ticks, 1);
}

#[test]
fn every_frame_starts_with_a_clear() {
    let mut driver = Driver::with_seed(5, Viewport::new(640.0, 360.0, 2.0), Settings::default());
    let mut canvas = RecordingCanvas::new();
    for _ in 0..200 {
        driver.tick(&mut canvas, Theme::Light);
        let frame = canvas.take();
        assert_eq!(
            frame.first(),
            Some(&DrawCommand::Clear {
                width: 640.0,
                height: 360.0
            })
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pools_never_hold_dead_entities(seed in any::<u64>(), height in 50.0f32..900.0) {
        let viewport = Viewport::new(500.0, height, 1.0);
        let mut driver = Driver::with_seed(seed, viewport, Settings::default());
        let mut canvas = RecordingCanvas::new();

        for _ in 0..400 {
            let report = driver.tick(&mut canvas, Theme::Dark).unwrap();
            canvas.commands.clear();
            prop_assert!(report.debris_created >= 4 * report.impacts);
            prop_assert!(report.debris_created <= 9 * report.impacts);

            let state = driver.state();
            prop_assert!(state.bodies.iter().all(|b| b.pos.y < height));
            prop_assert!(state.debris.iter().all(|d| d.life() > 0.0));
            prop_assert!(state.shockwaves.iter().all(|w| w.opacity() > 0.0));
            prop_assert!(state.shockwaves.iter().all(|w| w.pos.y == height));
        }
    }
}
