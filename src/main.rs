//! Meteor Shower entry point
//!
//! The web build is driven from JavaScript through `MeteorShower::attach`.
//! Natively this runs the shower headless on the software rasterizer.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use clap::{Parser, ValueEnum};
#[cfg(not(target_arch = "wasm32"))]
use meteor_shower::{QualityPreset, Theme};

/// Page color scheme the frame is drawn against
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        Theme::from_dark(arg == ThemeArg::Dark)
    }
}

/// Run the meteor shower headless and optionally dump the last frame.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(
        value_name = "TICKS",
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,
    /// Write the last frame as a binary PPM
    #[arg(value_name = "FRAME.ppm")]
    output: Option<PathBuf>,
    /// Write the last frame as raw row-major RGBA8 bytes
    #[arg(long, value_name = "FILE")]
    rgba: Option<PathBuf>,
    /// RNG seed (defaults to the current time)
    #[arg(long, env = "METEOR_SEED")]
    seed: Option<u64>,
    /// Foreground/background scheme
    #[arg(long, env = "METEOR_THEME", value_enum, ignore_case = true, default_value_t = ThemeArg::Light)]
    theme: ThemeArg,
    /// JSON settings file
    #[arg(long, env = "METEOR_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Quality preset, overrides the settings file
    #[arg(long, env = "METEOR_QUALITY", value_name = "low|medium|high")]
    quality: Option<QualityPreset>,
}

#[cfg(not(target_arch = "wasm32"))]
fn write_frame(path: &Path, bytes: &[u8]) {
    match std::fs::write(path, bytes) {
        Ok(()) => log::info!("Wrote last frame to {}", path.display()),
        Err(e) => log::error!("Cannot write {}: {}", path.display(), e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use meteor_shower::renderer::PixelCanvas;
    use meteor_shower::{Driver, Settings, Viewport};

    env_logger::init();
    let args = Args::parse();

    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load_file)
        .unwrap_or_default();
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    let theme = Theme::from(args.theme);
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!(
        "Meteor Shower (native) starting, seed {}, quality {}",
        seed,
        settings.quality
    );

    let mut driver = Driver::with_seed(seed, Viewport::new(800.0, 600.0, 1.0), settings);
    let mut canvas = PixelCanvas::for_viewport(driver.viewport());

    for _ in 0..args.ticks {
        if driver.tick(&mut canvas, theme).is_none() {
            break;
        }
        let state = driver.state();
        if state.time_ticks % 60 == 0 {
            log::info!(
                "t={} bodies={} debris={} shockwaves={} impacts={}",
                state.time_ticks,
                state.bodies.len(),
                state.debris.len(),
                state.shockwaves.len(),
                state.impacts
            );
        }
    }
    driver.stop();

    if let Some(path) = &args.output {
        write_frame(path, &canvas.to_ppm(theme.background()));
    }
    if let Some(path) = &args.rgba {
        write_frame(path, canvas.as_bytes());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["meteor-shower"]).unwrap();
        assert_eq!(args.ticks, 600);
        assert!(args.output.is_none());
        assert!(args.rgba.is_none());
    }

    #[test]
    fn test_positional_ticks_and_output() {
        let args = Args::try_parse_from([
            "meteor-shower",
            "120",
            "frame.ppm",
            "--theme",
            "DARK",
            "--quality",
            "low",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(args.ticks, 120);
        assert_eq!(args.output, Some(PathBuf::from("frame.ppm")));
        assert_eq!(Theme::from(args.theme), Theme::Dark);
        assert_eq!(args.quality, Some(QualityPreset::Low));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(Args::try_parse_from(["meteor-shower", "abc"]).is_err());
        assert!(Args::try_parse_from(["meteor-shower", "-5"]).is_err());
        assert!(Args::try_parse_from(["meteor-shower", "0"]).is_err());
        assert!(Args::try_parse_from(["meteor-shower", "--quality", "ultra"]).is_err());
        assert!(Args::try_parse_from(["meteor-shower", "--seed", "x"]).is_err());
    }
}
