// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

//! Desktop simulator for the Sprinkles analog watchface.
//!
//! Drives the platform-agnostic core from `sprinkles-common` the way the watch
//! does: clock ticks, a focus change that starts the intro, animation frames
//! while the intro runs and configuration messages. Frames are rendered into a
//! [`SimulatorDisplay`].
//!
//! # Modes
//!
//! - **Headless** (default): runs on a virtual timeline as fast as possible and
//!   optionally writes every redrawn frame to `--out` as PNG.
//! - **Window** (`--window`, needs the `window` feature): real-time SDL window.
//!
//! # Controls (Window Mode)
//!
//! | Key | Action |
//! |-----|--------|
//! | `S` | Toggle the seconds hand |
//! | `D` | Toggle the date box |
//! | `Q` | Quit |
//!
//! # Examples
//!
//! ```text
//! sprinkles-sim --style donut --start 10:09:15 --duration 3 --out frames
//! sprinkles-sim --set background_color=#FF0000 --set date_enabled=true
//! ```

mod backdrop;
mod clock;
mod timing;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use backdrop::Backdrop;
use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};
use clock::{ClockSource, LocalClock, SimulatedClock, parse_reading};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use sprinkles_common::render::FrameGeometry;
use sprinkles_common::settings::{ConfigEntry, ConfigKey, ConfigValue};
use sprinkles_common::sprite::DONUT;
use sprinkles_common::{
    Configuration,
    ConfigurationStore,
    DrawTargetSurface,
    Event,
    EventKind,
    EventQueue,
    FaceShape,
    RenderStyle,
    TimeReading,
    Watchface,
};
use timing::{DEFAULT_FPS, as_millis, frame_interval};

// =============================================================================
// Command Line
// =============================================================================

/// Face variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// Stroke hands with a red accent
    Donut,
    /// Tapered polygon hands
    Sprinkles,
}

/// Display shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    /// 144x168 rectangular display
    Rect,
    /// 180x180 round display
    Round,
}

impl StyleArg {
    const fn render_style(
        self,
        shape: ShapeArg,
    ) -> RenderStyle {
        let shape = match shape {
            ShapeArg::Rect => FaceShape::Rectangular,
            ShapeArg::Round => FaceShape::Round,
        };
        match self {
            Self::Donut => RenderStyle::donut(shape),
            Self::Sprinkles => RenderStyle::sprinkles(shape),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sprinkles-sim", version, about = "Desktop simulator for the Sprinkles watchface")]
struct Args {
    /// Face variant
    #[arg(long, value_enum, default_value_t = StyleArg::Sprinkles)]
    style: StyleArg,

    /// Display shape
    #[arg(long, value_enum, default_value_t = ShapeArg::Rect)]
    shape: ShapeArg,

    /// Start time as HH:MM:SS (default: local time)
    #[arg(long, value_parser = parse_reading)]
    start: Option<TimeReading>,

    /// Simulated seconds to run in headless mode
    #[arg(long, default_value_t = 5)]
    duration: u64,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Directory for PNG frames (headless mode)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pixel scale of saved frames and the window
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Configuration message entry as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = ConfigEntry::parse)]
    set: Vec<ConfigEntry>,

    /// Flip the seconds hand setting after this many simulated seconds
    #[arg(long, value_name = "SECS")]
    toggle_seconds_at: Option<u64>,

    /// Open a real-time SDL window instead of running headless
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

impl Args {
    fn output_settings(&self) -> OutputSettings { OutputSettingsBuilder::new().scale(self.scale.max(1)).build() }
}

// =============================================================================
// Headless Run
// =============================================================================

/// Outcome of a headless run.
struct RunSummary {
    frames_rendered: u32,
    frames_saved: u32,
    final_settings: Configuration,
    final_time: TimeReading,
    last_geometry: Option<FrameGeometry>,
    // Final framebuffer, inspected by tests.
    #[cfg_attr(not(test), allow(dead_code))]
    display: SimulatorDisplay<Rgb565>,
}

fn enqueue(
    queue: &mut EventQueue,
    event: Event,
) {
    if let Err(rejected) = queue.push(event) {
        eprintln!("event queue full, dropped {:?}", rejected.kind);
    }
}

/// Flip one boolean setting through the store, as a settings message would.
fn toggle_setting(
    store: &mut ConfigurationStore,
    key: ConfigKey,
) -> Result<Configuration> {
    let current = store.current();
    let enabled = match key {
        ConfigKey::DateEnabled => current.date_enabled,
        _ => current.seconds_hand_enabled,
    };
    store.apply(&[ConfigEntry::new(key, ConfigValue::Bool(!enabled))]).with_context(|| format!("toggling {key}"))
}

fn save_frame(
    display: &SimulatorDisplay<Rgb565>,
    settings: &OutputSettings,
    dir: &Path,
    index: u32,
) -> Result<()> {
    let path = dir.join(format!("frame_{index:04}.png"));
    display.to_rgb_output_image(settings).save_png(&path).with_context(|| format!("writing {}", path.display()))
}

/// Run the face on a virtual timeline from `start` for `args.duration` seconds.
fn run_headless(
    args: &Args,
    start: TimeReading,
    store: &mut ConfigurationStore,
    day: u32,
) -> Result<RunSummary> {
    let style = args.style.render_style(args.shape);
    let frame = style.shape.frame();
    let backdrop = Backdrop::new(&style, &frame, day);
    let output_settings = args.output_settings();
    if let Some(dir) = &args.out {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(frame.size);
    let mut face = Watchface::new(style, DONUT, store.current(), start, 0);
    let mut clock = SimulatedClock::new(start);
    let mut queue = EventQueue::new();

    let step = frame_interval(args.fps);
    let total = Duration::from_secs(args.duration);
    let mut toggle_at = args.toggle_seconds_at.map(Duration::from_secs);
    let mut elapsed = Duration::ZERO;
    let mut frames_rendered = 0u32;
    let mut frames_saved = 0u32;
    let mut last_geometry = None;

    enqueue(&mut queue, Event::new(0, EventKind::FocusChanged(true)));

    while elapsed <= total {
        let at_ms = as_millis(elapsed);

        if let Some(reading) = clock.poll(elapsed) {
            enqueue(&mut queue, Event::new(at_ms, EventKind::Tick(reading)));
        }
        if toggle_at.is_some_and(|at| elapsed >= at) {
            toggle_at = None;
            let next = toggle_setting(store, ConfigKey::SecondsHandEnabled)?;
            enqueue(&mut queue, Event::new(at_ms, EventKind::ConfigurationChanged(next)));
        }
        if face.wants_animation_frames() {
            enqueue(&mut queue, Event::new(at_ms, EventKind::AnimationFrame));
        }
        face.drain_queue(&mut queue);

        let geometry = {
            let mut surface = DrawTargetSurface::new(&mut display);
            face.render_with(&mut surface, &frame, |surface, settings| backdrop.draw(surface.target_mut(), settings))
        };
        if geometry.is_some() {
            if let Some(dir) = &args.out {
                save_frame(&display, &output_settings, dir, frames_rendered)?;
                frames_saved += 1;
            }
            frames_rendered += 1;
            last_geometry = geometry;
        }

        face.log_mut().drain(|entry| println!("{entry}"));
        elapsed += step;
    }

    enqueue(&mut queue, Event::new(as_millis(elapsed), EventKind::Unload));
    face.drain_queue(&mut queue);
    face.log_mut().drain(|entry| println!("{entry}"));

    Ok(RunSummary {
        frames_rendered,
        frames_saved,
        final_settings: *face.settings(),
        final_time: face.time(),
        last_geometry,
        display,
    })
}

// =============================================================================
// Window Mode
// =============================================================================

#[cfg(feature = "window")]
fn run_window(
    args: &Args,
    store: &mut ConfigurationStore,
    day: u32,
) -> Result<()> {
    use std::thread;
    use std::time::Instant;

    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{SimulatorEvent, Window};

    let style = args.style.render_style(args.shape);
    let frame = style.shape.frame();
    let backdrop = Backdrop::new(&style, &frame, day);

    let mut clock: Box<dyn ClockSource> = match args.start {
        Some(start) => Box::new(SimulatedClock::new(start)),
        None => Box::new(LocalClock::new()),
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(frame.size);
    let mut window = Window::new("Sprinkles", &args.output_settings());
    let mut face = Watchface::new(style, DONUT, store.current(), clock.reading(), 0);
    let mut queue = EventQueue::new();
    let frame_time = frame_interval(args.fps);
    let started = Instant::now();

    enqueue(&mut queue, Event::new(0, EventKind::FocusChanged(true)));

    'running: loop {
        let frame_start = Instant::now();
        let elapsed = started.elapsed();
        let at_ms = as_millis(elapsed);

        if let Some(reading) = clock.poll(elapsed) {
            enqueue(&mut queue, Event::new(at_ms, EventKind::Tick(reading)));
        }
        if face.wants_animation_frames() {
            enqueue(&mut queue, Event::new(at_ms, EventKind::AnimationFrame));
        }
        face.drain_queue(&mut queue);

        {
            let mut surface = DrawTargetSurface::new(&mut display);
            face.render_with(&mut surface, &frame, |surface, settings| backdrop.draw(surface.target_mut(), settings));
        }
        face.log_mut().drain(|entry| println!("{entry}"));
        window.update(&display);

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    let key = match keycode {
                        Keycode::S => ConfigKey::SecondsHandEnabled,
                        Keycode::D => ConfigKey::DateEnabled,
                        Keycode::Q => break 'running,
                        _ => continue,
                    };
                    let next = toggle_setting(store, key)?;
                    enqueue(&mut queue, Event::new(at_ms, EventKind::ConfigurationChanged(next)));
                }
                _ => {}
            }
        }

        // Cap frame rate
        let frame_elapsed = frame_start.elapsed();
        if frame_elapsed < frame_time {
            thread::sleep(frame_time - frame_elapsed);
        }
    }

    enqueue(&mut queue, Event::new(as_millis(started.elapsed()), EventKind::Unload));
    face.drain_queue(&mut queue);
    face.log_mut().drain(|entry| println!("{entry}"));
    Ok(())
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let mut store = ConfigurationStore::new(Configuration::default());
    store.apply(&args.set).context("rejected --set configuration")?;
    let day = Local::now().day();

    #[cfg(feature = "window")]
    if args.window {
        return run_window(&args, &mut store, day);
    }

    let start = args.start.unwrap_or_else(|| LocalClock::new().reading());
    let summary = run_headless(&args, start, &mut store, day)?;
    if let Some(geometry) = summary.last_geometry {
        println!("donut at ({}, {})", geometry.sprite_center.x, geometry.sprite_center.y);
    }
    println!(
        "rendered {} frames ({} saved), ended at {:02}:{:02}:{:02}, seconds hand {}",
        summary.frames_rendered,
        summary.frames_saved,
        summary.final_time.hours,
        summary.final_time.minutes,
        summary.final_time.seconds,
        if summary.final_settings.seconds_hand_enabled { "on" } else { "off" },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;
    use sprinkles_common::colors::{OUTLINE_BROWN, SKY_BLUE};

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["sprinkles-sim"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    fn run(args: &Args) -> RunSummary {
        let mut store = ConfigurationStore::new(Configuration::default());
        store.apply(&args.set).expect("entries should apply");
        let start = args.start.expect("tests pass --start");
        run_headless(args, start, &mut store, 17).expect("headless run should succeed")
    }

    #[test]
    fn test_args_defaults_and_values() {
        let parsed = args(&[]);
        assert_eq!(parsed.style, StyleArg::Sprinkles);
        assert_eq!(parsed.shape, ShapeArg::Rect);
        assert_eq!(parsed.fps, DEFAULT_FPS);
        assert!(parsed.start.is_none());

        let parsed = args(&[
            "--style",
            "donut",
            "--shape",
            "round",
            "--start",
            "10:09:15",
            "--set",
            "date_enabled=true",
            "--set",
            "background_color=#FF0000",
        ]);
        assert_eq!(parsed.style, StyleArg::Donut);
        assert_eq!(parsed.shape, ShapeArg::Round);
        assert_eq!(parsed.start, Some(TimeReading::new(10, 9, 15)));
        assert_eq!(parsed.set.len(), 2);
        assert_eq!(parsed.set[0], ConfigEntry::new(ConfigKey::DateEnabled, ConfigValue::Bool(true)));
    }

    #[test]
    fn test_args_reject_bad_input() {
        for bad in [
            ["--start", "24:00:00"],
            ["--set", "colour=1"],
            ["--set", "background_color"],
            ["--style", "bagel"],
        ] {
            let mut argv = vec!["sprinkles-sim"];
            argv.extend_from_slice(&bad);
            assert!(Args::try_parse_from(argv).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_headless_end_to_end_pixels() {
        let summary = run(&args(&["--style", "donut", "--start", "10:09:13", "--duration", "2", "--fps", "10"]));

        assert_eq!(summary.final_time, TimeReading::new(10, 9, 15));
        assert_eq!(summary.frames_saved, 0, "no --out, nothing saved");
        let geometry = summary.last_geometry.expect("frames were drawn");
        assert_eq!(summary.display.get_pixel(Point::new(0, 0)), SKY_BLUE, "corner shows the background");

        let outline = geometry.sprite_rect.top_left + Point::new(6, 4);
        assert_eq!(summary.display.get_pixel(outline), OUTLINE_BROWN, "donut outline at {outline:?}");
    }

    #[test]
    fn test_headless_renders_only_when_dirty() {
        // One frame at load, intro frames while it runs, one per tick after.
        let summary = run(&args(&["--start", "08:00:00", "--duration", "3", "--fps", "20"]));
        let intro_frames = RenderStyle::sprinkles(FaceShape::Rectangular).intro_duration_ms / 50 + 1;
        assert!(summary.frames_rendered >= 3, "every tick redraws");
        assert!(
            summary.frames_rendered <= 1 + intro_frames + 3,
            "idle frames must not redraw, got {}",
            summary.frames_rendered
        );
    }

    #[test]
    fn test_headless_toggle_seconds() {
        let summary = run(&args(&["--start", "12:00:00", "--duration", "2", "--toggle-seconds-at", "1"]));
        assert!(!summary.final_settings.seconds_hand_enabled, "toggle should switch the seconds hand off");
        let geometry = summary.last_geometry.expect("frames were drawn");
        assert!(geometry.seconds_hand.is_none());
    }

    #[test]
    fn test_headless_applies_set_entries() {
        let summary = run(&args(&["--start", "06:30:00", "--duration", "1", "--set", "background_color=#FF0000"]));
        assert_eq!(summary.final_settings.background_color, Rgb565::RED);
        assert_eq!(summary.display.get_pixel(Point::new(0, 0)), Rgb565::RED);
    }

    #[test]
    fn test_headless_writes_png_frames() {
        let dir = std::env::temp_dir().join(format!("sprinkles-sim-test-{}", std::process::id()));
        let out = dir.to_string_lossy().into_owned();
        let summary = run(&args(&["--start", "00:00:00", "--duration", "1", "--fps", "5", "--out", &out]));

        assert_eq!(summary.frames_saved, summary.frames_rendered);
        assert!(dir.join("frame_0000.png").is_file());
        std::fs::remove_dir_all(&dir).ok();
    }
}
