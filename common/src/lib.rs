//! Core of the Sprinkles analog watchface.
//!
//! This crate contains the platform-agnostic part of the watchface, shared
//! between the desktop simulator and device builds:
//!
//! - [`angle`]: Time-of-day to hand/sprite angle conversion
//! - [`geometry`]: Orbit insets and polar projection onto orbits
//! - [`animations`]: Intro animation controller and interpolation
//! - [`gaze`]: Pupil direction toward the donut
//! - [`render`]: Frame renderer, render styles and dirty-layer tracking
//! - [`surface`]: Drawing surface port and the embedded-graphics adapter
//! - [`settings`]: Configuration snapshot, defaults and inbound messages
//! - [`events`]: Event dispatch and the watchface context object
//! - [`log_buffer`]: Levelled ring-buffer log
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. It never reads a clock itself;
//! every event carries a host-supplied millisecond timestamp.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
pub mod log_buffer;

pub mod angle;
pub mod animations;
pub mod colors;
pub mod config;
pub mod events;
pub mod gaze;
pub mod geometry;
pub mod render;
pub mod settings;
pub mod sprite;
pub mod surface;
pub mod time;

// Re-export commonly used items
pub use angle::{Angle, HandAngles, TRIG_MAX_ANGLE};
pub use animations::{AnimationCurve, AnimationProgress, IntroAnimation};
pub use events::{Event, EventKind, EventQueue, Watchface};
pub use render::{DirtyLayers, FaceShape, FrameRenderer, HandStyle, RenderStyle};
pub use settings::{Configuration, ConfigurationStore, SpriteFollows};
pub use surface::{Bitmap, CompositingMode, DrawTargetSurface, Surface};
pub use time::TimeReading;
