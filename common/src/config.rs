//! Display, layout and timing constants.
//!
//! All values are compile-time constants. Groups whose values must keep a
//! relative order carry `const` assertions so a bad edit fails the build.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Rectangular display width in pixels.
pub const RECT_SCREEN_WIDTH: u32 = 144;

/// Rectangular display height in pixels.
pub const RECT_SCREEN_HEIGHT: u32 = 168;

/// Round display diameter in pixels.
pub const ROUND_SCREEN_SIZE: u32 = 180;

// =============================================================================
// Hands
// =============================================================================

/// Seconds-forward orbit inset from the frame, in pixels.
pub const SECONDS_FORWARD_INSET: u32 = 2;

/// Seconds tail inset, as a percentage of the seconds-forward orbit width.
pub const SECONDS_BACKWARD_INSET_PERCENT: u32 = 43;

/// Seconds hand stroke widths.
pub const SECONDS_FORWARD_STROKE: u32 = 1;
pub const SECONDS_BACKWARD_STROKE: u32 = 2;

/// Stroke-style hands: orbit inset divisors (inset = frame width / divisor).
pub const MINUTE_ORBIT_DIVISOR: u32 = 18;
pub const HOUR_ORBIT_DIVISOR: u32 = 7;

/// Stroke-style hands: accent segment inset divisor, relative to the hand orbit.
pub const ACCENT_INSET_DIVISOR: u32 = 5;

/// Stroke-style hands: thin shaft and accent widths.
pub const HAND_SHAFT_STROKE: u32 = 2;
pub const HAND_ACCENT_STROKE: u32 = 9;

/// Polygon-style hands: length as a fraction of the frame width.
pub const MINUTE_LENGTH_FRACTION: (u32, u32) = (4, 9);
pub const HOUR_LENGTH_FRACTION: (u32, u32) = (2, 7);

/// Radius of the pivot dot drawn over the hands.
pub const CENTER_DOT_RADIUS: u32 = 5;

// The hour hand must stay shorter than the minute hand.
const _: () = assert!(HOUR_ORBIT_DIVISOR < MINUTE_ORBIT_DIVISOR);
const _: () = assert!(
    HOUR_LENGTH_FRACTION.0 * MINUTE_LENGTH_FRACTION.1 < MINUTE_LENGTH_FRACTION.0 * HOUR_LENGTH_FRACTION.1
);
const _: () = assert!(SECONDS_BACKWARD_INSET_PERCENT < 50);

// =============================================================================
// Donut Sprite Orbit
// =============================================================================

/// Sprite orbit inset divisor (relative to the seconds-forward orbit width)
/// while the donut rides the seconds hand.
pub const SPRITE_ORBIT_DIVISOR_SECONDS: u32 = 10;

/// Sprite orbit inset divisor while the donut rides the minute hand.
/// Pulls the donut further in so it sits closer to the shorter hand.
pub const SPRITE_ORBIT_DIVISOR_MINUTES: u32 = 5;

const _: () = assert!(SPRITE_ORBIT_DIVISOR_MINUTES < SPRITE_ORBIT_DIVISOR_SECONDS);

// =============================================================================
// Portrait and Eyes
// =============================================================================

/// Portrait size; the portrait is bottom-aligned and horizontally centered.
pub const PORTRAIT_SIZE: Size = Size::new(110, 104);

/// Inset applied to each eye socket before placing the pupil.
pub const EYE_SOCKET_INSET: u32 = 1;

/// Pupil disc radius.
pub const PUPIL_RADIUS: u32 = 3;

/// Eye sockets relative to the portrait, rectangular display.
pub const RECT_RIGHT_EYE: Rectangle = Rectangle::new(Point::new(52, 45), Size::new(35, 32));
pub const RECT_LEFT_EYE: Rectangle = Rectangle::new(Point::new(22, 45), Size::new(32, 29));

/// Eye sockets relative to the portrait, round display.
pub const ROUND_RIGHT_EYE: Rectangle = Rectangle::new(Point::new(53, 49), Size::new(33, 33));
pub const ROUND_LEFT_EYE: Rectangle = Rectangle::new(Point::new(22, 48), Size::new(32, 31));

// Pupils need room to move inside the socket container.
const _: () = assert!(4 * PUPIL_RADIUS + 2 * EYE_SOCKET_INSET < 29);

// =============================================================================
// Intro Animation
// =============================================================================

/// Intro duration of the stroke-hand variant (ease-out).
pub const DONUT_INTRO_DURATION_MS: u32 = 1200;

/// Intro duration of the polygon-hand variant (ease-in).
pub const SPRINKLES_INTRO_DURATION_MS: u32 = 500;

// =============================================================================
// Event Dispatch
// =============================================================================

/// Capacity of the event queue between host callbacks and the watchface.
pub const EVENT_QUEUE_CAPACITY: usize = 8;
