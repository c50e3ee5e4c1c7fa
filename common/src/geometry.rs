//! Orbit geometry: nested inset rectangles and polar projection onto them.
//!
//! An *orbit* is a rectangle derived from the drawable frame by shrinking it
//! on every side. Hands, the donut and the pupils are placed by projecting an
//! [`Angle`] onto the oval inscribed in an orbit.
//!
//! # Conventions
//!
//! - Angle 0 is 12 o'clock, angles grow clockwise (screen y grows downward).
//! - The oval of a `w x h` orbit at `(x, y)` is centered on
//!   `(x + (w - 1) / 2, y + (h - 1) / 2)` with radii `(w - 1) / 2` and
//!   `(h - 1) / 2`, so the cardinal points land on the orbit's edge pixels.
//! - Orbits are never allowed to invert: an inset that would leave a
//!   non-positive width or height panics instead of wrapping.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use micromath::F32Ext;

use crate::angle::{Angle, round_to_i32};

// =============================================================================
// Insets
// =============================================================================

/// Margin applied to each side of a rectangle.
///
/// Relative variants are resolved against a reference width chosen by the
/// call site (usually the rectangle being inset).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inset {
    /// Absolute margin in pixels.
    Pixels(u32),
    /// `reference_width / divisor`.
    WidthFraction(u32),
    /// `reference_width * percent / 100`.
    WidthPercent(u32),
}

impl Inset {
    /// Margin in pixels for the given reference width.
    pub const fn resolve(
        self,
        reference_width: u32,
    ) -> u32 {
        match self {
            Self::Pixels(px) => px,
            Self::WidthFraction(divisor) => reference_width / divisor,
            Self::WidthPercent(percent) => reference_width * percent / 100,
        }
    }
}

/// Shrink `rect` by `margin` pixels on every side.
///
/// # Panics
/// If the margin would leave a zero or negative width or height.
pub fn inset(
    rect: Rectangle,
    margin: u32,
) -> Rectangle {
    let span = margin.saturating_mul(2);
    assert!(
        span < rect.size.width && span < rect.size.height,
        "inset would invert the orbit rectangle"
    );
    let m = margin as i32;
    Rectangle::new(
        rect.top_left + Point::new(m, m),
        Size::new(rect.size.width - span, rect.size.height - span),
    )
}

/// Shrink `rect` by an [`Inset`] resolved against its own width.
pub fn inset_by(
    rect: Rectangle,
    amount: Inset,
) -> Rectangle {
    inset(rect, amount.resolve(rect.size.width))
}

/// Reject frames the renderer cannot lay out.
///
/// # Panics
/// If the frame has a zero width or height.
pub fn assert_frame(frame: &Rectangle) {
    assert!(
        frame.size.width > 0 && frame.size.height > 0,
        "frame must have a positive size"
    );
}

/// Center pixel of a rectangle, rounding toward the bottom-right for even sizes.
#[inline]
pub fn center_point(rect: &Rectangle) -> Point { rect.top_left + rect.size / 2 }

// =============================================================================
// Polar Projection
// =============================================================================

/// How the projection oval is fitted into an orbit rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OvalScaleMode {
    /// Largest circle centered in the orbit.
    FitCircle,
    /// Ellipse touching all four sides of the orbit.
    #[default]
    FitEllipse,
}

/// Center and radii of the projection oval.
fn oval(
    orbit: &Rectangle,
    mode: OvalScaleMode,
) -> (f32, f32, f32, f32) {
    let w = orbit.size.width.max(1) as f32 - 1.0;
    let h = orbit.size.height.max(1) as f32 - 1.0;
    let cx = orbit.top_left.x as f32 + w / 2.0;
    let cy = orbit.top_left.y as f32 + h / 2.0;
    match mode {
        OvalScaleMode::FitEllipse => (cx, cy, w / 2.0, h / 2.0),
        OvalScaleMode::FitCircle => {
            let r = w.min(h) / 2.0;
            (cx, cy, r, r)
        }
    }
}

/// Project `angle` onto the ellipse inscribed in `orbit`.
pub fn point_on_orbit(
    orbit: &Rectangle,
    angle: Angle,
) -> Point {
    point_on_orbit_with(orbit, OvalScaleMode::FitEllipse, angle)
}

/// Project `angle` onto the oval of `orbit` fitted with `mode`.
pub fn point_on_orbit_with(
    orbit: &Rectangle,
    mode: OvalScaleMode,
    angle: Angle,
) -> Point {
    let (cx, cy, rx, ry) = oval(orbit, mode);
    let (sin, cos) = angle.sin_cos();
    let x = cx + rx * sin;
    let y = cy - ry * cos;
    Point::new(round_to_i32(x), round_to_i32(y))
}

/// Rectangle of `size` whose [`center_point`] is the projection of `angle`.
pub fn centered_rect_on_orbit(
    orbit: &Rectangle,
    mode: OvalScaleMode,
    angle: Angle,
    size: Size,
) -> Rectangle {
    let center = point_on_orbit_with(orbit, mode, angle);
    Rectangle::new(center - size / 2, size)
}

/// Rotate `point` about the origin by `angle` (clockwise on screen).
pub fn rotate_point(
    point: Point,
    angle: Angle,
) -> Point {
    let (sin, cos) = angle.sin_cos();
    let x = point.x as f32;
    let y = point.y as f32;
    Point::new(round_to_i32(x * cos - y * sin), round_to_i32(x * sin + y * cos))
}

/// Screen-space direction from `from` to `to`: 0 = +x, clockwise.
pub fn angle_between(
    from: Point,
    to: Point,
) -> Angle {
    let delta = to - from;
    // Axis-aligned directions are exact; the approximate atan2 can be off by a unit
    match (delta.x.signum(), delta.y.signum()) {
        (0, 0) | (1, 0) => Angle::ZERO,
        (0, 1) => Angle::QUARTER_TURN,
        (-1, 0) => Angle::HALF_TURN,
        (0, -1) => Angle::ZERO - Angle::QUARTER_TURN,
        _ => Angle::from_radians(F32Ext::atan2(delta.y as f32, delta.x as f32)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
