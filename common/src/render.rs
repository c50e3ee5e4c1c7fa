//! Frame renderer: one pass over the whole face.
//!
//! The renderer is parameterized by a [`RenderStyle`] chosen once at
//! construction. It is split in two steps so geometry can be tested without
//! pixels:
//!
//! - [`FrameRenderer::compute`] turns the frame rect and the per-call inputs
//!   (time, configuration, intro progress) into a [`FrameGeometry`].
//! - [`FrameRenderer::draw`] issues the drawing calls for that geometry.
//!
//! # Draw Order
//!
//! ```text
//! 1. minute hand, hour hand      (shaft + accent, or filled polygon)
//! 2. seconds hand                (forward stroke, then the tail), if enabled
//! 3. center dot
//! 4. donut sprite                (Set compositing)
//! 5. pupils                      (aimed at the donut center)
//! ```
//!
//! Every angle and the donut's vertical offset pass through the intro
//! interpolation. At full progress they are the true values, so the intro
//! costs nothing once it has finished.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::angle::{Angle, HandAngles, sprite_angle};
use crate::animations::{AnimationCurve, AnimationProgress, IntroAnimation, interpolate_angle, interpolate_linear};
use crate::colors::{BLACK, LOGO_RED};
use crate::config::{
    ACCENT_INSET_DIVISOR, CENTER_DOT_RADIUS, DONUT_INTRO_DURATION_MS, EYE_SOCKET_INSET, HAND_ACCENT_STROKE,
    HAND_SHAFT_STROKE, HOUR_LENGTH_FRACTION, HOUR_ORBIT_DIVISOR, MINUTE_LENGTH_FRACTION, MINUTE_ORBIT_DIVISOR,
    PORTRAIT_SIZE, PUPIL_RADIUS, RECT_LEFT_EYE, RECT_RIGHT_EYE, RECT_SCREEN_HEIGHT, RECT_SCREEN_WIDTH,
    ROUND_LEFT_EYE, ROUND_RIGHT_EYE, ROUND_SCREEN_SIZE, SECONDS_BACKWARD_INSET_PERCENT, SECONDS_BACKWARD_STROKE,
    SECONDS_FORWARD_INSET, SECONDS_FORWARD_STROKE, SPRINKLES_INTRO_DURATION_MS, SPRITE_ORBIT_DIVISOR_MINUTES,
    SPRITE_ORBIT_DIVISOR_SECONDS,
};
use crate::gaze::EyeSpec;
use crate::geometry::{
    Inset, OvalScaleMode, assert_frame, center_point, centered_rect_on_orbit, inset, inset_by, point_on_orbit_with,
    rotate_point,
};
use crate::settings::{Configuration, SpriteFollows};
use crate::surface::{Bitmap, CompositingMode, Surface};
use crate::time::TimeReading;

// =============================================================================
// Style
// =============================================================================

/// Display shape. Selects the screen size and the eye socket positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceShape {
    #[default]
    Rectangular,
    Round,
}

impl FaceShape {
    pub const fn screen_size(self) -> Size {
        match self {
            Self::Rectangular => Size::new(RECT_SCREEN_WIDTH, RECT_SCREEN_HEIGHT),
            Self::Round => Size::new(ROUND_SCREEN_SIZE, ROUND_SCREEN_SIZE),
        }
    }

    /// Full-screen frame at the origin.
    pub const fn frame(self) -> Rectangle { Rectangle::new(Point::new(0, 0), self.screen_size()) }
}

/// How the hour and minute hands are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandStyle {
    /// Thin shaft to the hand orbit plus a thick accent segment near the tip.
    StrokeWithElongation,
    /// Filled tapered pentagon rotated about the center.
    TaperedPolygon,
}

/// Geometry of one major hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandSpec {
    /// Stroke style: hand orbit, resolved against the frame width.
    pub orbit: Inset,
    /// Polygon style: length as `frame width * num / den`.
    pub length: (u32, u32),
}

/// Thick colored segment along the outer part of a stroke hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccentSpec {
    pub color: Rgb565,
    pub stroke: u32,
    /// Inner end of the accent, resolved against the hand orbit width.
    pub inset: Inset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecondsHandSpec {
    /// Forward orbit, resolved against the frame width.
    pub forward_inset: Inset,
    /// Tail orbit inset from the frame, resolved against the forward orbit width.
    pub backward_inset: Inset,
    pub forward_stroke: u32,
    pub backward_stroke: u32,
}

/// Everything that differs between face variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    pub shape: FaceShape,
    pub hand_style: HandStyle,
    pub oval_mode: OvalScaleMode,
    pub minute_hand: HandSpec,
    pub hour_hand: HandSpec,
    pub shaft_stroke: u32,
    pub accent: Option<AccentSpec>,
    pub seconds_hand: SecondsHandSpec,
    /// Donut orbit insets from the seconds-forward orbit, per driving hand.
    pub sprite_orbit_seconds: Inset,
    pub sprite_orbit_minutes: Inset,
    pub center_dot_radius: u32,
    pub portrait_size: Size,
    /// Eye sockets relative to the portrait's top-left corner.
    pub right_eye: Rectangle,
    pub left_eye: Rectangle,
    pub eye_socket_inset: u32,
    pub pupil_radius: u32,
    /// Grow the seconds hand out of the pivot during the intro.
    pub seconds_grow_in: bool,
    pub intro_duration_ms: u32,
    pub intro_curve: AnimationCurve,
}

impl RenderStyle {
    /// Stroke hands with a red accent, ease-out intro.
    pub const fn donut(shape: FaceShape) -> Self {
        let (right_eye, left_eye) = match shape {
            FaceShape::Rectangular => (RECT_RIGHT_EYE, RECT_LEFT_EYE),
            FaceShape::Round => (ROUND_RIGHT_EYE, ROUND_LEFT_EYE),
        };
        Self {
            shape,
            hand_style: HandStyle::StrokeWithElongation,
            oval_mode: OvalScaleMode::FitCircle,
            minute_hand: HandSpec {
                orbit: Inset::WidthFraction(MINUTE_ORBIT_DIVISOR),
                length: MINUTE_LENGTH_FRACTION,
            },
            hour_hand: HandSpec {
                orbit: Inset::WidthFraction(HOUR_ORBIT_DIVISOR),
                length: HOUR_LENGTH_FRACTION,
            },
            shaft_stroke: HAND_SHAFT_STROKE,
            accent: Some(AccentSpec {
                color: LOGO_RED,
                stroke: HAND_ACCENT_STROKE,
                inset: Inset::WidthFraction(ACCENT_INSET_DIVISOR),
            }),
            seconds_hand: SecondsHandSpec {
                forward_inset: Inset::Pixels(SECONDS_FORWARD_INSET),
                backward_inset: Inset::WidthPercent(SECONDS_BACKWARD_INSET_PERCENT),
                forward_stroke: SECONDS_FORWARD_STROKE,
                backward_stroke: SECONDS_BACKWARD_STROKE,
            },
            sprite_orbit_seconds: Inset::WidthFraction(SPRITE_ORBIT_DIVISOR_SECONDS),
            sprite_orbit_minutes: Inset::WidthFraction(SPRITE_ORBIT_DIVISOR_MINUTES),
            center_dot_radius: CENTER_DOT_RADIUS,
            portrait_size: PORTRAIT_SIZE,
            right_eye,
            left_eye,
            eye_socket_inset: EYE_SOCKET_INSET,
            pupil_radius: PUPIL_RADIUS,
            seconds_grow_in: false,
            intro_duration_ms: DONUT_INTRO_DURATION_MS,
            intro_curve: AnimationCurve::EaseOut,
        }
    }

    /// Tapered polygon hands, seconds hand grows in, ease-in intro.
    pub const fn sprinkles(shape: FaceShape) -> Self {
        let base = Self::donut(shape);
        Self {
            hand_style: HandStyle::TaperedPolygon,
            accent: None,
            seconds_grow_in: true,
            intro_duration_ms: SPRINKLES_INTRO_DURATION_MS,
            intro_curve: AnimationCurve::EaseIn,
            ..base
        }
    }

    /// Fresh intro controller for this style.
    pub const fn intro(&self) -> IntroAnimation { IntroAnimation::new(self.intro_duration_ms, self.intro_curve) }

    /// Portrait bounds: bottom-aligned and horizontally centered in `frame`.
    pub fn portrait_rect(
        &self,
        frame: &Rectangle,
    ) -> Rectangle {
        let size = Size::new(
            self.portrait_size.width.min(frame.size.width),
            self.portrait_size.height.min(frame.size.height),
        );
        let x = frame.top_left.x + ((frame.size.width - size.width) / 2) as i32;
        let y = frame.top_left.y + (frame.size.height - size.height) as i32;
        Rectangle::new(Point::new(x, y), size)
    }

    /// Eye sockets (right, left) in screen coordinates, already inset.
    pub fn eye_rects(
        &self,
        frame: &Rectangle,
    ) -> [Rectangle; 2] {
        let origin = self.portrait_rect(frame).top_left;
        [self.right_eye, self.left_eye]
            .map(|eye| inset(Rectangle::new(origin + eye.top_left, eye.size), self.eye_socket_inset))
    }
}

// =============================================================================
// Inputs and Geometry
// =============================================================================

/// Per-call renderer inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInputs {
    pub time: TimeReading,
    pub settings: Configuration,
    pub progress: AnimationProgress,
}

/// Resolved shape of one major hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandGeometry {
    Stroke {
        tip: Point,
        /// Accent segment from the tip inward.
        accent: Option<(Point, Point)>,
    },
    Polygon { points: [Point; 5] },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecondsGeometry {
    pub forward: Point,
    pub backward: Point,
}

/// Everything [`FrameRenderer::draw`] needs, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    pub center: Point,
    /// Angles after intro interpolation.
    pub angles: HandAngles,
    pub sprite_angle: Angle,
    pub minute_hand: HandGeometry,
    pub hour_hand: HandGeometry,
    pub seconds_hand: Option<SecondsGeometry>,
    pub sprite_orbit: Rectangle,
    pub sprite_rect: Rectangle,
    pub sprite_center: Point,
    /// Pupil discs (right, left).
    pub pupils: [Rectangle; 2],
}

/// Tapered hand outline pointing up from the origin.
pub const fn tapered_hand_points(length: i32) -> [Point; 5] {
    [
        Point::new(-3, 0),
        Point::new(3, 0),
        Point::new(6, -(length - 8)),
        Point::new(0, -length),
        Point::new(-6, -(length - 8)),
    ]
}

// =============================================================================
// Renderer
// =============================================================================

pub struct FrameRenderer<'a> {
    style: RenderStyle,
    sprite: Bitmap<'a>,
}

impl<'a> FrameRenderer<'a> {
    pub const fn new(
        style: RenderStyle,
        sprite: Bitmap<'a>,
    ) -> Self {
        Self { style, sprite }
    }

    #[inline]
    pub const fn style(&self) -> &RenderStyle { &self.style }

    /// Lay out one frame.
    ///
    /// # Panics
    /// If `frame` is empty or too small for the style's orbits.
    pub fn compute(
        &self,
        frame: &Rectangle,
        inputs: &FrameInputs,
    ) -> FrameGeometry {
        assert_frame(frame);
        let style = &self.style;
        let settings = &inputs.settings;
        let progress = inputs.progress;
        let mode = style.oval_mode;
        let center = center_point(frame);

        let truth = HandAngles::at(inputs.time);
        let angles = HandAngles {
            hour: interpolate_angle(truth.hour, progress),
            minute: interpolate_angle(truth.minute, progress),
            second: interpolate_angle(truth.second, progress),
        };

        let minute_hand = self.hand(frame, center, &style.minute_hand, angles.minute);
        let hour_hand = self.hand(frame, center, &style.hour_hand, angles.hour);

        let forward_orbit = inset_by(*frame, style.seconds_hand.forward_inset);
        let seconds_hand = settings.seconds_hand_enabled.then(|| {
            let reach = if style.seconds_grow_in {
                let half = forward_orbit.size.width.min(forward_orbit.size.height).saturating_sub(1) / 2;
                inset(forward_orbit, interpolate_linear(i64::from(half), 0, progress) as u32)
            } else {
                forward_orbit
            };
            let tail_margin = style.seconds_hand.backward_inset.resolve(forward_orbit.size.width);
            SecondsGeometry {
                forward: point_on_orbit_with(&reach, mode, angles.second),
                backward: point_on_orbit_with(&inset(*frame, tail_margin), mode, angles.second - Angle::HALF_TURN),
            }
        });

        let driver = settings.effective_sprite_driver();
        let sprite_inset = match driver {
            SpriteFollows::Seconds => style.sprite_orbit_seconds,
            SpriteFollows::Minutes => style.sprite_orbit_minutes,
        };
        let sprite_orbit = inset_by(forward_orbit, sprite_inset);
        let sprite_angle = interpolate_angle(sprite_angle(inputs.time, driver), progress);
        let mut sprite_rect = centered_rect_on_orbit(&sprite_orbit, mode, sprite_angle, self.sprite.size());
        // The donut drops in from the top edge of the frame
        let drop = i64::from(sprite_rect.top_left.y - frame.top_left.y);
        sprite_rect.top_left.y = frame.top_left.y + interpolate_linear(0, drop, progress) as i32;
        let sprite_center = center_point(&sprite_rect);

        let pupils = style
            .eye_rects(frame)
            .map(|rect| EyeSpec::new(rect, style.pupil_radius).pupil_rect(sprite_center, mode));

        FrameGeometry {
            center,
            angles,
            sprite_angle,
            minute_hand,
            hour_hand,
            seconds_hand,
            sprite_orbit,
            sprite_rect,
            sprite_center,
            pupils,
        }
    }

    fn hand(
        &self,
        frame: &Rectangle,
        center: Point,
        spec: &HandSpec,
        angle: Angle,
    ) -> HandGeometry {
        match self.style.hand_style {
            HandStyle::StrokeWithElongation => {
                let orbit = inset_by(*frame, spec.orbit);
                let tip = point_on_orbit_with(&orbit, self.style.oval_mode, angle);
                let accent = self.style.accent.map(|accent| {
                    let inner = inset_by(orbit, accent.inset);
                    (tip, point_on_orbit_with(&inner, self.style.oval_mode, angle))
                });
                HandGeometry::Stroke { tip, accent }
            }
            HandStyle::TaperedPolygon => {
                let (num, den) = spec.length;
                let length = (frame.size.width * num / den) as i32;
                let points = tapered_hand_points(length).map(|p| center + rotate_point(p, angle));
                HandGeometry::Polygon { points }
            }
        }
    }

    /// Draw one frame onto `surface`. The background is the caller's job.
    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        frame: &Rectangle,
        inputs: &FrameInputs,
    ) -> FrameGeometry {
        let geometry = self.compute(frame, inputs);
        let settings = &inputs.settings;

        self.draw_hand(surface, geometry.center, &geometry.minute_hand, settings.minute_hand_color);
        self.draw_hand(surface, geometry.center, &geometry.hour_hand, settings.hour_hand_color);

        if let Some(seconds) = geometry.seconds_hand {
            let spec = &self.style.seconds_hand;
            let color = settings.seconds_hand_color;
            surface.draw_line(geometry.center, seconds.forward, color, spec.forward_stroke);
            surface.draw_line(geometry.center, seconds.backward, color, spec.backward_stroke);
        }

        surface.fill_circle(geometry.center, self.style.center_dot_radius, settings.center_dot_color);

        surface.draw_bitmap_in_rect(&self.sprite, geometry.sprite_rect, CompositingMode::Set);

        for pupil in geometry.pupils {
            surface.fill_radial(
                pupil,
                self.style.oval_mode,
                self.style.pupil_radius,
                Angle::ZERO,
                Angle::ZERO,
                BLACK,
            );
        }

        geometry
    }

    fn draw_hand<S: Surface>(
        &self,
        surface: &mut S,
        center: Point,
        hand: &HandGeometry,
        color: Rgb565,
    ) {
        match hand {
            HandGeometry::Stroke { tip, accent } => {
                surface.draw_line(center, *tip, color, self.style.shaft_stroke);
                if let (Some((from, to)), Some(spec)) = (accent, self.style.accent) {
                    surface.draw_line(*from, *to, spec.color, spec.stroke);
                }
            }
            HandGeometry::Polygon { points } => surface.fill_polygon(points, color),
        }
    }
}

// =============================================================================
// Dirty Tracking
// =============================================================================

/// Layers that need a redraw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyLayers(u8);

impl DirtyLayers {
    pub const NONE: Self = Self(0);
    pub const HANDS: Self = Self(1 << 0);
    pub const EYES: Self = Self(1 << 1);
    /// Whole window, including the background.
    pub const ROOT: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[inline]
    pub fn insert(
        &mut self,
        other: Self,
    ) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn clear(&mut self) { self.0 = 0; }
}

impl core::ops::BitOr for DirtyLayers {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0 | rhs.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::TRIG_MAX_ANGLE;
    use crate::colors::WHITE;
    use crate::geometry::point_on_orbit_with;
    use crate::sprite::DONUT;
    use crate::surface::recording::{DrawCall, RecordingSurface};

    fn inputs(
        time: TimeReading,
        progress: AnimationProgress,
    ) -> FrameInputs {
        FrameInputs { time, settings: Configuration::default(), progress }
    }

    fn renderer(style: RenderStyle) -> FrameRenderer<'static> { FrameRenderer::new(style, DONUT) }

    #[test]
    fn test_end_to_end_known_reading() {
        let frame = FaceShape::Rectangular.frame();
        let r = renderer(RenderStyle::donut(FaceShape::Rectangular));
        let g = r.compute(&frame, &inputs(TimeReading::new(10, 9, 15), AnimationProgress::COMPLETE));

        let minute = 9 * TRIG_MAX_ANGLE / 60;
        assert_eq!(g.angles.minute.raw(), minute);
        assert_eq!(g.angles.hour.raw(), (10 * TRIG_MAX_ANGLE + minute) / 12);
        assert_eq!(g.angles.second, Angle::QUARTER_TURN);
        assert_eq!(g.sprite_angle, Angle::QUARTER_TURN);

        let expected = point_on_orbit_with(&g.sprite_orbit, OvalScaleMode::FitCircle, Angle::QUARTER_TURN);
        assert_eq!(g.sprite_center, expected, "donut should sit at 3 o'clock on its orbit");

        for (i, eye) in r.style().eye_rects(&frame).into_iter().enumerate() {
            let spec = EyeSpec::new(eye, PUPIL_RADIUS);
            let pupil = center_point(&g.pupils[i]);
            let eye_center = center_point(&spec.container());
            let moved = pupil - eye_center;
            let wanted = g.sprite_center - eye_center;
            assert!(moved.x * wanted.x + moved.y * wanted.y > 0, "eye {i} should look at the donut");
        }
    }

    #[test]
    fn test_rest_pose_at_zero_progress() {
        let frame = FaceShape::Rectangular.frame();
        for style in [RenderStyle::donut(FaceShape::Rectangular), RenderStyle::sprinkles(FaceShape::Rectangular)] {
            let g = renderer(style).compute(&frame, &inputs(TimeReading::new(7, 42, 38), AnimationProgress::START));
            assert_eq!(g.angles.hour, Angle::ZERO);
            assert_eq!(g.angles.minute, Angle::ZERO);
            assert_eq!(g.angles.second, Angle::ZERO);
            assert_eq!(g.sprite_rect.top_left.y, frame.top_left.y, "donut should start at the top edge");
        }
    }

    #[test]
    fn test_stroke_hands_point_up_at_rest() {
        let frame = FaceShape::Rectangular.frame();
        let g = renderer(RenderStyle::donut(FaceShape::Rectangular))
            .compute(&frame, &inputs(TimeReading::new(3, 30, 0), AnimationProgress::START));
        let HandGeometry::Stroke { tip, accent: Some((from, to)) } = g.minute_hand else {
            panic!("donut style should use accented stroke hands");
        };
        assert_eq!(tip.x, g.center.x);
        assert!(tip.y < g.center.y);
        assert_eq!(from, tip);
        assert!(to.y > tip.y && to.y < g.center.y, "accent should run inward from the tip");
    }

    #[test]
    fn test_minute_hand_longer_than_hour_hand() {
        let frame = FaceShape::Rectangular.frame();
        for style in [RenderStyle::donut(FaceShape::Rectangular), RenderStyle::sprinkles(FaceShape::Rectangular)] {
            let g = renderer(style).compute(&frame, &inputs(TimeReading::MIDNIGHT, AnimationProgress::COMPLETE));
            let reach = |hand: HandGeometry| match hand {
                HandGeometry::Stroke { tip, .. } => g.center.y - tip.y,
                HandGeometry::Polygon { points } => g.center.y - points[3].y,
            };
            assert!(reach(g.minute_hand) > reach(g.hour_hand), "{:?}", style.hand_style);
        }
    }

    #[test]
    fn test_polygon_hand_rotates_about_center() {
        let frame = FaceShape::Rectangular.frame();
        let g = renderer(RenderStyle::sprinkles(FaceShape::Rectangular))
            .compute(&frame, &inputs(TimeReading::new(0, 15, 0), AnimationProgress::COMPLETE));
        let HandGeometry::Polygon { points } = g.minute_hand else {
            panic!("sprinkles style should use polygon hands");
        };
        let length = (144 * 4 / 9) as i32;
        assert_eq!(points[3], g.center + Point::new(length, 0), "minute tip at 3 o'clock");
    }

    #[test]
    fn test_draw_order() {
        let frame = FaceShape::Rectangular.frame();
        let mut surface = RecordingSurface::default();
        renderer(RenderStyle::donut(FaceShape::Rectangular)).draw(
            &mut surface,
            &frame,
            &inputs(TimeReading::new(10, 9, 15), AnimationProgress::COMPLETE),
        );

        let kinds: Vec<&str> = surface
            .calls
            .iter()
            .map(|call| match call {
                DrawCall::Line { width: 2, .. } => "shaft",
                DrawCall::Line { width: 9, .. } => "accent",
                DrawCall::Line { width: 1, .. } => "seconds",
                DrawCall::Circle { .. } => "dot",
                DrawCall::Bitmap { mode: CompositingMode::Set, .. } => "sprite",
                DrawCall::Radial { .. } => "pupil",
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        // The seconds tail is also 2px wide
        assert_eq!(
            kinds,
            ["shaft", "accent", "shaft", "accent", "seconds", "shaft", "dot", "sprite", "pupil", "pupil"]
        );
    }

    #[test]
    fn test_colors_follow_configuration() {
        let frame = FaceShape::Rectangular.frame();
        let mut surface = RecordingSurface::default();
        let settings = Configuration {
            minute_hand_color: WHITE,
            hour_hand_color: LOGO_RED,
            center_dot_color: WHITE,
            ..Configuration::default()
        };
        renderer(RenderStyle::sprinkles(FaceShape::Rectangular)).draw(
            &mut surface,
            &frame,
            &FrameInputs { time: TimeReading::new(1, 2, 3), settings, progress: AnimationProgress::COMPLETE },
        );
        let polygons: Vec<Rgb565> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Polygon { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(polygons, [WHITE, LOGO_RED], "minute then hour");
        assert!(surface.calls.contains(&DrawCall::Circle { center: Point::new(72, 84), radius: 5, color: WHITE }));
    }

    #[test]
    fn test_live_seconds_hand_toggle() {
        let frame = FaceShape::Rectangular.frame();
        let r = renderer(RenderStyle::donut(FaceShape::Rectangular));
        let time = TimeReading::new(8, 20, 45);

        let on = r.compute(&frame, &inputs(time, AnimationProgress::COMPLETE));
        let off_settings = Configuration { seconds_hand_enabled: false, ..Configuration::default() };
        let off = r.compute(
            &frame,
            &FrameInputs { time, settings: off_settings, progress: AnimationProgress::COMPLETE },
        );

        assert!(on.seconds_hand.is_some());
        assert!(off.seconds_hand.is_none(), "disabled seconds hand must not be drawn");
        assert_eq!(on.sprite_angle, crate::angle::second_angle(time));
        assert_eq!(off.sprite_angle, crate::angle::minute_angle(time), "donut should move to the minute hand");
        assert!(off.sprite_orbit.size.width < on.sprite_orbit.size.width, "minute orbit sits further in");

        let mut surface = RecordingSurface::default();
        r.draw(&mut surface, &frame, &FrameInputs { time, settings: off_settings, progress: AnimationProgress::COMPLETE });
        assert!(!surface.calls.iter().any(|c| matches!(c, DrawCall::Line { width: 1, .. })));
    }

    #[test]
    fn test_seconds_tail_points_opposite() {
        let frame = FaceShape::Rectangular.frame();
        let g = renderer(RenderStyle::donut(FaceShape::Rectangular))
            .compute(&frame, &inputs(TimeReading::new(0, 0, 0), AnimationProgress::COMPLETE));
        let seconds = g.seconds_hand.expect("enabled by default");
        assert!(seconds.forward.y < g.center.y);
        assert!(seconds.backward.y > g.center.y);
        assert!(g.center.y - seconds.forward.y > seconds.backward.y - g.center.y, "tail is shorter");
    }

    #[test]
    fn test_seconds_grow_in() {
        let frame = FaceShape::Rectangular.frame();
        let r = renderer(RenderStyle::sprinkles(FaceShape::Rectangular));
        let time = TimeReading::new(0, 0, 0);
        let start = r.compute(&frame, &inputs(time, AnimationProgress::START)).seconds_hand.expect("enabled");
        let end = r.compute(&frame, &inputs(time, AnimationProgress::COMPLETE)).seconds_hand.expect("enabled");
        assert!(start.forward.y > end.forward.y, "seconds hand should grow during the intro");
        assert!((center_point(&frame).y - start.forward.y).abs() <= 1, "starts at the pivot");
    }

    #[test]
    fn test_round_face_uses_round_eyes() {
        let frame = FaceShape::Round.frame();
        let style = RenderStyle::donut(FaceShape::Round);
        let [right, _] = style.eye_rects(&frame);
        let portrait = style.portrait_rect(&frame);
        assert_eq!(portrait, Rectangle::new(Point::new(35, 76), PORTRAIT_SIZE));
        assert_eq!(right.top_left, portrait.top_left + ROUND_RIGHT_EYE.top_left + Point::new(1, 1));
        let g = renderer(style).compute(&frame, &inputs(TimeReading::new(6, 30, 0), AnimationProgress::COMPLETE));
        assert!(frame.contains(g.sprite_center));
    }

    #[test]
    fn test_frame_offset_translates_geometry() {
        let r = renderer(RenderStyle::donut(FaceShape::Rectangular));
        let base = FaceShape::Rectangular.frame();
        let shifted = Rectangle::new(Point::new(10, 20), base.size);
        let i = inputs(TimeReading::new(4, 5, 6), AnimationProgress::COMPLETE);
        let a = r.compute(&base, &i);
        let b = r.compute(&shifted, &i);
        assert_eq!(b.center - a.center, Point::new(10, 20));
        assert_eq!(b.sprite_center - a.sprite_center, Point::new(10, 20));
    }

    #[test]
    #[should_panic(expected = "positive size")]
    fn test_empty_frame_rejected() {
        let r = renderer(RenderStyle::donut(FaceShape::Rectangular));
        let _ = r.compute(&Rectangle::zero(), &inputs(TimeReading::MIDNIGHT, AnimationProgress::COMPLETE));
    }

    #[test]
    fn test_dirty_layers() {
        let mut dirty = DirtyLayers::NONE;
        assert!(dirty.is_empty());
        dirty.insert(DirtyLayers::HANDS | DirtyLayers::EYES);
        assert!(dirty.contains(DirtyLayers::HANDS));
        assert!(!dirty.contains(DirtyLayers::ROOT));
        dirty.clear();
        assert!(dirty.is_empty());
    }
}
