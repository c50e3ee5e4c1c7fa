//! Angle model: maps a time-of-day reading to hand and sprite angles.
//!
//! Angles use the watch's fixed-point convention: one full turn is
//! [`TRIG_MAX_ANGLE`] units, 0 points at 12 o'clock and values grow
//! clockwise. Every [`Angle`] is normalised into `[0, TRIG_MAX_ANGLE)` when it
//! is built, so arithmetic on angles always wraps modulo one turn.

use core::f32::consts::TAU;
use core::ops::{Add, Sub};

use micromath::F32Ext;

use crate::settings::SpriteFollows;
use crate::time::TimeReading;

/// Fixed-point units in one full turn.
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

/// A normalised angle, `0..TRIG_MAX_ANGLE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(i32);

impl Angle {
    pub const ZERO: Self = Self(0);
    pub const QUARTER_TURN: Self = Self(TRIG_MAX_ANGLE / 4);
    pub const HALF_TURN: Self = Self(TRIG_MAX_ANGLE / 2);

    /// Build an angle from raw units, wrapping into one turn.
    #[inline]
    pub const fn new(raw: i32) -> Self { Self(raw.rem_euclid(TRIG_MAX_ANGLE)) }

    /// Raw units in `0..TRIG_MAX_ANGLE`.
    #[inline]
    pub const fn raw(self) -> i32 { self.0 }

    pub const fn from_degrees(degrees: i32) -> Self { Self::new(degrees * (TRIG_MAX_ANGLE / 8) / 45) }

    pub fn to_radians(self) -> f32 { self.0 as f32 * TAU / TRIG_MAX_ANGLE as f32 }

    /// `(sin, cos)`, exact at the four cardinal angles so hands at 12, 3, 6
    /// and 9 o'clock land on whole pixels.
    pub fn sin_cos(self) -> (f32, f32) {
        const QUARTER: i32 = TRIG_MAX_ANGLE / 4;
        match self.0 {
            0 => (0.0, 1.0),
            QUARTER => (1.0, 0.0),
            a if a == 2 * QUARTER => (0.0, -1.0),
            a if a == 3 * QUARTER => (-1.0, 0.0),
            _ => {
                let radians = self.to_radians();
                (F32Ext::sin(radians), F32Ext::cos(radians))
            }
        }
    }

    pub fn from_radians(radians: f32) -> Self {
        let units = radians * TRIG_MAX_ANGLE as f32 / TAU;
        Self::new(round_to_i32(units))
    }

    /// Shortest unsigned distance to `other`, in units (at most half a turn).
    pub const fn distance_to(
        self,
        other: Self,
    ) -> i32 {
        let d = (self.0 - other.0).rem_euclid(TRIG_MAX_ANGLE);
        if d > TRIG_MAX_ANGLE / 2 { TRIG_MAX_ANGLE - d } else { d }
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

/// Round half away from zero (no `f32::round` in `core`).
pub(crate) fn round_to_i32(value: f32) -> i32 {
    if value >= 0.0 { (value + 0.5) as i32 } else { (value - 0.5) as i32 }
}

// =============================================================================
// Time to Angle
// =============================================================================

/// `value * TRIG_MAX_ANGLE / units_per_turn`, wrapped.
#[inline]
pub const fn angle_for_unit(
    value: i32,
    units_per_turn: i32,
) -> Angle {
    Angle::new(value * TRIG_MAX_ANGLE / units_per_turn)
}

pub const fn minute_angle(time: TimeReading) -> Angle { angle_for_unit(time.minutes as i32, 60) }

pub const fn second_angle(time: TimeReading) -> Angle { angle_for_unit(time.seconds as i32, 60) }

/// Hour hand angle, advanced by the minutes so the hand creeps between hours.
pub const fn hour_angle(time: TimeReading) -> Angle {
    let minutes = minute_angle(time).raw();
    Angle::new((time.hours as i32 * TRIG_MAX_ANGLE + minutes) / 12)
}

/// Angle driving the donut, evaluated per frame from the live configuration.
pub const fn sprite_angle(
    time: TimeReading,
    follows: SpriteFollows,
) -> Angle {
    match follows {
        SpriteFollows::Seconds => second_angle(time),
        SpriteFollows::Minutes => minute_angle(time),
    }
}

/// The three true hand angles for one reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandAngles {
    pub hour: Angle,
    pub minute: Angle,
    pub second: Angle,
}

impl HandAngles {
    pub const fn at(time: TimeReading) -> Self {
        Self {
            hour: hour_angle(time),
            minute: minute_angle(time),
            second: second_angle(time),
        }
    }
}
