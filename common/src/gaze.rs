//! Gaze model: the pupils look at the donut.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::angle::Angle;
use crate::geometry::{OvalScaleMode, angle_between, center_point, centered_rect_on_orbit, inset};

/// Orbit angle that points a pupil from `eye_center` toward `target`.
///
/// `angle_between` measures from +x while orbits start at 12 o'clock, hence
/// the extra quarter turn.
#[inline]
pub fn pupil_angle(
    eye_center: Point,
    target: Point,
) -> Angle {
    angle_between(eye_center, target) + Angle::QUARTER_TURN
}

/// A static eye socket and the pupil that moves inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyeSpec {
    /// Socket bounds in screen coordinates.
    pub rect: Rectangle,
    pub pupil_radius: u32,
}

impl EyeSpec {
    pub const fn new(
        rect: Rectangle,
        pupil_radius: u32,
    ) -> Self {
        Self { rect, pupil_radius }
    }

    /// Region the pupil center travels on: the socket inset by one pupil diameter.
    pub fn container(&self) -> Rectangle { inset(self.rect, 2 * self.pupil_radius) }

    pub fn pupil_size(&self) -> Size { Size::new(2 * self.pupil_radius, 2 * self.pupil_radius) }

    /// Angle of the pupil when looking at `target`.
    pub fn angle_to(
        &self,
        target: Point,
    ) -> Angle {
        pupil_angle(center_point(&self.container()), target)
    }

    /// Bounds of the pupil disc when looking at `target`.
    pub fn pupil_rect(
        &self,
        target: Point,
        mode: OvalScaleMode,
    ) -> Rectangle {
        let container = self.container();
        let angle = pupil_angle(center_point(&container), target);
        centered_rect_on_orbit(&container, mode, angle, self.pupil_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::TRIG_MAX_ANGLE;

    fn eye() -> EyeSpec { EyeSpec::new(Rectangle::new(Point::new(20, 40), Size::new(31, 31)), 3) }

    #[test]
    fn test_target_above_points_up() {
        let c = Point::new(50, 50);
        assert_eq!(pupil_angle(c, Point::new(50, 10)), Angle::ZERO);
    }

    #[test]
    fn test_target_right_points_right() {
        let c = Point::new(50, 50);
        assert_eq!(pupil_angle(c, Point::new(90, 50)), Angle::QUARTER_TURN);
        assert_eq!(pupil_angle(c, Point::new(50, 90)), Angle::HALF_TURN);
        assert_eq!(pupil_angle(c, Point::new(10, 50)), Angle::new(3 * TRIG_MAX_ANGLE / 4));
    }

    #[test]
    fn test_diagonal_is_close_to_eighth_turn() {
        let a = pupil_angle(Point::new(0, 0), Point::new(30, -30));
        assert!(
            a.distance_to(Angle::new(TRIG_MAX_ANGLE / 8)) < 64,
            "up-right should be ~45 degrees, got {}",
            a.raw()
        );
    }

    #[test]
    fn test_container_is_inset_by_pupil_diameter() {
        let c = eye().container();
        assert_eq!(c, Rectangle::new(Point::new(26, 46), Size::new(19, 19)));
    }

    #[test]
    fn test_pupil_moves_toward_target_and_stays_in_socket() {
        let eye = eye();
        let center = center_point(&eye.container());
        for target in [Point::new(140, 0), Point::new(-50, 45), Point::new(35, 200), Point::new(0, 0)] {
            let pupil = eye.pupil_rect(target, OvalScaleMode::FitCircle);
            assert_eq!(pupil.size, Size::new(6, 6));
            assert!(
                eye.rect.contains(pupil.top_left) && eye.rect.contains(pupil.bottom_right().unwrap_or(pupil.top_left)),
                "pupil {pupil:?} left the socket for target {target:?}"
            );
            let moved = center_point(&pupil) - center;
            let wanted = target - center;
            assert!(
                moved.x * wanted.x + moved.y * wanted.y > 0,
                "pupil should lean toward {target:?}, moved {moved:?}"
            );
        }
    }
}
