//! Built-in donut sprite.
//!
//! 14x14 palettised pixels. Index 0 is transparent so the donut is drawn with
//! [`CompositingMode::Set`](crate::surface::CompositingMode::Set) over the hands.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Size;

use crate::colors::{DOUGH, FROSTING_PINK, OUTLINE_BROWN, SPRINKLE_BLUE, SPRINKLE_YELLOW, WHITE};
use crate::surface::Bitmap;

pub const DONUT_SIZE: Size = Size::new(14, 14);

const DONUT_PALETTE: [Rgb565; 7] = [
    WHITE, // transparent
    DOUGH,
    FROSTING_PINK,
    OUTLINE_BROWN,
    SPRINKLE_YELLOW,
    SPRINKLE_BLUE,
    WHITE,
];

#[rustfmt::skip]
const DONUT_INDICES: [u8; 14 * 14] = [
    0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0,
    0, 0, 3, 3, 2, 2, 2, 2, 2, 2, 3, 3, 0, 0,
    0, 3, 2, 6, 4, 2, 2, 2, 5, 2, 2, 2, 3, 0,
    0, 3, 2, 5, 2, 2, 2, 2, 2, 2, 4, 2, 3, 0,
    3, 2, 2, 2, 2, 3, 3, 3, 3, 2, 2, 2, 2, 3,
    3, 2, 4, 2, 3, 0, 0, 0, 0, 3, 2, 5, 2, 3,
    3, 2, 2, 2, 3, 0, 0, 0, 0, 3, 2, 2, 2, 3,
    3, 1, 2, 5, 3, 0, 0, 0, 0, 3, 2, 4, 1, 3,
    3, 1, 2, 2, 3, 0, 0, 0, 0, 3, 2, 2, 1, 3,
    3, 1, 1, 2, 2, 3, 3, 3, 3, 2, 2, 1, 1, 3,
    0, 3, 1, 1, 2, 4, 2, 2, 5, 2, 1, 1, 3, 0,
    0, 3, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 3, 0,
    0, 0, 3, 3, 1, 1, 1, 1, 1, 1, 3, 3, 0, 0,
    0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0,
];

/// The donut that orbits the face.
pub const DONUT: Bitmap<'static> = Bitmap::new(DONUT_SIZE, &DONUT_INDICES, &DONUT_PALETTE);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CompositingMode;

    #[test]
    fn test_indices_stay_in_palette() {
        for (i, &index) in DONUT_INDICES.iter().enumerate() {
            assert!(usize::from(index) < DONUT_PALETTE.len(), "pixel {i} uses index {index}");
        }
    }

    #[test]
    fn test_hole_and_corners_are_transparent() {
        for (x, y) in [(0, 0), (13, 0), (0, 13), (13, 13), (6, 6), (7, 7)] {
            assert_eq!(DONUT.color_at(x, y, CompositingMode::Set), None, "({x}, {y}) should be see-through");
        }
        assert_eq!(DONUT.color_at(6, 4, CompositingMode::Set), Some(OUTLINE_BROWN));
    }
}
