//! Drawing surface port.
//!
//! The renderer never touches a framebuffer directly. It issues the handful
//! of primitives below against a [`Surface`], which lets the same frame be
//! drawn onto an embedded-graphics target on device, in the desktop
//! simulator, or into a recording surface in tests.

use embedded_graphics::geometry::Angle as EgAngle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{DrawTarget, Pixel, Point, Primitive, Size};
use embedded_graphics::primitives::{
    Arc, Circle, Ellipse, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Sector, StrokeAlignment,
    Triangle,
};
use embedded_graphics::Drawable;

use crate::angle::{Angle, TRIG_MAX_ANGLE};
use crate::geometry::OvalScaleMode;

// =============================================================================
// Bitmaps
// =============================================================================

/// How bitmap pixels combine with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompositingMode {
    /// Every pixel overwrites the destination.
    #[default]
    Assign,
    /// Transparent pixels (palette index 0) leave the destination untouched.
    Set,
}

/// Palette index reserved for transparency.
pub const TRANSPARENT_INDEX: u8 = 0;

/// Palettised bitmap, one index byte per pixel, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    size: Size,
    indices: &'a [u8],
    palette: &'a [Rgb565],
}

impl<'a> Bitmap<'a> {
    /// # Panics
    /// If `indices` does not hold exactly `width * height` entries.
    pub const fn new(
        size: Size,
        indices: &'a [u8],
        palette: &'a [Rgb565],
    ) -> Self {
        assert!(
            indices.len() == (size.width * size.height) as usize,
            "bitmap index data does not match its size"
        );
        Self { size, indices, palette }
    }

    #[inline]
    pub const fn size(&self) -> Size { self.size }

    /// Palette index at `(x, y)`, or `None` outside the bitmap.
    pub fn index_at(
        &self,
        x: u32,
        y: u32,
    ) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.indices.get((y * self.size.width + x) as usize).copied()
    }

    /// Color at `(x, y)` under `mode`; `None` means leave the destination as is.
    pub fn color_at(
        &self,
        x: u32,
        y: u32,
        mode: CompositingMode,
    ) -> Option<Rgb565> {
        let index = self.index_at(x, y)?;
        if mode == CompositingMode::Set && index == TRANSPARENT_INDEX {
            return None;
        }
        self.palette.get(usize::from(index)).copied()
    }
}

// =============================================================================
// Surface Port
// =============================================================================

/// Primitive drawing operations used by the frame renderer.
///
/// Angles follow the watch convention (0 = 12 o'clock, clockwise).
pub trait Surface {
    fn fill_rect(
        &mut self,
        rect: Rectangle,
        color: Rgb565,
    );

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb565,
        width: u32,
    );

    /// Filled disc of `radius` pixels around `center`.
    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    );

    /// Fill the band between the oval fitted into `rect` and the same oval
    /// shrunk by `inset`, from `start` clockwise to `end`.
    ///
    /// Equal `start` and `end` mean a full turn. An inset of at least the
    /// radius fills the whole oval.
    fn fill_radial(
        &mut self,
        rect: Rectangle,
        mode: OvalScaleMode,
        inset: u32,
        start: Angle,
        end: Angle,
        color: Rgb565,
    );

    /// Fill a convex polygon given in screen coordinates.
    fn fill_polygon(
        &mut self,
        points: &[Point],
        color: Rgb565,
    );

    fn draw_bitmap_in_rect(
        &mut self,
        bitmap: &Bitmap<'_>,
        rect: Rectangle,
        mode: CompositingMode,
    );
}

// =============================================================================
// embedded-graphics Adapter
// =============================================================================

/// [`Surface`] over any RGB565 embedded-graphics target.
///
/// Draw errors are discarded, the same as everywhere else in the firmware:
/// a failed primitive only leaves stale pixels until the next redraw.
pub struct DrawTargetSurface<'a, D> {
    target: &'a mut D,
}

impl<'a, D> DrawTargetSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self { Self { target } }

    /// Underlying target, for host-side decorations drawn between passes.
    pub fn target_mut(&mut self) -> &mut D { self.target }
}

/// Watch angle to embedded-graphics angle (0 = 3 o'clock).
fn to_eg_angle(angle: Angle) -> EgAngle {
    EgAngle::from_degrees(angle.raw() as f32 * 360.0 / TRIG_MAX_ANGLE as f32 - 90.0)
}

/// Largest square centered in `rect`, leaning toward the top-left on odd slack.
fn centered_square(rect: Rectangle) -> Rectangle {
    let side = Size::new_equal(rect.size.width.min(rect.size.height));
    Rectangle::new(rect.top_left + (rect.size - side) / 2, side)
}

/// Bounds of the oval fitted into `rect`.
fn fitted_oval(
    rect: Rectangle,
    mode: OvalScaleMode,
) -> Rectangle {
    match mode {
        OvalScaleMode::FitEllipse => rect,
        OvalScaleMode::FitCircle => centered_square(rect),
    }
}

impl<D> Surface for DrawTargetSurface<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(
        &mut self,
        rect: Rectangle,
        color: Rgb565,
    ) {
        rect.into_styled(PrimitiveStyle::with_fill(color)).draw(self.target).ok();
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb565,
        width: u32,
    ) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.target)
            .ok();
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    ) {
        Circle::with_center(center, 2 * radius + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.target)
            .ok();
    }

    fn fill_radial(
        &mut self,
        rect: Rectangle,
        mode: OvalScaleMode,
        inset: u32,
        start: Angle,
        end: Angle,
        color: Rgb565,
    ) {
        let oval = fitted_oval(rect, mode);
        let short_side = oval.size.width.min(oval.size.height);
        let solid = inset.saturating_mul(2) >= short_side;
        let sweep = (end - start).raw();

        if sweep == 0 {
            let style = if solid {
                PrimitiveStyle::with_fill(color)
            } else {
                PrimitiveStyleBuilder::new()
                    .stroke_color(color)
                    .stroke_width(inset)
                    .stroke_alignment(StrokeAlignment::Inside)
                    .build()
            };
            Ellipse::new(oval.top_left, oval.size).into_styled(style).draw(self.target).ok();
            return;
        }

        // Partial sweeps are circular; embedded-graphics has no elliptic sector
        let circle = centered_square(oval);
        let eg_start = to_eg_angle(start);
        let eg_sweep = EgAngle::from_degrees(sweep as f32 * 360.0 / TRIG_MAX_ANGLE as f32);
        if solid {
            Sector::new(circle.top_left, short_side, eg_start, eg_sweep)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(self.target)
                .ok();
        } else {
            let style = PrimitiveStyleBuilder::new()
                .stroke_color(color)
                .stroke_width(inset)
                .stroke_alignment(StrokeAlignment::Inside)
                .build();
            Arc::new(circle.top_left, short_side, eg_start, eg_sweep).into_styled(style).draw(self.target).ok();
        }
    }

    fn fill_polygon(
        &mut self,
        points: &[Point],
        color: Rgb565,
    ) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let style = PrimitiveStyle::with_fill(color);
        for pair in rest.windows(2) {
            Triangle::new(first, pair[0], pair[1]).into_styled(style).draw(self.target).ok();
        }
    }

    fn draw_bitmap_in_rect(
        &mut self,
        bitmap: &Bitmap<'_>,
        rect: Rectangle,
        mode: CompositingMode,
    ) {
        let size = bitmap.size();
        let width = size.width.min(rect.size.width);
        let height = size.height.min(rect.size.height);
        let pixels = (0..height).flat_map(|y| {
            (0..width).filter_map(move |x| {
                bitmap
                    .color_at(x, y, mode)
                    .map(|color| Pixel(rect.top_left + Point::new(x as i32, y as i32), color))
            })
        });
        self.target.draw_iter(pixels).ok();
    }
}

// =============================================================================
// Recording Surface (tests)
// =============================================================================

/// Surface that records every call, for draw-order assertions.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum DrawCall {
        FillRect { rect: Rectangle, color: Rgb565 },
        Line { from: Point, to: Point, color: Rgb565, width: u32 },
        Circle { center: Point, radius: u32, color: Rgb565 },
        Radial { rect: Rectangle, inset: u32, color: Rgb565 },
        Polygon { points: Vec<Point>, color: Rgb565 },
        Bitmap { rect: Rectangle, mode: CompositingMode },
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        fn fill_rect(
            &mut self,
            rect: Rectangle,
            color: Rgb565,
        ) {
            self.calls.push(DrawCall::FillRect { rect, color });
        }

        fn draw_line(
            &mut self,
            from: Point,
            to: Point,
            color: Rgb565,
            width: u32,
        ) {
            self.calls.push(DrawCall::Line { from, to, color, width });
        }

        fn fill_circle(
            &mut self,
            center: Point,
            radius: u32,
            color: Rgb565,
        ) {
            self.calls.push(DrawCall::Circle { center, radius, color });
        }

        fn fill_radial(
            &mut self,
            rect: Rectangle,
            _mode: OvalScaleMode,
            inset: u32,
            _start: Angle,
            _end: Angle,
            color: Rgb565,
        ) {
            self.calls.push(DrawCall::Radial { rect, inset, color });
        }

        fn fill_polygon(
            &mut self,
            points: &[Point],
            color: Rgb565,
        ) {
            self.calls.push(DrawCall::Polygon { points: points.to_vec(), color });
        }

        fn draw_bitmap_in_rect(
            &mut self,
            _bitmap: &Bitmap<'_>,
            rect: Rectangle,
            mode: CompositingMode,
        ) {
            self.calls.push(DrawCall::Bitmap { rect, mode });
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
