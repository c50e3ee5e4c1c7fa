//! Static scenery painted under the hands.
//!
//! On the watch the portrait and the date are separate bitmap and text layers
//! below the hand layer. The simulator has a single framebuffer, so they are
//! painted on every redraw between the background fill and the face.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Ellipse, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_12_POINT;
use sprinkles_common::colors::{BLACK, SKIN_YELLOW, WHITE};
use sprinkles_common::{Configuration, RenderStyle};

/// Date box size.
pub const DATE_BOX_SIZE: Size = Size::new(24, 18);

/// Gap between the date box and the right edge of the frame.
pub const DATE_BOX_MARGIN: u32 = 8;

const HEAD_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(SKIN_YELLOW);

const SOCKET_STYLE: PrimitiveStyle<Rgb565> =
    PrimitiveStyleBuilder::new().fill_color(WHITE).stroke_color(BLACK).stroke_width(1).build();

const DATE_TEXT: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).baseline(Baseline::Middle).build();

/// Portrait and date box positions resolved for one frame size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backdrop {
    portrait: Rectangle,
    eyes: [Rectangle; 2],
    date_box: Rectangle,
    day: u32,
}

impl Backdrop {
    pub fn new(
        style: &RenderStyle,
        frame: &Rectangle,
        day: u32,
    ) -> Self {
        let date_box = Rectangle::new(
            Point::new(
                frame.top_left.x + (frame.size.width - DATE_BOX_MARGIN - DATE_BOX_SIZE.width) as i32,
                frame.center().y - ((DATE_BOX_SIZE.height - 1) / 2) as i32,
            ),
            DATE_BOX_SIZE,
        );
        Self {
            portrait: style.portrait_rect(frame),
            eyes: style.eye_rects(frame),
            date_box,
            day,
        }
    }

    #[inline]
    pub const fn date_box(&self) -> Rectangle { self.date_box }

    #[inline]
    pub const fn eyes(&self) -> [Rectangle; 2] { self.eyes }

    /// Paint the portrait, then the date box when enabled.
    pub fn draw<D>(
        &self,
        display: &mut D,
        settings: &Configuration,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        Ellipse::new(self.portrait.top_left, self.portrait.size).into_styled(HEAD_STYLE).draw(display).ok();
        for eye in self.eyes {
            Ellipse::new(eye.top_left, eye.size).into_styled(SOCKET_STYLE).draw(display).ok();
        }

        if settings.date_enabled {
            self.draw_date(display, settings);
        }
    }

    fn draw_date<D>(
        &self,
        display: &mut D,
        settings: &Configuration,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.date_box.into_styled(PrimitiveStyle::with_fill(settings.date_background_color)).draw(display).ok();

        let mut label: heapless::String<4> = heapless::String::new();
        write!(label, "{}", self.day).ok();
        let style = MonoTextStyle::new(&PROFONT_12_POINT, settings.date_text_color);
        Text::with_text_style(&label, self.date_box.center(), style, DATE_TEXT).draw(display).ok();
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;
    use sprinkles_common::FaceShape;
    use sprinkles_common::colors::SKY_BLUE;

    use super::*;

    fn display_for(shape: FaceShape) -> SimulatorDisplay<Rgb565> {
        let mut display = SimulatorDisplay::new(shape.screen_size());
        display.clear(SKY_BLUE).ok();
        display
    }

    #[test]
    fn test_portrait_and_sockets() {
        let shape = FaceShape::Rectangular;
        let frame = shape.frame();
        let backdrop = Backdrop::new(&RenderStyle::donut(shape), &frame, 17);
        let mut display = display_for(shape);
        backdrop.draw(&mut display, &Configuration::default());

        for eye in backdrop.eyes() {
            assert_eq!(display.get_pixel(eye.center()), WHITE, "socket at {eye:?} should be white");
        }
        assert_eq!(display.get_pixel(Point::new(0, 0)), SKY_BLUE, "corner is outside the head");
        let chin = Point::new(frame.center().x, frame.bottom_right().map_or(0, |p| p.y) - 2);
        assert_eq!(display.get_pixel(chin), SKIN_YELLOW);
    }

    #[test]
    fn test_date_box_follows_toggle_and_colors() {
        let shape = FaceShape::Round;
        let frame = shape.frame();
        let backdrop = Backdrop::new(&RenderStyle::sprinkles(shape), &frame, 5);
        let corner = backdrop.date_box().top_left + Point::new(1, 1);

        let mut display = display_for(shape);
        backdrop.draw(&mut display, &Configuration::default());
        assert_ne!(display.get_pixel(corner), WHITE, "date box is hidden by default");

        let settings = Configuration {
            date_enabled: true,
            date_background_color: Rgb565::RED,
            ..Configuration::default()
        };
        let mut display = display_for(shape);
        backdrop.draw(&mut display, &settings);
        assert_eq!(display.get_pixel(corner), Rgb565::RED);
        let inked = backdrop.date_box().points().filter(|&p| display.get_pixel(p) == settings.date_text_color).count();
        assert!(inked > 0, "the day number should be printed in the text color");
    }

    #[test]
    fn test_date_box_sits_right_of_center() {
        let frame = FaceShape::Rectangular.frame();
        let backdrop = Backdrop::new(&RenderStyle::donut(FaceShape::Rectangular), &frame, 1);
        let date_box = backdrop.date_box();
        assert!(date_box.top_left.x > frame.center().x);
        assert_eq!(date_box.center().y, frame.center().y);
        assert!(frame.contains(date_box.bottom_right().unwrap_or_default()));
    }
}
