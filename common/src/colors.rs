//! Color constants for the watchface.
//!
//! The watch hardware renders a 64-color palette (2 bits per channel). Colors
//! coming from the phone settings page are 24-bit `0xRRGGBB` values, so they
//! are first snapped to that palette with [`quantize_hex`] and then stored as
//! `Rgb565`, the native format of the embedded-graphics targets.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Default hand and pivot color.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Eye sockets and default date background.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Watchface Colors
// =============================================================================

/// Sky blue window background (`0x60B8E3`).
pub const SKY_BLUE: Rgb565 = from_hex(0x60B8E3);

/// Logo red used for the elongated accent segment of the major hands (`0xF0182D`).
pub const LOGO_RED: Rgb565 = from_hex(0xF0182D);

/// Portrait skin tone.
pub const SKIN_YELLOW: Rgb565 = from_hex(0xFFD90F);

// Donut sprite palette
pub const DOUGH: Rgb565 = from_hex(0xD9A066);
pub const FROSTING_PINK: Rgb565 = from_hex(0xFF6FB5);
pub const OUTLINE_BROWN: Rgb565 = from_hex(0x5A3A1E);
pub const SPRINKLE_YELLOW: Rgb565 = from_hex(0xFFEE55);
pub const SPRINKLE_BLUE: Rgb565 = from_hex(0x3F7FFF);

// =============================================================================
// Conversion Helpers
// =============================================================================

/// Convert a 24-bit `0xRRGGBB` color to RGB565 by truncating each channel.
pub const fn from_hex(hex: u32) -> Rgb565 {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Snap a 24-bit color to the 64-color palette.
///
/// Each channel is rounded to the nearest multiple of 85 (0, 85, 170, 255).
pub const fn quantize_hex(hex: u32) -> u32 {
    let r = quantize_channel((hex >> 16) & 0xFF);
    let g = quantize_channel((hex >> 8) & 0xFF);
    let b = quantize_channel(hex & 0xFF);
    (r << 16) | (g << 8) | b
}

const fn quantize_channel(channel: u32) -> u32 { (channel + 42) / 85 * 85 }
