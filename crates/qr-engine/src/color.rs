//! Hex color parsing and formatting.

use image::Rgb;

use crate::{QrImageError, Result};

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` into an RGB triple.
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || QrImageError::InvalidColor(value.to_string());

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
        }
        3 => {
            // #abc expands to #aabbcc
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|v| v * 17)
                    .map_err(|_| invalid())
            };
            Ok(Rgb([channel(0)?, channel(1)?, channel(2)?]))
        }
        _ => Err(invalid()),
    }
}

/// Format a color as lowercase `#rrggbb`.
pub fn to_hex(color: Rgb<u8>) -> String {
    let Rgb([r, g, b]) = color;
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Pick black or white, whichever stays readable on top of `background`.
pub fn contrast_text_color(background: Rgb<u8>) -> Rgb<u8> {
    let Rgb([r, g, b]) = background;
    let brightness = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    if brightness >= 128 {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}
