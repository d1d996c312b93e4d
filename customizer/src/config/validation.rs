//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

use super::defaults::{BACKGROUND, BORDER, EXPORT_DIR, FOREGROUND, PIXEL_SIZE, PREVIEW_SIZE};

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").unwrap());

pub const MAX_PIXEL_SIZE: u32 = 10_000;
pub const MAX_BORDER: u32 = 10;
pub const MIN_PREVIEW_SIZE: u32 = 16;
pub const MAX_PREVIEW_SIZE: u32 = 2048;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        PIXEL_SIZE => validate_int_range(value, 1, MAX_PIXEL_SIZE)?,
        BORDER => validate_int_range(value, 0, MAX_BORDER)?,
        PREVIEW_SIZE => validate_int_range(value, MIN_PREVIEW_SIZE, MAX_PREVIEW_SIZE)?,
        FOREGROUND | BACKGROUND => {
            if !RE_HEX_COLOR.is_match(value) {
                return Err("must be a hex color like #3a7bd5".into());
            }
        }
        EXPORT_DIR => {
            if value.contains('\0') {
                return Err("must not contain NUL bytes".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: u32, max: u32) -> Result<(), String> {
    let v: u32 = value.trim().parse().map_err(|_| "must be a non-negative integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
