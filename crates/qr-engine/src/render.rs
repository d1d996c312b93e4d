//! Two-pass QR rendering at an exact pixel size.
//!
//! The probe pass learns the module grid, the sizing plan picks the largest
//! integer box size that does not overshoot, the commit pass paints the symbol
//! at the probe's version and a final nearest-neighbour resample lands on the
//! requested size.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::resize::resize_square_nearest;
use crate::sizing::SizingPlan;
use crate::symbol::Symbol;
use crate::{QrImageError, Result};

/// Everything needed to render one QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub text: String,
    pub desired_pixel_size: u32,
    pub border_modules: u32,
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl RenderRequest {
    /// A black-on-white request.
    pub fn new(text: impl Into<String>, desired_pixel_size: u32, border_modules: u32) -> Self {
        Self {
            text: text.into(),
            desired_pixel_size,
            border_modules,
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }

    pub fn with_colors(mut self, foreground: Rgb<u8>, background: Rgb<u8>) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Check the request's own invariants before any encoding work.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(QrImageError::EmptyInput);
        }
        if self.desired_pixel_size == 0 {
            return Err(QrImageError::InvalidDimension(
                "desired pixel size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Render `request` into a square image of exactly `desired_pixel_size` pixels.
pub fn render(request: &RenderRequest) -> Result<RgbImage> {
    request.validate()?;

    let probe = Symbol::probe(&request.text)?;
    let plan = SizingPlan::new(
        probe.module_count(),
        request.border_modules,
        request.desired_pixel_size,
    )?;
    debug!(
        modules = plan.module_count,
        border = plan.border_modules,
        box_size = plan.box_size,
        native_side = plan.native_side(),
        target = plan.desired_pixel_size,
        "Computed QR sizing plan"
    );

    let symbol = Symbol::encode_at(&request.text, probe.version())?;

    // Fewer pixels than modules: sample modules straight into the output so
    // the buffer never exceeds the requested size.
    if plan.desired_pixel_size < plan.total_modules {
        return Ok(paint_sampled(
            &symbol,
            &plan,
            request.foreground,
            request.background,
        ));
    }

    let native = paint(&symbol, &plan, request.foreground, request.background);
    if plan.needs_resize() {
        Ok(resize_square_nearest(&native, plan.desired_pixel_size))
    } else {
        Ok(native)
    }
}

/// Convenience wrapper taking the parameters positionally.
pub fn render_qr(
    text: &str,
    desired_pixel_size: u32,
    border_modules: u32,
    foreground: Rgb<u8>,
    background: Rgb<u8>,
) -> Result<RgbImage> {
    render(
        &RenderRequest::new(text, desired_pixel_size, border_modules)
            .with_colors(foreground, background),
    )
}

/// Paint `symbol` with its quiet zone at `plan.box_size` pixels per module.
fn paint(symbol: &Symbol, plan: &SizingPlan, fg: Rgb<u8>, bg: Rgb<u8>) -> RgbImage {
    let side = plan.native_side();
    let box_size = plan.box_size;
    let border = i64::from(plan.border_modules);

    RgbImage::from_fn(side, side, |x, y| {
        let mx = i64::from(x / box_size) - border;
        let my = i64::from(y / box_size) - border;
        if symbol.is_dark(mx, my) { fg } else { bg }
    })
}

/// Paint directly at `plan.desired_pixel_size`, picking the module under each
/// output pixel's centre (nearest-neighbour).
fn paint_sampled(symbol: &Symbol, plan: &SizingPlan, fg: Rgb<u8>, bg: Rgb<u8>) -> RgbImage {
    let side = plan.desired_pixel_size;
    let total = u64::from(plan.total_modules);
    let border = i64::from(plan.border_modules);
    let module_at = |px: u32| -> i64 {
        let m = (2 * u64::from(px) + 1) * total / (2 * u64::from(side));
        m as i64 - border
    };

    RgbImage::from_fn(side, side, |x, y| {
        if symbol.is_dark(module_at(x), module_at(y)) { fg } else { bg }
    })
}
