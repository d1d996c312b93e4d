//! Image resizing for QR rasters.
//!
//! Always nearest-neighbour: module edges must stay crisp for scanners.

use image::RgbImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Resize a square image to `side` x `side` pixels.
///
/// Returns a copy of the original if it already has the target size.
pub fn resize_square_nearest(img: &RgbImage, side: u32) -> RgbImage {
    let (orig_w, orig_h) = img.dimensions();

    if orig_w == side && orig_h == side {
        debug!(side, "Image already at target size, skipping resize");
        return img.clone();
    }

    debug!(
        orig_w,
        orig_h,
        new_side = side,
        "Resizing QR raster with nearest-neighbour sampling"
    );

    imageops::resize(img, side, side, FilterType::Nearest)
}
