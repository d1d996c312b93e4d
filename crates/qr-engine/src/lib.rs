//! QR code rasterisation at an exact pixel size.
//!
//! Encodes text as a QR symbol (error-correction level H), surrounds it with a
//! quiet zone of background modules, paints it with caller-chosen colors and
//! scales it to a requested square size without smoothing.

pub mod color;
pub mod render;
pub mod resize;
pub mod sizing;
pub mod symbol;

// Re-exports for convenience
pub use color::{contrast_text_color, parse_hex_color, to_hex};
pub use render::{RenderRequest, render, render_qr};
pub use resize::resize_square_nearest;
pub use sizing::SizingPlan;
pub use symbol::Symbol;

/// Error-correction level used for every symbol.
pub const ERROR_CORRECTION: qrcode::EcLevel = qrcode::EcLevel::H;

/// Errors that can occur while producing a QR image.
#[derive(Debug, thiserror::Error)]
pub enum QrImageError {
    #[error("No data provided for QR code")]
    EmptyInput,

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("QR encode error: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    #[error("Invalid color {0:?}: expected #rrggbb or #rgb")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, QrImageError>;
