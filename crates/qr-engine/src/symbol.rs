//! QR symbol encoding via the `qrcode` crate.
//!
//! A [`Symbol`] is the bare module grid (no quiet zone) together with the
//! version it was encoded at. The probe pass picks the smallest version that
//! fits; the commit pass re-encodes at exactly that version.

use qrcode::{Color, QrCode, Version};
use tracing::debug;

use crate::{ERROR_CORRECTION, QrImageError, Result};

/// An immutable, square grid of dark/light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,
    width: u32,
    dark: Vec<bool>,
}

impl Symbol {
    /// Encode `text` with automatic version selection.
    pub fn probe(text: &str) -> Result<Self> {
        ensure_text(text)?;
        let code = QrCode::with_error_correction_level(text.as_bytes(), ERROR_CORRECTION)?;
        let symbol = Self::from_code(&code);
        debug!(
            version = ?symbol.version,
            modules = symbol.width,
            "Probed QR symbol"
        );
        Ok(symbol)
    }

    /// Encode `text` at a fixed `version`.
    pub fn encode_at(text: &str, version: Version) -> Result<Self> {
        ensure_text(text)?;
        let code = QrCode::with_version(text.as_bytes(), version, ERROR_CORRECTION)?;
        Ok(Self::from_code(&code))
    }

    fn from_code(code: &QrCode) -> Self {
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Self {
            version: code.version(),
            width: code.width() as u32,
            dark,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length of the data grid in modules.
    pub fn module_count(&self) -> u32 {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark.
    ///
    /// Coordinates outside the grid read as light, which is what the quiet
    /// zone needs.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = i64::from(self.width);
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.dark[(y * w + x) as usize]
    }
}

fn ensure_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(QrImageError::EmptyInput);
    }
    Ok(())
}
