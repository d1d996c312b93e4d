//! PNG export at the user's requested size.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use qr_engine::{QrImageError, RenderRequest, render};
use tracing::info;

use crate::config::AppConfig;
use crate::editor::EditorState;

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Please enter text or a URL to encode.")]
    EmptyText,

    #[error("Pixel size must be a positive integer.")]
    InvalidPixelSize,

    #[error("Failed to generate or save QR: {0}")]
    Render(#[from] QrImageError),

    #[error("Failed to generate or save QR: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to generate or save QR: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated export, ready to be written once a destination is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub text: String,
    pub pixel_size: u32,
    pub border: u32,
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl ExportJob {
    /// Validate the editor state. Text is trimmed; the size field must be a positive integer.
    pub fn from_state(state: &EditorState) -> Result<Self, ExportError> {
        let text = state.text.trim();
        if text.is_empty() {
            return Err(ExportError::EmptyText);
        }
        let pixel_size = parse_pixel_size(&state.pixel_size_input).ok_or(ExportError::InvalidPixelSize)?;
        Ok(Self {
            text: text.to_string(),
            pixel_size,
            border: state.border,
            foreground: state.foreground,
            background: state.background,
        })
    }

    pub fn render(&self) -> Result<RgbImage, ExportError> {
        let request = RenderRequest::new(self.text.as_str(), self.pixel_size, self.border)
            .with_colors(self.foreground, self.background);
        Ok(render(&request)?)
    }

    /// Render and write a PNG to `path`, returning the path actually written.
    pub fn write_png(&self, path: &Path) -> Result<PathBuf, ExportError> {
        let path = ensure_png_extension(path);
        let img = self.render()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        img.save_with_format(&path, ImageFormat::Png)?;
        info!(
            path = %path.display(),
            size = self.pixel_size,
            border = self.border,
            "Exported QR code"
        );
        Ok(path)
    }
}

/// Parse the size field. Only positive integers are accepted.
pub fn parse_pixel_size(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|&n| n > 0)
}

/// Append `.png` when `path` has no extension.
pub fn ensure_png_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Directory the save dialog should open in.
pub fn default_export_dir(config: &AppConfig) -> PathBuf {
    config
        .export_dir
        .clone()
        .or_else(dirs::picture_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Suggested file path, e.g. `~/Pictures/qr_20260101_120000.png`.
pub fn default_export_path(config: &AppConfig) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    default_export_dir(config).join(format!("qr_{stamp}.png"))
}
