//! Live preview rendering.
//!
//! The preview is always drawn at the configured preview size, whatever size
//! the user asked to export.

use image::RgbImage;
use qr_engine::{RenderRequest, render};
use tracing::debug;

use crate::editor::EditorState;
use crate::status::Status;

/// What the preview pane should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preview {
    /// Nothing to show (no text entered).
    #[default]
    Cleared,
    Image(RgbImage),
    /// Rendering failed; the pane is cleared and the status carries the reason.
    Failed,
}

impl Preview {
    pub fn image(&self) -> Option<&RgbImage> {
        match self {
            Preview::Image(img) => Some(img),
            _ => None,
        }
    }
}

/// Render the preview for `state` at `preview_size` pixels.
pub fn render_preview(state: &EditorState, preview_size: u32) -> (Preview, Status) {
    let text = state.text.trim();
    if text.is_empty() {
        return (Preview::Cleared, Status::Ready);
    }

    let request = RenderRequest::new(text, preview_size, state.border)
        .with_colors(state.foreground, state.background);

    match render(&request) {
        Ok(img) => {
            debug!(preview_size, border = state.border, "Preview rendered");
            (
                Preview::Image(img),
                Status::PreviewUpdated {
                    size: preview_size,
                    border: state.border,
                },
            )
        }
        Err(e) => {
            debug!("Preview failed: {e}");
            (Preview::Failed, Status::PreviewError(e.to_string()))
        }
    }
}
