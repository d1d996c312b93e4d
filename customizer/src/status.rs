//! User-facing status line messages.

use std::fmt;
use std::path::PathBuf;

/// What the status line currently says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    PreviewUpdated {
        size: u32,
        border: u32,
    },
    PreviewError(String),
    Saved {
        path: PathBuf,
        size: u32,
        border: u32,
    },
    SaveCanceled,
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::PreviewError(_) | Status::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::PreviewUpdated { size, border } => {
                write!(f, "Preview updated ({size}x{size}px, border={border})")
            }
            Status::PreviewError(e) => write!(f, "Preview error: {e}"),
            Status::Saved { path, size, border } => write!(
                f,
                "Saved: {} ({size}x{size}px, border={border})",
                path.display()
            ),
            Status::SaveCanceled => write!(f, "Save canceled."),
            Status::Error(e) => write!(f, "Error: {e}"),
        }
    }
}
