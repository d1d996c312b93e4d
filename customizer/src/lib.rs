//! Front-end core for the QR code customizer.
//!
//! Holds editor state, runs the preview/export cycle and loads settings. A
//! GUI shell binds its widgets to [`editor::Editor`] and draws what the
//! subscribers receive.

pub mod config;
pub mod editor;
pub mod export;
pub mod preview;
pub mod status;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, SettingsStore};
pub use editor::{Editor, EditorEvent, EditorState, EditorView};
pub use preview::Preview;
pub use status::Status;

/// Install the global `tracing` subscriber. Call once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Determine the data directory for the application.
/// Priority: QR_CUSTOMIZER_DATA_DIR env var > ~/.qr-customizer
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QR_CUSTOMIZER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".qr-customizer")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env, open the settings file and build the runtime config.
pub fn init_foundation() -> Result<(SettingsStore, AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let settings_path = dir.join("settings.json");

    tracing::info!("Opening settings at {}", settings_path.display());
    let mut store = SettingsStore::open(&settings_path)?;
    store.initialize_defaults();
    if let Err(e) = store.save() {
        tracing::error!("Failed to write settings: {e}");
    }

    let config = AppConfig::load(&store)?;
    tracing::info!(
        "Settings loaded (size={}, border={}, preview={})",
        config.pixel_size,
        config.border,
        config.preview_size
    );
    Ok((store, config, dir))
}
