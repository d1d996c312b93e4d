//! Runtime application configuration loaded from the settings file + environment overrides.

use std::path::PathBuf;

use image::Rgb;
use qr_engine::{parse_hex_color, to_hex};

use super::defaults::{
    BACKGROUND, BORDER, ENV_PREFIX, EXPORT_DIR, FOREGROUND, PIXEL_SIZE, PREVIEW_SIZE, get_default,
};
use super::manager::SettingsStore;
use super::validation::validate_setting;

/// Runtime configuration populated from the settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub pixel_size: u32,
    pub border: u32,
    pub preview_size: u32,
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
    /// Empty means "let the platform decide".
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pixel_size: 40,
            border: 1,
            preview_size: 200,
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings store, with `QR_*` environment overrides.
    pub fn load(store: &SettingsStore) -> Result<Self, anyhow::Error> {
        Self::load_with_env(store, |name| std::env::var(name).ok())
    }

    /// Like [`load`](Self::load) but reading overrides through `env`.
    pub fn load_with_env(
        store: &SettingsStore,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let env_name = format!("{ENV_PREFIX}{key}");
            if let Some(v) = env(&env_name).filter(|v| !v.is_empty()) {
                if validate_setting(key, &v).is_ok() {
                    return Ok(v);
                }
                tracing::warn!("Ignoring invalid {env_name}={v:?}");
            }
            let v = store.get_setting(key)?;
            if let Err(e) = validate_setting(key, &v) {
                tracing::warn!("Invalid setting {key}={v:?} ({e}), using default");
                return Ok(get_default(key).unwrap_or_default().to_string());
            }
            Ok(v)
        };

        let export_dir = g(EXPORT_DIR)?;

        Ok(Self {
            pixel_size: parse_u32(&g(PIXEL_SIZE)?, 40),
            border: parse_u32(&g(BORDER)?, 1),
            preview_size: parse_u32(&g(PREVIEW_SIZE)?, 200),
            foreground: parse_hex_color(&g(FOREGROUND)?).unwrap_or(Rgb([0, 0, 0])),
            background: parse_hex_color(&g(BACKGROUND)?).unwrap_or(Rgb([255, 255, 255])),
            export_dir: if export_dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(export_dir))
            },
        })
    }

    /// Write this config into `store` as the new persisted values.
    pub fn store_into(&self, store: &mut SettingsStore) -> Result<(), anyhow::Error> {
        store.set_setting(PIXEL_SIZE, &self.pixel_size.to_string())?;
        store.set_setting(BORDER, &self.border.to_string())?;
        store.set_setting(PREVIEW_SIZE, &self.preview_size.to_string())?;
        store.set_setting(FOREGROUND, &to_hex(self.foreground))?;
        store.set_setting(BACKGROUND, &to_hex(self.background))?;
        let dir = self
            .export_dir
            .as_ref()
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_default();
        store.set_setting(EXPORT_DIR, &dir)?;
        Ok(())
    }
}

fn parse_u32(s: &str, default: u32) -> u32 {
    if s.is_empty() {
        return default;
    }
    s.trim().parse().unwrap_or(default)
}
