//! SettingsStore: JSON-file-backed settings with defaults and validation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::SettingInfo;
use super::defaults::DEFAULT_SETTINGS;
use super::validation::validate_setting;

/// Key/value settings persisted as a flat JSON object.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl SettingsStore {
    /// Open the settings file at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, anyhow::Error> {
        let path = path.into();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid settings file {}: {e}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// A store that is never written to disk.
    pub fn open_in_memory() -> Self {
        Self::default()
    }

    /// Get a setting value. Falls back to default if not stored.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        if let Some(val) = self.values.get(key) {
            return Ok(val.clone());
        }
        if let Some(def) = DEFAULT_SETTINGS.get(key) {
            return Ok(def.default.to_string());
        }
        anyhow::bail!("setting not found: {key}");
    }

    /// Set a setting value with validation. Call [`save`](Self::save) to persist.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        if !DEFAULT_SETTINGS.contains_key(key) {
            anyhow::bail!("unknown setting key: {key}");
        }
        validate_setting(key, value).map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Get all settings, filling in defaults for missing keys.
    pub fn get_all_settings(&self) -> BTreeMap<String, SettingInfo> {
        DEFAULT_SETTINGS
            .values()
            .map(|def| {
                let stored = self.values.get(def.key);
                let info = SettingInfo {
                    key: def.key.to_string(),
                    value: stored.cloned().unwrap_or_else(|| def.default.to_string()),
                    description: def.description.to_string(),
                    is_default: stored.is_none_or(|v| v == def.default),
                };
                (def.key.to_string(), info)
            })
            .collect()
    }

    /// Store defaults for every key not yet present (skip existing).
    ///
    /// Stored values that no longer validate are replaced by their default.
    pub fn initialize_defaults(&mut self) {
        for (key, def) in DEFAULT_SETTINGS.iter() {
            match self.values.get(*key) {
                Some(value) if validate_setting(key, value).is_ok() => continue,
                Some(value) => {
                    tracing::warn!("Resetting invalid setting {key}={value:?} to default");
                }
                None => {}
            }
            self.values.insert(key.to_string(), def.default.to_string());
        }
    }

    /// Write the store back to its file. A no-op for in-memory stores.
    pub fn save(&self) -> Result<(), anyhow::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, json)?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}
