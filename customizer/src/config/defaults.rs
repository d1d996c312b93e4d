//! All setting definitions with their default values.

use std::collections::BTreeMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

pub const PIXEL_SIZE: &str = "PIXEL_SIZE";
pub const BORDER: &str = "BORDER";
pub const PREVIEW_SIZE: &str = "PREVIEW_SIZE";
pub const FOREGROUND: &str = "FOREGROUND";
pub const BACKGROUND: &str = "BACKGROUND";
pub const EXPORT_DIR: &str = "EXPORT_DIR";

/// Prefix for environment variables overriding a setting (`QR_PIXEL_SIZE`, ...).
pub const ENV_PREFIX: &str = "QR_";

const DEFS: &[DefTuple] = &[
    (PIXEL_SIZE, "40", "Exported image width and height in pixels"),
    (BORDER, "1", "Quiet zone width in modules (0 = none, 4 is typical)"),
    (PREVIEW_SIZE, "200", "Preview pane width and height in pixels"),
    (FOREGROUND, "#000000", "Module color"),
    (BACKGROUND, "#ffffff", "Background and quiet zone color"),
    (EXPORT_DIR, "", "Directory suggested by the save dialog (empty = Pictures)"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<BTreeMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
