//! Application configuration schema and its JSON representation.
//!
//! The configuration is persisted as a single JSON document, for example:
//!
//! ```json
//! {
//!   "version": "0.0.1",
//!   "app": { "autoStart": false },
//!   "theme": { "mode": "auto", "accentColor": "#6200EE" },
//!   "window": { "width": 950, "height": 600, "maximised": false },
//!   "advanced": { "logLevel": "info", "debugMode": false }
//! }
//! ```
//!
//! # Overlay on defaults
//!
//! Every field is annotated with `#[serde(default = "some_fn")]` (or the
//! section with `#[serde(default)]`), so a missing field takes its default
//! value instead of failing the parse.  Parsing therefore behaves like
//! "start from the default record, then overwrite whatever the document
//! supplies": an old config file that predates a newer field still loads, and
//! the in-memory record is always fully populated.
//!
//! A `null` value counts as "not supplied": the section or field keeps its
//! default.  So does a window dimension of `0`.
//!
//! Unknown fields are ignored on parse and dropped on the next save.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The document could not be parsed as a configuration record.
///
/// Covers both malformed JSON and well-formed JSON with a value of the wrong
/// type (e.g. `"width": "wide"` or an unknown theme mode).
#[derive(Debug, Error)]
#[error("invalid configuration document: {0}")]
pub struct ConfigParseError(#[from] serde_json::Error);

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Informational version string; not used for migration.
    #[serde(default = "default_version", deserialize_with = "version_or_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub app: GeneralConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme: ThemeConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub window: WindowConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advanced: AdvancedConfig,
}

/// General application behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralConfig {
    /// Whether the application launches on OS login.
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_start: bool,
}

/// Colour theme selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the OS preference.
    #[default]
    Auto,
}

/// Appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mode: ThemeMode,
    /// CSS colour string, e.g. `"#6200EE"`.
    #[serde(default = "default_accent_color", deserialize_with = "accent_color_or_default")]
    pub accent_color: String,
}

/// Last known main window geometry, restored on the next launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowConfig {
    /// Width in pixels; never zero.
    #[serde(default = "default_window_width", deserialize_with = "width_or_default")]
    pub width: u32,
    /// Height in pixels; never zero.
    #[serde(default = "default_window_height", deserialize_with = "height_or_default")]
    pub height: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maximised: bool,
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConfig {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level", deserialize_with = "log_level_or_default")]
    pub log_level: String,
    /// Forces `debug` logging regardless of `log_level`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub debug_mode: bool,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "0.0.1".to_string()
}
fn default_accent_color() -> String {
    "#6200EE".to_string()
}
fn default_window_width() -> u32 {
    950
}
fn default_window_height() -> u32 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}

// ── Null-tolerant field readers ───────────────────────────────────────────────
//
// `#[serde(default)]` only covers absent keys.  These readers give an explicit
// `null` the same treatment.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Defines a reader that falls back to `$default` for `null` and for any
/// value rejected by `$keep`.
macro_rules! field_or_default {
    ($name:ident, $ty:ty, $default:path) => {
        field_or_default!($name, $ty, $default, |_: &$ty| true);
    };
    ($name:ident, $ty:ty, $default:path, $keep:expr) => {
        fn $name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<$ty, D::Error> {
            Ok(Option::<$ty>::deserialize(deserializer)?
                .filter($keep)
                .unwrap_or_else($default))
        }
    };
}

field_or_default!(version_or_default, String, default_version);
field_or_default!(accent_color_or_default, String, default_accent_color);
field_or_default!(log_level_or_default, String, default_log_level);
field_or_default!(width_or_default, u32, default_window_width, |w: &u32| *w > 0);
field_or_default!(height_or_default, u32, default_window_height, |h: &u32| *h > 0);

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: GeneralConfig::default(),
            theme: ThemeConfig::default(),
            window: WindowConfig::default(),
            advanced: AdvancedConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { auto_start: false }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            accent_color: default_accent_color(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            maximised: false,
        }
    }
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debug_mode: false,
        }
    }
}

// ── JSON conversion ───────────────────────────────────────────────────────────

impl AppConfig {
    /// Parses `json` on top of the default configuration.
    ///
    /// Fields absent from the document (at any nesting level) keep their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError`] if the document is malformed or a present
    /// field has the wrong type.
    pub fn from_json_overlay(json: &str) -> Result<Self, ConfigParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the configuration as 2-space indented JSON.
    ///
    /// # Errors
    ///
    /// Propagates the encoder error.  The schema contains only strings,
    /// integers, and booleans, so this does not fail in practice.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The default `tracing` filter directive implied by the advanced settings.
    pub fn log_directive(&self) -> &str {
        if self.advanced.debug_mode {
            "debug"
        } else {
            &self.advanced.log_level
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
