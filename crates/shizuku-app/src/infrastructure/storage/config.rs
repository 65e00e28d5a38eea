//! JSON-based configuration persistence for the desktop backend.
//!
//! Reads and writes [`AppConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\LoliaShizuku\config.json`
//! - Linux:    `~/.config/LoliaShizuku/config.json`
//! - macOS:    `~/Library/Application Support/LoliaShizuku/config.json`
//!
//! The base directory comes from [`dirs::config_dir`] unless an explicit base
//! directory is supplied (tests, `--config-dir`).
//!
//! # Lifecycle
//!
//! ```text
//! ConfigStore::new()        -- defaults in memory, no path yet
//!  └─ initialize()          -- create dir, then write defaults OR load file
//!       ├─ load()           -- overlay file contents on defaults
//!       ├─ update_*()       -- mutate + save (skipped when nothing changed)
//!       └─ reset_to_defaults()
//! ```
//!
//! Every save overwrites the whole file.  There is no atomic rename and no
//! backup: the last write wins.
//!
//! # Concurrency
//!
//! `ConfigStore` is a plain owned value with `&mut self` mutators.  Callers
//! that share it between tasks wrap it in a `tokio::sync::Mutex` (see
//! `ui_bridge::AppState`), which makes every read-modify-write sequence
//! atomic with respect to other callers.

use std::fs;
use std::path::{Path, PathBuf};

use shizuku_core::config::{AppConfig, ConfigParseError};
use thiserror::Error;
use tracing::{debug, info};

/// Application-specific sub-directory inside the per-user config directory.
pub const APP_DIR_NAME: &str = "LoliaShizuku";

/// File name of the settings document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON content could not be parsed.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] ConfigParseError),

    /// The config could not be serialized to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// `load`/`save` was called before `initialize` established a path.
    #[error("config store has not been initialized")]
    NotInitialized,
}

/// Owner of the live configuration record and its backing file.
#[derive(Debug)]
pub struct ConfigStore {
    /// Overrides the platform config directory when set.
    base_dir: Option<PathBuf>,
    /// Set by `initialize`; `None` means "not initialized".
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates a store holding the default configuration.
    ///
    /// The file location is resolved from the platform config directory when
    /// [`initialize`](Self::initialize) runs.
    pub fn new() -> Self {
        Self {
            base_dir: None,
            config_path: None,
            config: AppConfig::default(),
        }
    }

    /// Creates a store that keeps its files under `base_dir/LoliaShizuku/`
    /// instead of the platform config directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Self::new()
        }
    }

    /// Establishes the config path, then creates or loads the file.
    ///
    /// Creates `<base>/LoliaShizuku/` if needed.  When `config.json` does not
    /// exist the default configuration is written; otherwise it is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no base directory can
    /// be resolved, [`ConfigError::Io`] for directory/file failures, and
    /// [`ConfigError::Parse`] when the existing file is malformed.  The path
    /// is recorded before the file is read, so the store counts as
    /// initialized even when loading fails.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        let dir = self.app_config_dir()?;
        fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(CONFIG_FILE_NAME);
        self.config_path = Some(path.clone());

        match fs::metadata(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no config file at {}; writing defaults", path.display());
                self.save()
            }
            _ => {
                debug!("loading config from {}", path.display());
                self.load()
            }
        }
    }

    /// Replaces the in-memory configuration with the file contents overlaid on
    /// the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`], [`ConfigError::Io`] on read failure,
    /// or [`ConfigError::Parse`] on malformed JSON.  The in-memory record is
    /// left untouched on error.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let path = self.path()?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = AppConfig::from_json_overlay(&content)?;
        self.config = config;
        Ok(())
    }

    /// Writes the in-memory configuration to disk as indented JSON,
    /// overwriting the whole file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`], [`ConfigError::Serialize`], or
    /// [`ConfigError::Io`] on write failure.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path()?;
        let content = self
            .config
            .to_pretty_json()
            .map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("config saved to {}", path.display());
        Ok(())
    }

    /// `true` once [`initialize`](Self::initialize) has established a path.
    pub fn is_initialized(&self) -> bool {
        self.config_path.is_some()
    }

    /// The config file path, or `None` before initialization.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The live configuration record.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The configuration as indented JSON, for the frontend.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if encoding fails.
    pub fn config_json(&self) -> Result<String, ConfigError> {
        self.config.to_pretty_json().map_err(ConfigError::Serialize)
    }

    /// Replaces the whole configuration with `json` overlaid on the defaults,
    /// then persists it.
    ///
    /// Fields the document omits revert to their defaults; they are not kept
    /// from the previous configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] leaves the current configuration untouched.
    /// Save errors are returned after the in-memory replacement.
    pub fn update_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = AppConfig::from_json_overlay(json)?;
        self.config = config;
        info!("configuration replaced by frontend update");
        self.save()
    }

    /// The stored window size and maximised flag.
    pub fn window_size(&self) -> (u32, u32, bool) {
        let window = &self.config.window;
        (window.width, window.height, window.maximised)
    }

    /// Records a new window size and persists it.
    ///
    /// Returns `Ok(false)` without touching the disk when the store is not
    /// initialized, either dimension is not positive, or the size is
    /// unchanged.  This keeps resize storms from rewriting the file on every
    /// tick.  Returns `Ok(true)` after a successful write.
    ///
    /// # Errors
    ///
    /// Propagates [`save`](Self::save) failures.
    pub fn update_window_size(&mut self, width: i32, height: i32) -> Result<bool, ConfigError> {
        if !self.is_initialized() {
            return Ok(false);
        }
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Ok(false);
        };
        if width == 0 || height == 0 {
            return Ok(false);
        }
        let window = &mut self.config.window;
        if window.width == width && window.height == height {
            return Ok(false);
        }

        window.width = width;
        window.height = height;
        self.save()?;
        Ok(true)
    }

    /// Records the maximised flag and persists it.
    ///
    /// Same guards as [`update_window_size`](Self::update_window_size):
    /// `Ok(false)` when uninitialized or unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`save`](Self::save) failures.
    pub fn update_window_maximised(&mut self, maximised: bool) -> Result<bool, ConfigError> {
        if !self.is_initialized() || self.config.window.maximised == maximised {
            return Ok(false);
        }

        self.config.window.maximised = maximised;
        self.save()?;
        Ok(true)
    }

    /// Restores the default configuration and persists it immediately.
    ///
    /// # Errors
    ///
    /// Propagates [`save`](Self::save) failures.
    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.config = AppConfig::default();
        info!("configuration reset to defaults");
        self.save()
    }

    fn path(&self) -> Result<&Path, ConfigError> {
        self.config_path().ok_or(ConfigError::NotInitialized)
    }

    /// `<base>/LoliaShizuku`, where `<base>` is the override or the platform
    /// config directory.
    fn app_config_dir(&self) -> Result<PathBuf, ConfigError> {
        let base = self
            .base_dir
            .clone()
            .or_else(dirs::config_dir)
            .ok_or(ConfigError::NoPlatformConfigDir)?;
        Ok(base.join(APP_DIR_NAME))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
