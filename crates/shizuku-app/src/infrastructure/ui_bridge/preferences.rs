//! Window preferences exposed to the frontend.
//!
//! A thin facade over [`ConfigStore`] that only touches the `window` section.
//! The frontend listens for `window_changed` events and calls
//! `save_window_size` / `save_window_maximised`; the store's idempotence
//! guards make repeated calls with unchanged values free.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{AppState, CommandResult};
use crate::infrastructure::storage::config::{ConfigError, ConfigStore};

/// Persisted window geometry returned to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSizeDto {
    pub width: u32,
    pub height: u32,
    pub maximised: bool,
}

/// Reads and writes the window preferences through the shared store.
#[derive(Clone)]
pub struct PreferencesService {
    config: Arc<Mutex<ConfigStore>>,
}

impl PreferencesService {
    pub fn new(config: Arc<Mutex<ConfigStore>>) -> Self {
        Self { config }
    }

    /// The stored window size and maximised flag.
    pub async fn get_window_size(&self) -> WindowSizeDto {
        let (width, height, maximised) = self.config.lock().await.window_size();
        WindowSizeDto {
            width,
            height,
            maximised,
        }
    }

    /// Persists a new window size; see [`ConfigStore::update_window_size`].
    pub async fn save_window_size(&self, width: i32, height: i32) -> Result<bool, ConfigError> {
        self.config.lock().await.update_window_size(width, height)
    }

    /// Persists the maximised flag; see [`ConfigStore::update_window_maximised`].
    pub async fn save_window_maximised(&self, maximised: bool) -> Result<bool, ConfigError> {
        self.config.lock().await.update_window_maximised(maximised)
    }
}

// ── Frontend commands ─────────────────────────────────────────────────────────

/// Returns the stored window size and maximised state.
pub async fn get_window_size(state: Arc<AppState>) -> CommandResult<WindowSizeDto> {
    CommandResult::ok(state.preferences.get_window_size().await)
}

/// Persists the window size reported by the frontend.
pub async fn save_window_size(state: Arc<AppState>, width: i32, height: i32) -> CommandResult<()> {
    match state.preferences.save_window_size(width, height).await {
        Ok(wrote) => {
            if wrote {
                debug!("window size saved: {width}x{height}");
            }
            CommandResult::ok(())
        }
        Err(e) => {
            warn!("failed to save window size: {e}");
            CommandResult::err(format!("failed to save config: {e}"))
        }
    }
}

/// Persists the window maximised flag reported by the frontend.
pub async fn save_window_maximised(state: Arc<AppState>, maximised: bool) -> CommandResult<()> {
    match state.preferences.save_window_maximised(maximised).await {
        Ok(_) => CommandResult::ok(()),
        Err(e) => {
            warn!("failed to save maximised state: {e}");
            CommandResult::err(format!("failed to save config: {e}"))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
