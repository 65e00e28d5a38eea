//! Frontend command bridge: exposes backend operations to the web UI.
//!
//! Every frontend-callable operation lives here (or in the `preferences`
//! sub-module) and delegates to the shared [`AppState`].  The transport that
//! carries calls from the frontend (see `infrastructure::ipc`) is the only
//! consumer of this module.
//!
//! # How frontend commands work (for beginners)
//!
//! The web UI cannot call Rust directly.  It sends a named request such as
//! `"get_config_json"` over the IPC link; the link looks up the matching
//! command function below, awaits it, and writes the serialised result back:
//!
//! ```text
//! Web UI (TypeScript)          IPC link             Rust backend
//! ─────────────────────────────────────────────────────────────────
//! call("get_config_json")  ─────────────────────>  get_config_json()
//!                          <─────────────────────  CommandResult<String>
//! ```
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`, so
//! every response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//! The frontend can always check `result.success` before using `data`, and
//! every backend error reaches it as a single message string.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shizuku_core::WindowState;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::check_token::{has_oauth_token as check_oauth_token, CredentialStore};
use crate::infrastructure::storage::config::ConfigStore;
use crate::infrastructure::window_runtime::shell::ShellWindow;

pub mod preferences;

use preferences::PreferencesService;

// ── Shared application state ──────────────────────────────────────────────────

/// Application state shared by all frontend commands.
///
/// Constructed once in `main` and passed around as `Arc<AppState>`; there is
/// no global instance.
///
/// The configuration store sits behind an async Tokio `Mutex` because it is
/// reached from several concurrent paths (config commands, window preference
/// writes triggered by resize events).  Each command holds the lock for its
/// whole read-modify-write sequence, so two racing updates cannot interleave.
pub struct AppState {
    /// The single live configuration store.
    pub config: Arc<Mutex<ConfigStore>>,
    /// Window size/maximised preferences backed by `config`.
    pub preferences: PreferencesService,
    /// OS credential store used for the token check.
    pub credentials: Arc<dyn CredentialStore>,
    /// Main window state as reported by the GUI shell; sampled by the watcher.
    pub window: Arc<ShellWindow>,
    /// Version reported to the frontend.
    pub app_version: String,
}

impl AppState {
    /// Wraps an already-initialized (or deliberately uninitialized) store.
    pub fn new(store: ConfigStore, credentials: Arc<dyn CredentialStore>) -> Arc<Self> {
        let config = Arc::new(Mutex::new(store));
        Arc::new(Self {
            preferences: PreferencesService::new(Arc::clone(&config)),
            config,
            credentials,
            window: Arc::new(ShellWindow::new()),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// Unified response wrapper used by frontend commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Frontend commands ─────────────────────────────────────────────────────────

/// Returns the full configuration as indented JSON.
///
/// # Example (frontend)
/// ```ts
/// const json = await call<string>('get_config_json');
/// const config = JSON.parse(json);
/// ```
pub async fn get_config_json(state: Arc<AppState>) -> CommandResult<String> {
    let store = state.config.lock().await;
    match store.config_json() {
        Ok(json) => CommandResult::ok(json),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Replaces the configuration with the supplied JSON document and persists it.
///
/// Fields missing from the document take their default values.
pub async fn update_config(state: Arc<AppState>, json: String) -> CommandResult<()> {
    let mut store = state.config.lock().await;
    if let Err(e) = store.update_config(&json) {
        warn!("config update rejected: {e}");
        return CommandResult::err(e.to_string());
    }
    CommandResult::ok(())
}

/// Returns the config file path, or an empty string before initialization.
pub async fn get_config_path(state: Arc<AppState>) -> CommandResult<String> {
    let store = state.config.lock().await;
    let path = store
        .config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    CommandResult::ok(path)
}

/// Restores and persists the default configuration.
pub async fn reset_config(state: Arc<AppState>) -> CommandResult<()> {
    let mut store = state.config.lock().await;
    if let Err(e) = store.reset_to_defaults() {
        warn!("config reset failed: {e}");
        return CommandResult::err(format!("failed to save config: {e}"));
    }
    CommandResult::ok(())
}

/// Returns whether an OAuth token is stored in the OS credential store.
///
/// A missing token is a successful `false`; only store failures are errors.
/// The lookup blocks on the OS, so it runs on the blocking thread pool.
pub async fn has_oauth_token(state: Arc<AppState>) -> CommandResult<bool> {
    let store = Arc::clone(&state.credentials);
    match tokio::task::spawn_blocking(move || check_oauth_token(store.as_ref())).await {
        Ok(Ok(present)) => CommandResult::ok(present),
        Ok(Err(e)) => {
            warn!("token check failed: {e}");
            CommandResult::err(e.to_string())
        }
        Err(e) => CommandResult::err(format!("credential lookup task failed: {e}")),
    }
}

/// Records the window state reported by the GUI shell.
///
/// The window watcher picks the report up on its next tick and emits
/// `window_changed` if it differs from the previous sample.
pub async fn report_window_state(state: Arc<AppState>, window: WindowState) -> CommandResult<()> {
    debug!("shell reported window state: {window:?}");
    state.window.report(window);
    CommandResult::ok(())
}

/// Returns the backend version string.
pub async fn get_app_version(state: Arc<AppState>) -> CommandResult<String> {
    CommandResult::ok(state.app_version.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::check_token::{CredentialError, MockCredentialStore};
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_base() -> PathBuf {
        std::env::temp_dir().join(format!("shizuku_bridge_{}", Uuid::new_v4()))
    }

    /// Creates a test-isolated AppState whose config lives in a unique temp
    /// directory, so tests never touch the real platform config file.
    fn make_state(base: &PathBuf, credentials: MockCredentialStore) -> Arc<AppState> {
        let mut store = ConfigStore::with_base_dir(base);
        store.initialize().expect("initialize temp config");
        AppState::new(store, Arc::new(credentials))
    }

    fn no_credentials() -> MockCredentialStore {
        MockCredentialStore::new()
    }

    #[tokio::test]
    async fn test_get_config_json_returns_default_document() {
        // Arrange
        let base = temp_base();
        let state = make_state(&base, no_credentials());

        // Act
        let result = get_config_json(state).await;

        // Assert
        assert!(result.success);
        let json = result.data.unwrap();
        assert!(json.contains("\"version\": \"0.0.1\""));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_update_config_then_get_config_json_reflects_change() {
        // Arrange
        let base = temp_base();
        let state = make_state(&base, no_credentials());

        // Act
        let update =
            update_config(Arc::clone(&state), r#"{"theme":{"mode":"light"}}"#.to_string()).await;
        let result = get_config_json(state).await;

        // Assert
        assert!(update.success, "unexpected error: {:?}", update.error);
        assert!(result.data.unwrap().contains("\"mode\": \"light\""));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_update_config_with_invalid_json_returns_error_message() {
        let base = temp_base();
        let state = make_state(&base, no_credentials());

        let result = update_config(state, "not json".to_string()).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("parse"));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_get_config_path_points_at_config_json() {
        let base = temp_base();
        let state = make_state(&base, no_credentials());

        let result = get_config_path(state).await;

        let path = result.data.unwrap();
        assert!(path.ends_with("config.json"), "got {path}");
        assert!(path.contains("LoliaShizuku"));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_get_config_path_is_empty_before_initialization() {
        let state = AppState::new(ConfigStore::new(), Arc::new(no_credentials()));

        let result = get_config_path(state).await;

        assert!(result.success);
        assert_eq!(result.data.unwrap(), "");
    }

    #[tokio::test]
    async fn test_reset_config_restores_defaults() {
        // Arrange
        let base = temp_base();
        let state = make_state(&base, no_credentials());
        update_config(Arc::clone(&state), r#"{"theme":{"mode":"dark"}}"#.to_string()).await;

        // Act
        let result = reset_config(Arc::clone(&state)).await;

        // Assert
        assert!(result.success);
        let store = state.config.lock().await;
        assert_eq!(store.config(), &shizuku_core::AppConfig::default());
        drop(store);

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_reset_config_before_initialization_reports_error() {
        let state = AppState::new(ConfigStore::new(), Arc::new(no_credentials()));

        let result = reset_config(state).await;

        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_has_oauth_token_reports_presence() {
        // Arrange
        let base = temp_base();
        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_get_secret()
            .returning(|_, _| Ok(Some("secret".to_string())));
        let state = make_state(&base, credentials);

        // Act
        let result = has_oauth_token(state).await;

        // Assert
        assert!(result.success);
        assert_eq!(result.data, Some(true));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_has_oauth_token_missing_entry_is_success_false() {
        let base = temp_base();
        let mut credentials = MockCredentialStore::new();
        credentials.expect_get_secret().returning(|_, _| Ok(None));
        let state = make_state(&base, credentials);

        let result = has_oauth_token(state).await;

        assert!(result.success);
        assert_eq!(result.data, Some(false));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_has_oauth_token_store_failure_is_error() {
        let base = temp_base();
        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_get_secret()
            .returning(|_, _| Err(CredentialError::Store("access denied".to_string())));
        let state = make_state(&base, credentials);

        let result = has_oauth_token(state).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("access denied"));

        std::fs::remove_dir_all(&base).ok();
    }

    #[tokio::test]
    async fn test_get_app_version_matches_crate_version() {
        let state = AppState::new(ConfigStore::new(), Arc::new(no_credentials()));

        let result = get_app_version(state).await;

        assert_eq!(result.data.unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_report_window_state_updates_shell_window() {
        // Arrange
        let state = AppState::new(ConfigStore::new(), Arc::new(no_credentials()));
        let reported = WindowState {
            width: 1280,
            height: 720,
            normal: true,
            ..WindowState::default()
        };

        // Act
        let result = report_window_state(Arc::clone(&state), reported).await;

        // Assert
        assert!(result.success);
        assert_eq!(state.window.latest(), Some(reported));
    }

    #[test]
    fn test_command_result_ok_sets_success_true() {
        let r: CommandResult<i32> = CommandResult::ok(42);
        assert!(r.success);
        assert_eq!(r.data.unwrap(), 42);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_command_result_err_sets_success_false() {
        let r: CommandResult<i32> = CommandResult::err("something went wrong");
        assert!(!r.success);
        assert!(r.data.is_none());
        assert_eq!(r.error.unwrap(), "something went wrong");
    }
}
