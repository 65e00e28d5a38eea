//! Window runtime fed by the GUI shell over the IPC link.
//!
//! The shell hosting the web frontend owns the native window.  Whenever the
//! window changes it sends a `report_window_state` call; the latest report is
//! kept here and answers the watcher's queries.
//!
//! ```text
//! GUI shell ──report_window_state──> ShellWindow <──sample every tick── WindowStateWatcher
//! ```
//!
//! Until the first report arrives every query fails with
//! [`WindowError::Unavailable`], so the watcher skips those ticks instead of
//! reporting an invented window.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use shizuku_core::WindowState;

use crate::application::watch_window::{WindowError, WindowRuntime};

/// The main window as last reported by the GUI shell.
#[derive(Debug, Default)]
pub struct ShellWindow {
    latest: RwLock<Option<WindowState>>,
}

impl ShellWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the shell's latest view of the window.
    pub fn report(&self, state: WindowState) {
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(state);
    }

    /// The latest report, or `None` before the shell has reported anything.
    pub fn latest(&self) -> Option<WindowState> {
        *self.latest.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, f: impl FnOnce(&WindowState) -> T) -> Result<T, WindowError> {
        self.latest().as_ref().map(f).ok_or_else(|| {
            WindowError::Unavailable("no window state reported by the shell yet".to_string())
        })
    }
}

#[async_trait]
impl WindowRuntime for ShellWindow {
    async fn is_fullscreen(&self) -> Result<bool, WindowError> {
        self.read(|s| s.fullscreen)
    }

    async fn size(&self) -> Result<(i32, i32), WindowError> {
        self.read(|s| (s.width, s.height))
    }

    async fn is_maximised(&self) -> Result<bool, WindowError> {
        self.read(|s| s.maximised)
    }

    async fn is_minimised(&self) -> Result<bool, WindowError> {
        self.read(|s| s.minimised)
    }

    async fn is_normal(&self) -> Result<bool, WindowError> {
        self.read(|s| s.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::watch_window::sample_window;

    #[tokio::test]
    async fn test_queries_fail_until_first_report() {
        // Arrange
        let window = ShellWindow::new();

        // Act
        let result = sample_window(&window).await;

        // Assert
        assert!(matches!(result, Err(WindowError::Unavailable(_))));
        assert!(window.latest().is_none());
    }

    #[tokio::test]
    async fn test_sample_returns_latest_report() {
        // Arrange
        let window = ShellWindow::new();
        window.report(WindowState {
            width: 950,
            height: 600,
            normal: true,
            ..WindowState::default()
        });
        let maximised = WindowState {
            width: 1920,
            height: 1080,
            maximised: true,
            ..WindowState::default()
        };

        // Act
        window.report(maximised);
        let sample = sample_window(&window).await.expect("sample");

        // Assert
        assert_eq!(sample, maximised);
    }
}
