//! In-memory window for tests.
//!
//! Holds a settable [`WindowState`] and answers every [`WindowRuntime`] query
//! from it.  Tests change the state between ticks to simulate the user
//! resizing, maximising, or minimising the window.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use async_trait::async_trait;
use shizuku_core::WindowState;

use crate::application::watch_window::{WindowError, WindowRuntime};

/// A [`WindowRuntime`] whose state is set by the caller.
#[derive(Debug, Default)]
pub struct MockWindow {
    state: Mutex<WindowState>,
    failing: AtomicBool,
}

impl MockWindow {
    /// Creates a window reporting `state`.
    pub fn new(state: WindowState) -> Self {
        Self {
            state: Mutex::new(state),
            failing: AtomicBool::new(false),
        }
    }

    /// Creates a restored (normal) window of the given size.
    pub fn normal(width: i32, height: i32) -> Self {
        Self::new(WindowState {
            width,
            height,
            normal: true,
            ..WindowState::default()
        })
    }

    /// The state currently reported.
    pub fn state(&self) -> WindowState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the reported state.
    pub fn set_state(&self, state: WindowState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Changes only the reported size.
    pub fn resize(&self, width: i32, height: i32) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.width = width;
        state.height = height;
    }

    /// When `true`, every query fails with [`WindowError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    fn read<T>(&self, f: impl FnOnce(&WindowState) -> T) -> Result<T, WindowError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(WindowError::Unavailable("mock window is failing".to_string()));
        }
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&*state))
    }
}

#[async_trait]
impl WindowRuntime for MockWindow {
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
