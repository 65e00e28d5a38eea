//! Window runtime adapters for the window watcher.
//!
//! The GUI shell owns the native window; the backend only reads its state
//! through the [`WindowRuntime`] trait defined in
//! `application::watch_window`.
//!
//! - **`shell`** – [`shell::ShellWindow`], fed by `report_window_state` calls
//!   from the shell.  This is what the binary hands to the watcher.
//! - **`mock`** – [`mock::MockWindow`], a settable in-memory window for tests.
//!   It is not guarded by `#[cfg(test)]` so the integration tests under
//!   `tests/` can use it too.
//!
//! [`WindowRuntime`]: crate::application::watch_window::WindowRuntime

pub mod mock;
pub mod shell;
