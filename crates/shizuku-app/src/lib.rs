//! shizuku-app library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the backend do? (for beginners)
//!
//! The LoliaShizuku UI is a web frontend hosted in a native window.  The
//! frontend cannot touch the file system, query the window manager, or read
//! the OS keychain itself, so it asks this backend to:
//!
//! 1. Load, update, and reset the JSON settings file (`ConfigStore`).
//! 2. Remember the window size and maximised flag between launches
//!    (`PreferencesService`).
//! 3. Tell whether an OAuth token is stored in the OS credential store.
//!
//! In the other direction the backend watches the main window and pushes a
//! `window_changed` event to the frontend whenever its geometry or state
//! changes.

/// Application layer: use cases (window watcher, token check).
pub mod application;

/// Infrastructure layer: storage, OS adapters, and the frontend bridge.
pub mod infrastructure;
