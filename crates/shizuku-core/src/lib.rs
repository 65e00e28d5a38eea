//! # shizuku-core
//!
//! Shared domain library for the LoliaShizuku desktop backend.
//!
//! This crate has zero dependencies on OS APIs, the GUI shell, the file
//! system, or an async runtime.  Everything here is plain data plus the pure
//! logic that operates on it, which keeps it trivially unit-testable.
//!
//! # Architecture overview (for beginners)
//!
//! LoliaShizuku is a desktop application: a web frontend runs inside a native
//! window, and this Rust backend answers the frontend's requests (read the
//! settings, save the window size, ...) and pushes notifications back to it
//! (the window was resized, maximised, ...).
//!
//! This crate defines the vocabulary both halves agree on:
//!
//! - **`config`** – The persisted settings record (`AppConfig`), its default
//!   values, and the *overlay-on-defaults* JSON parser that fills in any field
//!   the document does not mention.
//!
//! - **`window`** – A snapshot of the window geometry/state (`WindowState`)
//!   and the `WindowStateTracker` that decides whether a new snapshot differs
//!   from the previous one.
//!
//! - **`events`** – The envelope used for backend → frontend notifications.

pub mod config;
pub mod events;
pub mod window;

// Re-export the most-used types at the crate root so callers can write
// `shizuku_core::AppConfig` instead of `shizuku_core::config::AppConfig`.
pub use config::{AppConfig, ConfigParseError, ThemeMode};
pub use events::FrontendEvent;
pub use window::{WindowState, WindowStateTracker};
