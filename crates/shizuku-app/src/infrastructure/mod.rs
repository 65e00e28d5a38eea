//! Infrastructure layer for the desktop backend.
//!
//! Contains OS-facing adapters and the frontend-facing surface.
//!
//! # Sub-modules
//!
//! - **`storage`** – The JSON settings file in the per-user config directory.
//!
//! - **`window_runtime`** – Implementations of the `WindowRuntime` trait that
//!   the window watcher polls.
//!
//! - **`credentials`** – `CredentialStore` implementation on top of the OS
//!   keyring.
//!
//! - **`ui_bridge`** – Frontend command handlers and the shared `AppState`.
//!
//! - **`ipc`** – The JSON-lines stdin/stdout link that carries frontend calls
//!   in and responses and events out.

pub mod credentials;
pub mod ipc;
pub mod storage;
pub mod ui_bridge;
pub mod window_runtime;
