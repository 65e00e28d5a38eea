//! Application layer use cases for the desktop backend.
//!
//! # What use cases does the backend have?
//!
//! - **`watch_window`** – Polls the main window through a `WindowRuntime`
//!   implementation (injected at construction time) and pushes a
//!   `window_changed` event to the frontend whenever the sampled state
//!   differs from the previous sample.
//!
//! - **`check_token`** – Asks a `CredentialStore` whether the OAuth token is
//!   present.  "Not found" is a normal answer, not an error.

pub mod check_token;
pub mod watch_window;
