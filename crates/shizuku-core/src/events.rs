//! Backend → frontend notifications.
//!
//! Events are pushed to the frontend without a matching request.  On the wire
//! each event is a tagged JSON object:
//!
//! ```json
//! { "event": "window_changed",
//!   "payload": { "fullscreen": false, "width": 950, "height": 600,
//!                "maximised": false, "minimised": false, "normal": true } }
//! ```

use serde::{Deserialize, Serialize};

use crate::window::WindowState;

/// A notification pushed from the backend to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum FrontendEvent {
    /// The main window's geometry or state changed; carries the full sample.
    WindowChanged(WindowState),
}

impl FrontendEvent {
    /// The event name the frontend subscribes to.
    pub fn name(&self) -> &'static str {
        match self {
            FrontendEvent::WindowChanged(_) => "window_changed",
        }
    }
}
