//! Window geometry/state snapshots and change detection.
//!
//! The backend periodically samples the main window (size, fullscreen,
//! maximised, ...) and tells the frontend when something changed.  This
//! module holds the pure part of that job: the snapshot type and the tracker
//! that remembers the last snapshot and decides whether a new one is worth a
//! notification.
//!
//! Sampling itself (asking the GUI shell) and the timer live in the
//! application crate.

use serde::{Deserialize, Serialize};

/// One sample of the main window's state, as reported by the GUI shell.
///
/// Serialized as the `window_changed` event payload:
/// `{ "fullscreen", "width", "height", "maximised", "minimised", "normal" }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub fullscreen: bool,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    pub maximised: bool,
    pub minimised: bool,
    /// Neither fullscreen, maximised, nor minimised.
    pub normal: bool,
}

impl WindowState {
    /// Names of the fields that differ between `self` and `other`.
    ///
    /// Size counts as a single `"size"` entry when either dimension differs.
    pub fn changed_fields(&self, other: &WindowState) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.fullscreen != other.fullscreen {
            changed.push("fullscreen");
        }
        if self.width != other.width || self.height != other.height {
            changed.push("size");
        }
        if self.maximised != other.maximised {
            changed.push("maximised");
        }
        if self.minimised != other.minimised {
            changed.push("minimised");
        }
        if self.normal != other.normal {
            changed.push("normal");
        }
        changed
    }
}

/// Remembers the last observed [`WindowState`] and reports changes.
///
/// The initial "last sample" is all zero/false, so the first real sample of
/// any visible window is reported as a change.
#[derive(Debug, Default)]
pub struct WindowStateTracker {
    last: WindowState,
}

impl WindowStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently recorded sample.
    pub fn last(&self) -> WindowState {
        self.last
    }

    /// Records `sample` and returns it if any tracked field differs from the
    /// previous sample.
    ///
    /// Returns `None` (and records nothing new) when the window is unchanged,
    /// so a static window produces no notifications.
    pub fn observe(&mut self, sample: WindowState) -> Option<WindowState> {
        if sample == self.last {
            return None;
        }
        self.last = sample;
        Some(sample)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
