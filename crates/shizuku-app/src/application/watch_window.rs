//! WindowStateWatcher: polls the main window and notifies the frontend of changes.
//!
//! The GUI shell does not push geometry changes to the backend, so the
//! watcher samples the window on a fixed tick (300 ms by default) and compares
//! each sample against the previous one using a [`WindowStateTracker`].  When
//! anything differs it sends one [`FrontendEvent::WindowChanged`] carrying the
//! full current sample.
//!
//! # Tick behaviour
//!
//! ```text
//! every poll_interval:
//!   shutdown requested?          -> exit
//!   no window handle delivered?  -> skip tick
//!   sample (fullscreen, size, maximised, minimised, normal)
//!     query failed               -> skip tick (last sample unchanged)
//!     unchanged                  -> nothing
//!     changed                    -> send one WindowChanged event
//! ```
//!
//! Several field changes within one tick collapse into a single event, and a
//! static window never produces an event.
//!
//! # Window hand-off
//!
//! The window handle is created by the GUI shell after the watcher may
//! already be running.  It is delivered through a `tokio::sync::oneshot`
//! channel; until it arrives, ticks are skipped.  If the sending side is
//! dropped without delivering a handle, no window will ever appear and the
//! watcher exits.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use shizuku_core::{FrontendEvent, WindowState, WindowStateTracker};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default sampling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Error type for window queries.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The GUI shell could not answer the query (window closing, shell busy, ...).
    #[error("window query failed: {0}")]
    Unavailable(String),
}

/// Read-only view of the main window provided by the GUI shell.
///
/// Infrastructure implementations wrap the shell's window handle; tests use
/// mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WindowRuntime: Send + Sync {
    /// Whether the window is fullscreen.
    async fn is_fullscreen(&self) -> Result<bool, WindowError>;

    /// The window's `(width, height)` in pixels.
    async fn size(&self) -> Result<(i32, i32), WindowError>;

    /// Whether the window is maximised.
    async fn is_maximised(&self) -> Result<bool, WindowError>;

    /// Whether the window is minimised.
    async fn is_minimised(&self) -> Result<bool, WindowError>;

    /// Whether the window is in its normal (restored) state.
    async fn is_normal(&self) -> Result<bool, WindowError>;
}

/// Queries every tracked field from `runtime`.
///
/// # Errors
///
/// Returns the first [`WindowError`]; a partial sample is never produced.
pub async fn sample_window(runtime: &dyn WindowRuntime) -> Result<WindowState, WindowError> {
    let fullscreen = runtime.is_fullscreen().await?;
    let (width, height) = runtime.size().await?;
    let maximised = runtime.is_maximised().await?;
    let minimised = runtime.is_minimised().await?;
    let normal = runtime.is_normal().await?;

    Ok(WindowState {
        fullscreen,
        width,
        height,
        maximised,
        minimised,
        normal,
    })
}

/// Background poller that turns window state changes into frontend events.
pub struct WindowStateWatcher {
    poll_interval: Duration,
    events: mpsc::Sender<FrontendEvent>,
    running: Arc<AtomicBool>,
}

impl WindowStateWatcher {
    /// Creates a watcher that sends events on `events` until `running` is
    /// cleared or the receiver is dropped.
    pub fn new(
        poll_interval: Duration,
        events: mpsc::Sender<FrontendEvent>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            poll_interval,
            events,
            running,
        }
    }

    /// Spawns [`run`](Self::run) on the Tokio runtime.
    pub fn spawn(self, window_rx: oneshot::Receiver<Arc<dyn WindowRuntime>>) -> JoinHandle<()> {
        tokio::spawn(self.run(window_rx))
    }

    /// The polling loop.  Returns on shutdown, when the event receiver is
    /// gone, or when the window hand-off is abandoned.
    pub async fn run(self, mut window_rx: oneshot::Receiver<Arc<dyn WindowRuntime>>) {
        // First sample one full period after start.
        let mut ticker = time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tracker = WindowStateTracker::new();
        let mut window: Option<Arc<dyn WindowRuntime>> = None;

        loop {
            ticker.tick().await;

            if !self.running.load(Ordering::Relaxed) {
                info!("window watcher stopping: shutdown requested");
                return;
            }

            let runtime = match &window {
                Some(runtime) => Arc::clone(runtime),
                None => match window_rx.try_recv() {
                    Ok(runtime) => {
                        info!("window handle attached; watching window state");
                        window = Some(Arc::clone(&runtime));
                        runtime
                    }
                    Err(oneshot::error::TryRecvError::Empty) => continue,
                    Err(oneshot::error::TryRecvError::Closed) => {
                        warn!("window handle was never delivered; window watcher exiting");
                        return;
                    }
                },
            };

            let sample = match sample_window(runtime.as_ref()).await {
                Ok(sample) => sample,
                Err(e) => {
                    debug!("skipping window sample: {e}");
                    continue;
                }
            };

            let previous = tracker.last();
            if let Some(state) = tracker.observe(sample) {
                debug!(
                    "window state changed ({}): {state:?}",
                    previous.changed_fields(&state).join(", ")
                );
                if self.events.send(FrontendEvent::WindowChanged(state)).await.is_err() {
                    info!("window watcher stopping: event receiver closed");
                    return;
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = DEFAULT_POLL_INTERVAL;

    fn static_window(width: i32, height: i32) -> MockWindowRuntime {
        let mut mock = MockWindowRuntime::new();
        mock.expect_is_fullscreen().returning(|| Ok(false));
        mock.expect_size().returning(move || Ok((width, height)));
        mock.expect_is_maximised().returning(|| Ok(false));
        mock.expect_is_minimised().returning(|| Ok(false));
        mock.expect_is_normal().returning(|| Ok(true));
        mock
    }

    fn start_watcher() -> (
        mpsc::Receiver<FrontendEvent>,
        oneshot::Sender<Arc<dyn WindowRuntime>>,
        Arc<AtomicBool>,
        JoinHandle<()>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (window_tx, window_rx) = oneshot::channel();
        let running = Arc::new(AtomicBool::new(true));
        let handle = WindowStateWatcher::new(TICK, event_tx, Arc::clone(&running)).spawn(window_rx);
        (event_rx, window_tx, running, handle)
    }

    #[tokio::test]
    async fn test_sample_window_collects_every_field() {
        // Arrange
        let runtime = static_window(950, 600);

        // Act
        let sample = sample_window(&runtime).await.expect("sample");

        // Assert
        assert_eq!(
            sample,
            WindowState {
                fullscreen: false,
                width: 950,
                height: 600,
                maximised: false,
                minimised: false,
                normal: true,
            }
        );
    }

    #[tokio::test]
    async fn test_sample_window_propagates_first_query_error() {
        // Arrange – only the first query is expected; the rest must not run
        let mut runtime = MockWindowRuntime::new();
        runtime
            .expect_is_fullscreen()
            .returning(|| Err(WindowError::Unavailable("window destroyed".to_string())));

        // Act
        let result = sample_window(&runtime).await;

        // Assert
        assert!(matches!(result, Err(WindowError::Unavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_skips_ticks_until_window_is_attached() {
        // Arrange
        let (mut events, window_tx, _running, _handle) = start_watcher();

        // Act / Assert – no window yet: several ticks pass without events
        let early = time::timeout(TICK * 5, events.recv()).await;
        assert!(early.is_err(), "no event may be sent before a window is attached");

        let runtime: Arc<dyn WindowRuntime> = Arc::new(static_window(950, 600));
        assert!(window_tx.send(runtime).is_ok());

        let event = events.recv().await.expect("first sample after attach");
        assert_eq!(
            event,
            FrontendEvent::WindowChanged(WindowState {
                width: 950,
                height: 600,
                normal: true,
                ..WindowState::default()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_sends_nothing_for_static_window_after_first_event() {
        // Arrange
        let (mut events, window_tx, _running, _handle) = start_watcher();
        let runtime: Arc<dyn WindowRuntime> = Arc::new(static_window(800, 600));
        assert!(window_tx.send(runtime).is_ok());
        events.recv().await.expect("initial event");

        // Act
        let next = time::timeout(TICK * 20, events.recv()).await;

        // Assert
        assert!(next.is_err(), "a static window must not produce further events");
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_skips_ticks_when_window_query_fails() {
        // Arrange
        let (mut events, window_tx, _running, _handle) = start_watcher();
        let mut runtime = MockWindowRuntime::new();
        runtime
            .expect_is_fullscreen()
            .returning(|| Err(WindowError::Unavailable("shell busy".to_string())));
        let runtime: Arc<dyn WindowRuntime> = Arc::new(runtime);
        assert!(window_tx.send(runtime).is_ok());

        // Act
        let result = time::timeout(TICK * 10, events.recv()).await;

        // Assert
        assert!(result.is_err(), "failed queries must not be reported as changes");
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_exits_when_shutdown_flag_is_cleared() {
        // Arrange
        let (_events, _window_tx, running, handle) = start_watcher();

        // Act
        running.store(false, Ordering::Relaxed);

        // Assert
        time::timeout(TICK * 3, handle)
            .await
            .expect("watcher must stop within a few ticks")
            .expect("watcher task must not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_exits_when_window_sender_is_dropped() {
        // Arrange
        let (_events, window_tx, _running, handle) = start_watcher();

        // Act
        drop(window_tx);

        // Assert
        time::timeout(TICK * 3, handle)
            .await
            .expect("watcher must stop when no window can arrive")
            .expect("watcher task must not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_exits_when_event_receiver_is_dropped() {
        // Arrange
        let (events, window_tx, _running, handle) = start_watcher();
        let runtime: Arc<dyn WindowRuntime> = Arc::new(static_window(640, 480));
        assert!(window_tx.send(runtime).is_ok());

        // Act
        drop(events);

        // Assert
        time::timeout(TICK * 3, handle)
            .await
            .expect("watcher must stop once nobody listens")
            .expect("watcher task must not panic");
    }
}
