//! LoliaShizuku backend entry point.
//!
//! Loads the settings, configures logging, starts the window watcher, and
//! serves frontend calls over stdin/stdout until the frontend hangs up or the
//! process receives Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ ConfigStore::initialize()   -- load-or-create config.json (errors logged, not fatal)
//!  └─ tracing subscriber          -- RUST_LOG, else advanced.logLevel / debugMode
//!  └─ AppState::new()             -- shared store + credential store
//!  └─ start services
//!       ├─ WindowStateWatcher     (Tokio task, samples AppState.window)
//!       └─ ipc::serve_until       (stdin requests, stdout responses + events)
//! ```
//!
//! stdout carries the IPC stream, so logs are written to stderr.
//!
//! The GUI shell reports the native window through `report_window_state`
//! calls on the same link; until its first report the watcher stays quiet.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use shizuku_app::application::watch_window::{WindowRuntime, WindowStateWatcher};
use shizuku_app::infrastructure::{
    credentials::KeyringCredentialStore,
    ipc::{self, SessionEnd},
    storage::config::ConfigStore,
    ui_bridge::AppState,
};

/// LoliaShizuku desktop backend.
#[derive(Debug, Parser)]
#[command(name = "lolia-shizuku", version, about)]
struct Args {
    /// Base directory for settings, replacing the per-user config directory.
    #[arg(long, env = "SHIZUKU_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Window state sampling period in milliseconds.
    #[arg(
        long,
        env = "SHIZUKU_POLL_INTERVAL_MS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first so its log level can seed the filter.
    let mut store = match &args.config_dir {
        Some(dir) => ConfigStore::with_base_dir(dir),
        None => ConfigStore::new(),
    };
    let init_result = store.initialize();

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(store.config().log_directive())),
        )
        .init();

    info!("LoliaShizuku backend {} starting", env!("CARGO_PKG_VERSION"));

    // A broken config file must not stop the app; continue with whatever the
    // store holds (defaults when the file could not be read).
    match init_result {
        Ok(()) => {
            if let Some(path) = store.config_path() {
                info!("configuration loaded from {}", path.display());
            }
        }
        Err(e) => error!("failed to initialize config: {e}"),
    }

    let state = AppState::new(store, Arc::new(KeyringCredentialStore::new()));

    // Shutdown flag shared with the background watcher.
    let running = Arc::new(AtomicBool::new(true));

    // ── Window watcher ────────────────────────────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel(64);
    let (window_tx, window_rx) = oneshot::channel::<Arc<dyn WindowRuntime>>();
    let watcher = WindowStateWatcher::new(
        Duration::from_millis(args.poll_interval_ms),
        event_tx,
        Arc::clone(&running),
    )
    .spawn(window_rx);

    let window: Arc<dyn WindowRuntime> = state.window.clone();
    if window_tx.send(window).is_err() {
        warn!("window watcher exited before the window handle was delivered");
    }

    // ── IPC link ──────────────────────────────────────────────────────────────
    info!("LoliaShizuku backend ready; serving frontend on stdin/stdout");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutdown signal received"),
            Err(e) => {
                error!("cannot listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    let session = ipc::serve_until(Arc::clone(&state), stdin, stdout, event_rx, ctrl_c).await;
    if let Err(e) = &session {
        error!("IPC link failed: {e}");
    }

    running.store(false, Ordering::Relaxed);
    if let Err(e) = watcher.await {
        error!("window watcher task failed: {e}");
    }

    info!("LoliaShizuku backend stopped");

    // Unless stdin reached EOF, Tokio's stdin reader may still be parked in a
    // blocking read, and runtime shutdown waits for it.  Leave without
    // dropping the runtime in that case.
    match session {
        Ok(SessionEnd::InputClosed) => Ok(()),
        Ok(SessionEnd::ShutdownRequested) => std::process::exit(0),
        Err(_) => std::process::exit(1),
    }
}
