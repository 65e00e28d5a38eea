//! JSON-lines link between the backend process and the frontend host.
//!
//! The GUI shell starts this backend as a child process and talks to it over
//! stdin/stdout.  Every line is one JSON object.
//!
//! # Message flow
//!
//! ```text
//! Frontend → Backend (stdin):   {"id":7,"call":{"command":"save_window_size","width":1280,"height":720}}
//! Backend  → Frontend (stdout): {"id":7,"result":{"success":true,"data":null,"error":null}}
//! Backend  → Frontend (stdout): {"event":"window_changed","payload":{...}}
//! ```
//!
//! Responses carry the request `id` so the frontend can match them to its
//! pending calls.  Events carry no `id`; they are recognised by their
//! `"event"` field.  A line that is not a valid request still gets a failed
//! response, with the `id` echoed when it could be read.
//!
//! Requests are served one at a time in arrival order.  Events from the
//! window watcher are written between responses as soon as they arrive.
//! The session ends when the frontend closes stdin.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shizuku_core::{FrontendEvent, WindowState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::infrastructure::ui_bridge::{self, preferences, AppState, CommandResult};

// ── Wire types ────────────────────────────────────────────────────────────────

/// Every operation the frontend can invoke.
///
/// # Serde representation
///
/// ```json
/// {"command":"get_config_json"}
/// {"command":"update_config","json":"{\"theme\":{\"mode\":\"dark\"}}"}
/// {"command":"save_window_size","width":1280,"height":720}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FrontendCall {
    GetConfigJson,
    UpdateConfig { json: String },
    GetConfigPath,
    ResetConfig,
    GetWindowSize,
    SaveWindowSize { width: i32, height: i32 },
    SaveWindowMaximised { maximised: bool },
    HasOauthToken,
    GetAppVersion,
    /// Sent by the GUI shell whenever the native window changes.
    ReportWindowState { window: WindowState },
}

/// One request line from the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: u64,
    pub call: FrontendCall,
}

/// One response line to the frontend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// The request id, or `None` when the request line could not be read.
    pub id: Option<u64>,
    pub result: CommandResult<Value>,
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Runs `call` against `state` and returns its result with the payload
/// converted to JSON.
pub async fn dispatch(state: Arc<AppState>, call: FrontendCall) -> CommandResult<Value> {
    match call {
        FrontendCall::GetConfigJson => into_json(ui_bridge::get_config_json(state).await),
        FrontendCall::UpdateConfig { json } => into_json(ui_bridge::update_config(state, json).await),
        FrontendCall::GetConfigPath => into_json(ui_bridge::get_config_path(state).await),
        FrontendCall::ResetConfig => into_json(ui_bridge::reset_config(state).await),
        FrontendCall::GetWindowSize => into_json(preferences::get_window_size(state).await),
        FrontendCall::SaveWindowSize { width, height } => {
            into_json(preferences::save_window_size(state, width, height).await)
        }
        FrontendCall::SaveWindowMaximised { maximised } => {
            into_json(preferences::save_window_maximised(state, maximised).await)
        }
        FrontendCall::HasOauthToken => into_json(ui_bridge::has_oauth_token(state).await),
        FrontendCall::GetAppVersion => into_json(ui_bridge::get_app_version(state).await),
        FrontendCall::ReportWindowState { window } => {
            into_json(ui_bridge::report_window_state(state, window).await)
        }
    }
}

fn into_json<T: Serialize>(result: CommandResult<T>) -> CommandResult<Value> {
    match result.data.map(serde_json::to_value).transpose() {
        Ok(data) => CommandResult {
            success: result.success,
            data,
            error: result.error,
        },
        Err(e) => CommandResult::err(format!("failed to encode response: {e}")),
    }
}

/// Parses and serves a single request line.
pub async fn handle_line(state: &Arc<AppState>, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => {
            debug!("frontend call #{}: {:?}", request.id, request.call);
            Response {
                id: Some(request.id),
                result: dispatch(Arc::clone(state), request.call).await,
            }
        }
        Err(e) => {
            warn!("rejecting malformed frontend request: {e}");
            let id = serde_json::from_str::<Value>(line)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_u64));
            Response {
                id,
                result: CommandResult::err(format!("invalid request: {e}")),
            }
        }
    }
}

// ── Session loop ──────────────────────────────────────────────────────────────

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The frontend closed its input stream.
    InputClosed,
    /// The shutdown future completed first.
    ShutdownRequested,
}

/// Serves requests from `input` and forwards `events`, writing both to
/// `output`, until `input` reaches EOF.
///
/// # Errors
///
/// Returns the first I/O error on either stream.
pub async fn serve<R, W>(
    state: Arc<AppState>,
    input: R,
    output: W,
    events: mpsc::Receiver<FrontendEvent>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    serve_until(state, input, output, events, std::future::pending()).await?;
    Ok(())
}

/// Like [`serve`], but also returns as soon as `shutdown` completes.
///
/// A request already being answered is finished first; the shutdown is
/// noticed before the next line is read.
///
/// # Errors
///
/// Returns the first I/O error on either stream.
pub async fn serve_until<R, W, F>(
    state: Arc<AppState>,
    input: R,
    mut output: W,
    mut events: mpsc::Receiver<FrontendEvent>,
    shutdown: F,
) -> std::io::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut events_open = true;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Shutdown first, then pending events, then the next request.
            biased;

            () = &mut shutdown => {
                info!("IPC session stopping: shutdown requested");
                return Ok(SessionEnd::ShutdownRequested);
            }

            event = events.recv(), if events_open => match event {
                Some(event) => {
                    debug!("pushing {} event to frontend", event.name());
                    write_line(&mut output, &event).await?;
                }
                None => events_open = false,
            },

            line = lines.next_line() => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let response = handle_line(&state, &line).await;
                    write_line(&mut output, &response).await?;
                }
                None => {
                    info!("frontend closed the IPC stream");
                    return Ok(SessionEnd::InputClosed);
                }
            },
        }
    }
}

async fn write_line<W, T>(output: &mut W, value: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut buf = serde_json::to_vec(value)?;
    buf.push(b'\n');
    output.write_all(&buf).await?;
    output.flush().await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
