//! Minimal web front-end: a single page plus a streaming chat proxy.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use confab_core::{ChatStreamProvider, Message, StreamEvent};
use confab_openai::ChatClient;

use crate::settings;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Delay before the detached browser-open action fires, long enough for the
/// listener to accept connections.
const BROWSER_OPEN_DELAY: Duration = Duration::from_millis(800);

#[derive(Clone)]
struct AppState {
    client: Arc<ChatClient>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    messages: Vec<Message>,
}

pub async fn run(port: u16, open_browser: bool) -> Result<()> {
    let config = match settings::load_client_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            settings::print_credentials_hint();
            return Ok(());
        }
    };
    let client = Arc::new(ChatClient::new(config));

    let app = Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(AppState { client });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    println!("Confab web UI listening on http://{addr}");
    info!(%addr, "web server started");

    if open_browser {
        spawn_browser_open(format!("http://{addr}"));
    }

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Proxy one turn: the browser sends the full history, the reply streams
/// back as plain text chunks. A failure mid-stream becomes a final
/// `Error: …` chunk, mirroring the terminal behaviour, so the page never
/// hangs on a broken turn.
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let client = state.client.clone();

    let body = async_stream::stream! {
        let events = client.stream_chat(&request.messages);
        futures_util::pin_mut!(events);

        while let Some(event) = events.next().await {
            match event {
                Ok(StreamEvent::Delta(text)) => {
                    yield Ok::<_, std::convert::Infallible>(Bytes::from(text));
                }
                Ok(StreamEvent::Done) => break,
                Err(err) => {
                    warn!(%err, "stream failed mid-reply");
                    yield Ok(Bytes::from(format!("Error: {err}")));
                    break;
                }
            }
        }
    };

    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response()
}

/// Open the UI in a browser tab: detached, fire-and-forget, independent of
/// the streaming pipeline. Failure only logs — the server keeps running.
fn spawn_browser_open(url: String) {
    tokio::spawn(async move {
        tokio::time::sleep(BROWSER_OPEN_DELAY).await;
        if let Err(err) = open_command(&url).spawn() {
            warn!(%err, "could not open a browser tab");
        }
    });
}

#[cfg(target_os = "macos")]
fn open_command(url: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn open_command(url: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_command(url: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
