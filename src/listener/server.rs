// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use super::types::{MessageIn, MessageOut, RequestKind, ResponseData};
use crate::dispatch::{searched_tabs, SessionHandle};
use crate::ops::{Command, SessionError, MIN_PATTERN_CHARS};
use crate::shutdown::Shutdown;

pub const WS_PATH: &str = "/ws";

/// How long TLS connections get to finish once shutdown is requested.
const TLS_DRAIN: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot load certificate {} with key {}: {source}", cert.display(), key.display())]
    Tls {
        cert: PathBuf,
        key: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("listener stopped: {0}")]
    Serve(#[source] io::Error),
}

/// A frame that does not follow the request contract. The connection is dropped.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("binary frames are not accepted")]
    BinaryFrame,
}

#[derive(Clone)]
struct ListenerState {
    handle: SessionHandle,
    shutdown: Shutdown,
}

pub async fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.to_owned(),
            source,
        })
}

pub fn router(handle: SessionHandle, shutdown: Shutdown) -> Router {
    Router::new()
        .route(WS_PATH, get(upgrade))
        .with_state(ListenerState { handle, shutdown })
}

/// Serves until shutdown is requested; open connections are closed first.
///
/// With a TLS config the socket speaks `wss://`, otherwise plain `ws://`.
pub async fn serve(
    listener: TcpListener,
    tls: Option<RustlsConfig>,
    handle: SessionHandle,
    shutdown: Shutdown,
) -> Result<(), ListenerError> {
    let scheme = if tls.is_some() { "wss" } else { "ws" };
    if let Ok(address) = listener.local_addr() {
        info!(%address, scheme, path = WS_PATH, "listening for websocket clients");
    }

    let router = router(handle, shutdown.clone());
    match tls {
        Some(config) => serve_tls(listener, config, router, shutdown).await,
        None => axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(ListenerError::Serve),
    }
}

async fn serve_tls(
    listener: TcpListener,
    config: RustlsConfig,
    router: Router,
    shutdown: Shutdown,
) -> Result<(), ListenerError> {
    let listener = listener.into_std().map_err(ListenerError::Serve)?;
    let server = axum_server::Handle::new();

    let stopper = server.clone();
    tokio::spawn(async move {
        shutdown.cancelled().await;
        stopper.graceful_shutdown(Some(TLS_DRAIN));
    });

    axum_server::from_tcp_rustls(listener, config)
        .handle(server)
        .serve(router.into_make_service())
        .await
        .map_err(ListenerError::Serve)
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<ListenerState>) -> Response {
    ws.on_upgrade(move |socket| connection(socket, state))
}

async fn connection(mut socket: WebSocket, state: ListenerState) {
    let _client = state.handle.client_connected();
    info!("websocket client connected");

    loop {
        let message = tokio::select! {
            () = state.shutdown.cancelled() => break,
            message = socket.recv() => message,
        };

        let text = match message {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Binary(_))) => {
                warn!(error = %ProtocolError::BinaryFrame, "closing websocket connection");
                break;
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => break,
            Some(Err(err)) => {
                debug!(error = %err, "websocket read failed");
                break;
            }
        };

        let request = match parse_request(text.as_str()) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => {
                warn!(error = %err, "closing websocket connection");
                break;
            }
        };

        let response = match answer(&state.handle, request).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "remote lookup failed");
                break;
            }
        };

        let body = match serde_json::to_string(&response) {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "failed to encode response");
                break;
            }
        };
        if let Err(err) = socket.send(Message::Text(body.into())).await {
            debug!(error = %err, "websocket write failed");
            break;
        }
    }

    // The peer may already be gone.
    let _ = socket.send(Message::Close(None)).await;
    info!("websocket client disconnected");
}

/// Decodes one text frame. Requests with an empty query are ignored.
pub fn parse_request(text: &str) -> Result<Option<MessageIn>, ProtocolError> {
    let request: MessageIn = serde_json::from_str(text)?;
    if request.query.is_empty() {
        return Ok(None);
    }
    Ok(Some(request))
}

/// Runs the lookup as one batch so nothing interleaves between the search, the response
/// and, for `tabs`, the removal of what was handed out.
pub async fn answer(handle: &SessionHandle, request: MessageIn) -> Result<MessageOut, SessionError> {
    info!(id = request.id, kind = ?request.kind, query = %request.query, "remote lookup");

    // Too short to search: the previous found set must not leak out (or be removed).
    let urls = if request.query.chars().count() < MIN_PATTERN_CHARS {
        Vec::new()
    } else {
        let mut commands = vec![Command::find_quiet(request.query.as_str())];
        if request.kind == RequestKind::Tabs {
            commands.push(Command::Remove);
        }
        let reply = handle.dispatch_batch(commands).await?;
        reply
            .outcomes
            .first()
            .and_then(searched_tabs)
            .map(|tabs| tabs.iter().map(|tab| tab.url.clone()).collect())
            .unwrap_or_default()
    };

    let data = match request.kind {
        RequestKind::Count => ResponseData::Count(urls.len()),
        RequestKind::Tabs => ResponseData::Tabs(urls),
    };
    Ok(MessageOut {
        kind: request.kind,
        id: request.id,
        data,
    })
}

#[cfg(test)]
mod tests;
