// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rstest::rstest;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{
    connect_async, connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream,
};

use super::*;
use crate::dispatch::spawn_executor;
use crate::model::fixtures::reading_list_index;
use crate::model::Session;
use crate::opener::DryRunOpener;
use crate::ops::{Outcome, ShowTarget};
use crate::listener::{load_tls, TlsFiles};
use crate::store::BackupFolder;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct Server {
    _tmp: TempDir,
    address: SocketAddr,
    handle: SessionHandle,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), ListenerError>>,
}

impl Server {
    async fn start() -> Self {
        Self::start_with(None).await
    }

    async fn start_with(tls: Option<RustlsConfig>) -> Self {
        let tmp = TempDir::new().expect("temp dir");
        let (handle, _join) = spawn_executor(
            Session::new(reading_list_index(tmp.path())),
            BackupFolder::new(tmp.path()),
            Arc::new(DryRunOpener::new()),
        )
        .expect("spawn executor");
        let shutdown = Shutdown::new();

        let listener = bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("local addr");
        let task = tokio::spawn(serve(listener, tls, handle.clone(), shutdown.clone()));

        Self {
            _tmp: tmp,
            address,
            handle,
            shutdown,
            task,
        }
    }

    async fn connect(&self) -> Client {
        let url = format!("ws://{}{}", self.address, WS_PATH);
        let (client, _) = connect_async(url).await.expect("connect");
        client
    }

    async fn stop(self) {
        self.shutdown.request();
        self.task.await.expect("server task").expect("serve");
    }
}

async fn request(client: &mut Client, body: Value) -> Value {
    client
        .send(WsMessage::text(body.to_string()))
        .await
        .expect("send");
    next_json(client).await
}

async fn next_json(client: &mut Client) -> Value {
    loop {
        let message = client.next().await.expect("open stream").expect("frame");
        if message.is_text() {
            return serde_json::from_str(message.to_text().expect("text")).expect("json");
        }
    }
}

/// Reads until the server closes the connection; returns how many text frames arrived.
async fn drain_until_closed(client: &mut Client) -> usize {
    let mut texts = 0;
    while let Some(Ok(message)) = client.next().await {
        match message {
            WsMessage::Text(_) => texts += 1,
            WsMessage::Close(_) => break,
            _ => {}
        }
    }
    texts
}

#[tokio::test]
async fn count_then_tabs_consumes_the_matches() {
    let server = Server::start().await;
    let mut client = server.connect().await;

    let counted = request(
        &mut client,
        json!({"type": "count", "id": 1, "query": "shared.example"}),
    )
    .await;
    assert_eq!(counted, json!({"type": "count", "id": 1, "data": 2}));

    let fetched = request(
        &mut client,
        json!({"type": "tabs", "id": 2, "query": "shared.example"}),
    )
    .await;
    assert_eq!(
        fetched,
        json!({
            "type": "tabs",
            "id": 2,
            "data": ["https://shared.example/", "https://shared.example/"]
        })
    );

    let recounted = request(
        &mut client,
        json!({"type": "count", "id": 3, "query": "shared.example"}),
    )
    .await;
    assert_eq!(recounted["data"], 0);

    let reply = server
        .handle
        .dispatch(Command::Show(ShowTarget::Files))
        .await
        .expect("dispatch");
    assert_eq!(reply.status.remove_pending, 2);
    let Some(Outcome::Files { total, .. }) = reply.outcomes.first() else {
        panic!("expected file rows");
    };
    assert_eq!(*total, 5);

    drop(client);
    server.stop().await;
}

/// Self-signed `localhost` certificate written as PEM files.
struct SelfSigned {
    dir: TempDir,
    cert: rcgen::Certificate,
}

impl SelfSigned {
    fn generate() -> Self {
        let rcgen::CertifiedKey { cert, key_pair } =
            rcgen::generate_simple_self_signed(vec!["localhost".to_owned()]).expect("certificate");
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("cert.pem"), cert.pem()).expect("write cert");
        std::fs::write(dir.path().join("key.pem"), key_pair.serialize_pem()).expect("write key");
        Self { dir, cert }
    }

    fn files(&self) -> TlsFiles {
        TlsFiles::new(self.dir.path().join("cert.pem"), self.dir.path().join("key.pem"))
    }

    /// Client config that trusts only this certificate.
    fn connector(&self) -> Connector {
        let mut roots = rustls::RootCertStore::empty();
        roots.add(self.cert.der().clone()).expect("trust anchor");
        let config = rustls::ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .expect("protocol versions")
        .with_root_certificates(roots)
        .with_no_client_auth();
        Connector::Rustls(Arc::new(config))
    }
}

#[tokio::test]
async fn secure_listener_answers_over_wss() {
    let certificate = SelfSigned::generate();
    let config = load_tls(&certificate.files()).await.expect("load tls");
    let server = Server::start_with(Some(config)).await;

    let url = format!("wss://localhost:{}{}", server.address.port(), WS_PATH);
    let (mut client, _) =
        connect_async_tls_with_config(url, None, false, Some(certificate.connector()))
            .await
            .expect("tls connect");
    assert!(matches!(client.get_ref(), MaybeTlsStream::Rustls(_)));

    let counted = request(&mut client, json!({"type": "count", "id": 7, "query": "rust"})).await;
    assert_eq!(counted, json!({"type": "count", "id": 7, "data": 3}));

    // Plain clients cannot talk to the secure socket.
    let plain = format!("ws://{}{}", server.address, WS_PATH);
    assert!(connect_async(plain).await.is_err());

    server.shutdown.request();
    assert_eq!(drain_until_closed(&mut client).await, 0);
    server.task.await.expect("server task").expect("serve");
}

#[tokio::test]
async fn empty_queries_get_no_response() {
    let server = Server::start().await;
    let mut client = server.connect().await;

    client
        .send(WsMessage::text(
            json!({"type": "count", "id": 1, "query": ""}).to_string(),
        ))
        .await
        .expect("send");
    let reply = request(&mut client, json!({"type": "count", "id": 2, "query": "rust"})).await;

    assert_eq!(reply["id"], 2);
    assert_eq!(reply["data"], 3);

    drop(client);
    server.stop().await;
}

#[rstest]
#[case::unknown_type(r#"{"type": "open", "id": 1, "query": "rust"}"#)]
#[case::not_json("count rust")]
#[case::missing_id(r#"{"type": "count", "query": "rust"}"#)]
#[tokio::test]
async fn protocol_errors_close_the_connection(#[case] frame: &str) {
    let server = Server::start().await;
    let mut client = server.connect().await;

    client.send(WsMessage::text(frame)).await.expect("send");
    assert_eq!(drain_until_closed(&mut client).await, 0);

    // The session is untouched and other clients are still served.
    let mut other = server.connect().await;
    let reply = request(&mut other, json!({"type": "count", "id": 9, "query": "rust"})).await;
    assert_eq!(reply["data"], 3);

    drop(other);
    server.stop().await;
}

#[tokio::test]
async fn shutdown_closes_open_connections() {
    let server = Server::start().await;
    let mut client = server.connect().await;
    request(&mut client, json!({"type": "count", "id": 1, "query": "rust"})).await;

    server.shutdown.request();
    assert_eq!(drain_until_closed(&mut client).await, 0);
    server.task.await.expect("server task").expect("serve");
}

#[tokio::test]
async fn single_character_queries_return_nothing_and_keep_found() {
    let server = Server::start().await;
    server
        .handle
        .dispatch(Command::find("rust"))
        .await
        .expect("dispatch");

    let request = MessageIn {
        kind: RequestKind::Tabs,
        id: 5,
        query: "r".to_owned(),
    };
    let response = answer(&server.handle, request).await.expect("answer");
    assert_eq!(response.data, ResponseData::Tabs(Vec::new()));

    let reply = server
        .handle
        .dispatch(Command::Show(ShowTarget::Found))
        .await
        .expect("dispatch");
    assert_eq!(reply.status.found, 3);
    assert_eq!(reply.status.remove_pending, 0);

    server.stop().await;
}

#[rstest]
#[case(r#"{"type": "count", "id": 1, "query": ""}"#)]
#[case(r#"{"type": "tabs", "id": 1}"#)]
fn empty_query_parses_to_nothing(#[case] frame: &str) {
    assert!(parse_request(frame).expect("valid frame").is_none());
}

#[test]
fn unknown_type_is_malformed() {
    let err = parse_request(r#"{"type": "nope", "id": 1, "query": "x"}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::Malformed(_)));
}
