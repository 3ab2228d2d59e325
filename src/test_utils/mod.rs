#![allow(missing_docs)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use axum::{Router, http::HeaderMap};
use serde_json::{Value, json};
use tracing::subscriber::DefaultGuard;

use crate::{BudgetClient, auth::AuthToken};

/// The raw token the fake server hands out and expects back.
pub(crate) const TEST_TOKEN: &str = "test-token";

/// Serve `router` on an ephemeral port and return a client pointed at it.
///
/// Routes should be registered with their full path, e.g. `/api/auth/login`.
pub(crate) async fn spawn_server(router: Router) -> BudgetClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener
        .local_addr()
        .expect("Could not get test listener address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server crashed");
    });

    BudgetClient::new(&format!("http://{address}/api")).expect("Could not build client")
}

/// Like [spawn_server], but the client already holds [TEST_TOKEN].
pub(crate) async fn spawn_server_logged_in(router: Router) -> BudgetClient {
    let client = spawn_server(router).await;
    client.set_token(AuthToken::new(TEST_TOKEN));
    client
}

/// Whether the request carried `Authorization: Bearer test-token`.
pub(crate) fn has_test_token(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-token")
}

/// A success envelope around `data`.
pub(crate) fn ok(data: Value) -> Value {
    json!({"code": 200, "message": "success", "data": data})
}

/// A failure envelope.
pub(crate) fn failure(code: i64, message: &str) -> Value {
    json!({"code": code, "message": message, "data": null})
}

/// The envelope a server sends when the token is missing or wrong.
pub(crate) fn unauthorized() -> Value {
    failure(401, "未登录")
}

/// Everything written by the subscriber installed with [capture_logs].
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Record every event at `trace` and above on this thread until the guard
/// is dropped. Use with a current-thread runtime.
pub(crate) fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
