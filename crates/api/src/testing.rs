//! Transport stubs and logging bootstrap for in-crate tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use guildgate_types::RequestDescriptor;
use serde_json::{Value, json};

use crate::transport::Transport;

/// Initialize tracing for tests. Idempotent across threads.
pub(crate) fn init_test_logging() {
    use std::sync::OnceLock;
    static INIT: OnceLock<()> = OnceLock::new();

    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()))
            .with_test_writer()
            .try_init();
    });
}

/// Replies with a canned payload and remembers the last descriptor.
pub(crate) struct StubTransport {
    payload: Option<Value>,
    calls: AtomicUsize,
    last: Mutex<Option<RequestDescriptor>>,
}

impl StubTransport {
    pub(crate) fn replying(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Transport succeeds but the service returns no body.
    pub(crate) fn empty() -> Self {
        Self {
            payload: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<RequestDescriptor> {
        self.last.lock().expect("stub transport lock").clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("stub transport lock") = Some(request.clone());
        Ok(self.payload.clone())
    }
}

/// Always fails at the transport level.
pub(crate) struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: &RequestDescriptor) -> Result<Option<Value>> {
        Err(anyhow!("connection refused"))
    }
}

/// Answers `token.auth` with a fixed token and everything else with a bare
/// success marker, counting both kinds of traffic.
pub(crate) struct IssuingTransport {
    token: String,
    auth_calls: AtomicUsize,
    api_calls: AtomicUsize,
    last_auth_header: Mutex<Option<String>>,
}

impl IssuingTransport {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            auth_calls: AtomicUsize::new(0),
            api_calls: AtomicUsize::new(0),
            last_auth_header: Mutex::new(None),
        }
    }

    pub(crate) fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_auth_header(&self) -> Option<String> {
        self.last_auth_header.lock().expect("issuing transport lock").clone()
    }
}

/// Build a client whose transport replies with `payload` on every call.
pub(crate) fn stub_client(payload: Value) -> (crate::client::GuildgateClient, std::sync::Arc<StubTransport>) {
    let transport = std::sync::Arc::new(StubTransport::replying(payload));
    let client = crate::client::GuildgateClient::with_transport(
        "https://provider.example/api/",
        crate::client::Credentials::api_token("T"),
        transport.clone(),
    )
    .expect("stub client");
    (client, transport)
}

#[async_trait]
impl Transport for IssuingTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>> {
        if request.query_value("method").as_deref() == Some("token.auth") {
            assert_eq!(
                request.header("authorization"),
                None,
                "the bootstrap call must not be authorized"
            );
            self.auth_calls.fetch_add(1, Ordering::SeqCst);
            // Widen the race window for coalescing tests.
            tokio::task::yield_now().await;
            return Ok(Some(json!({ "token": self.token, "owner": "10" })));
        }

        self.api_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_auth_header.lock().expect("issuing transport lock") =
            request.header("authorization").map(str::to_string);
        Ok(Some(json!({ "success": true })))
    }
}
