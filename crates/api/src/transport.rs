//! Transport strategies for dispatching built requests.
//!
//! The dispatcher hands a finished [`RequestDescriptor`] to whichever
//! transport the client was constructed with: [`NetworkTransport`] performs
//! the HTTP round-trip, [`RecordingTransport`] captures the descriptor and
//! never touches the network. Classification of the reply stays in the
//! dispatcher; a transport only reports what came back, or that the exchange
//! itself failed.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use guildgate_types::{RequestDescriptor, Verb};
use serde_json::Value;
use tracing::{debug, warn};

/// Observer fired by [`RecordingTransport`] for every captured descriptor.
pub type DescriptorObserver = Box<dyn Fn(&RequestDescriptor) + Send + Sync>;

/// Executes a fully built request descriptor.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the descriptor. Returns the decoded JSON body, `None` when the
    /// service produced no body, or the transport-level failure.
    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>>;
}

/// HTTP transport backed by `reqwest`.
pub struct NetworkTransport {
    http: reqwest::Client,
}

impl NetworkTransport {
    /// Build the transport with its preconfigured HTTP client.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for NetworkTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>> {
        let method = match request.method {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
        };

        let mut builder = self.http.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.context("send API request")?;
        let status = response.status();
        if let Err(error) = response.error_for_status_ref() {
            warn!(url = %request.url, %status, "API request failed");
            return Err(anyhow!(error));
        }

        let text = response.text().await.context("read API response body")?;
        if text.trim().is_empty() {
            debug!(url = %request.url, %status, "API response had no body");
            return Ok(None);
        }

        let value =
            serde_json::from_str(&text).with_context(|| format!("parse JSON response (status {status})"))?;
        Ok(Some(value))
    }
}

/// Capture transport: records descriptors instead of performing I/O.
///
/// Inject one at construction to put a client into capture mode. Every call
/// records the fully built descriptor (resolved query string, headers with
/// any attached authorization, and body) and resolves to JSON null, so no
/// call ever reaches the network. The conformance harness asserts over
/// [`RecordingTransport::recorded`].
#[derive(Default)]
pub struct RecordingTransport {
    recorded: Mutex<Vec<RequestDescriptor>>,
    observer: Option<DescriptorObserver>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture with an observer fired synchronously for each descriptor.
    pub fn with_observer(observer: impl Fn(&RequestDescriptor) + Send + Sync + 'static) -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
            observer: Some(Box::new(observer)),
        }
    }

    /// Descriptors captured so far, in call order.
    pub fn recorded(&self) -> Vec<RequestDescriptor> {
        self.recorded.lock().expect("recording transport lock").clone()
    }

    pub fn len(&self) -> usize {
        self.recorded.lock().expect("recording transport lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>> {
        if let Some(observer) = &self.observer {
            observer(request);
        }
        self.recorded
            .lock()
            .expect("recording transport lock")
            .push(request.clone());
        Ok(Some(Value::Null))
    }
}
