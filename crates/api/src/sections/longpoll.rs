//! `longpoll` section: queued requests handed to polling workers.

use serde::Deserialize;
use serde_json::Value;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "longpoll";

/// Handle for `longpoll.*` methods.
pub struct Longpoll<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// One queued request awaiting a worker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LongpollRequest {
    #[serde(default)]
    pub rid: i64,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Default, Deserialize)]
struct ApplicableReply {
    #[serde(default)]
    requests: Vec<LongpollRequest>,
}

impl Longpoll<'_> {
    /// Queues a request. The payload travels as JSON text inside the body
    /// object, matching how workers read it back.
    pub async fn create(&self, action: &str, executor: &str, payload: &Value) -> Result<(), ApiError> {
        let payload_text = serde_json::to_string(payload)
            .map_err(|error| ApiError::Configuration(format!("unserializable longpoll payload: {error}")))?;
        self.client
            .execute(
                SECTION,
                "create",
                Verb::Post,
                vec![
                    Param::body("action", action),
                    Param::body("executor", executor),
                    Param::body("payload", payload_text),
                ],
                true,
            )
            .await?;
        Ok(())
    }

    /// Removes a queued request.
    pub async fn remove(&self, request_id: i64) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "remove",
                Verb::Post,
                vec![Param::body("request_id", request_id)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Returns the queued requests applicable to this token.
    pub async fn get_applicable(&self) -> Result<Vec<LongpollRequest>, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "getApplicable", Verb::Get, Vec::new(), true)
            .await?;
        let reply: ApplicableReply = decode(reply)?;
        Ok(reply.requests)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::stub_client;

    #[tokio::test]
    async fn create_serializes_the_payload_as_text() {
        let (client, transport) = stub_client(json!({ "success": true }));

        client
            .longpoll()
            .create("kick", "42", &json!({ "uuid": "u-1" }))
            .await
            .expect("create");

        let request = transport.last_request().expect("request");
        let body = request.body.as_ref().expect("body");
        assert_eq!(body["payload"], json!(r#"{"uuid":"u-1"}"#));
    }

    #[tokio::test]
    async fn get_applicable_defaults_to_an_empty_queue() {
        let (client, _transport) = stub_client(json!({}));
        let requests = client.longpoll().get_applicable().await.expect("requests");
        assert!(requests.is_empty());
    }
}
