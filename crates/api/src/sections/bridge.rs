//! `bridge` section: chat-bridge account linking and liveness.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "bridge";

/// Handle for `bridge.*` methods.
pub struct Bridge<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Linked-account record returned by `bridge.getLinked`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkedAccount {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub discord_id: Option<String>,
}

/// Connection status of one account's bridge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusReply {
    #[serde(default)]
    status: BridgeStatus,
}

impl Bridge<'_> {
    /// Links a Discord account to a game account via bridge verification.
    pub async fn link(&self, discord_id: &str, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "link",
                Verb::Post,
                vec![Param::body("discord_id", discord_id), Param::body("uuid", uuid)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Looks up the link record by game UUID or Discord ID; either side of
    /// the link may be supplied.
    pub async fn get_linked(
        &self,
        uuid: Option<&str>,
        discord_id: Option<&str>,
    ) -> Result<LinkedAccount, ApiError> {
        let mut params = Vec::new();
        if let Some(uuid) = uuid {
            params.push(Param::query("uuid", uuid));
        }
        if let Some(discord_id) = discord_id {
            params.push(Param::query("discord_id", discord_id));
        }

        let reply = self
            .client
            .execute(SECTION, "getLinked", Verb::Get, params, true)
            .await?;
        decode(reply)
    }

    /// Reports the bridge status of the token's own connection.
    pub async fn set_status(&self, connected: bool, version: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "setStatus",
                Verb::Post,
                vec![Param::body("connected", connected), Param::body("version", version)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Returns the bridge status reported for an account.
    pub async fn get_status(&self, account_id: &str) -> Result<BridgeStatus, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "getStatus",
                Verb::Get,
                vec![Param::query("account_id", account_id)],
                true,
            )
            .await?;
        let reply: StatusReply = decode(reply)?;
        Ok(reply.status)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::stub_client;

    #[tokio::test]
    async fn get_linked_only_sends_supplied_sides() {
        let (client, transport) = stub_client(json!({ "uuid": "u-1", "discord_id": "42" }));

        let linked = client.bridge().get_linked(None, Some("42")).await.expect("linked");
        assert_eq!(linked.uuid.as_deref(), Some("u-1"));

        let request = transport.last_request().expect("request");
        let names: Vec<String> = request.query_pairs().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["method", "discord_id"]);
    }

    #[tokio::test]
    async fn get_status_unwraps_the_envelope() {
        let (client, _transport) = stub_client(json!({
            "status": { "connected": true, "version": "2.4.1", "timestamp": 1_700_000_000 }
        }));

        let status = client.bridge().get_status("77").await.expect("status");
        assert!(status.connected);
        assert_eq!(status.version.as_deref(), Some("2.4.1"));
    }

    #[tokio::test]
    async fn absent_status_fields_default() {
        let (client, _transport) = stub_client(json!({ "status": {} }));

        let status = client.bridge().get_status("77").await.expect("status");
        assert!(!status.connected);
        assert_eq!(status.timestamp, None);
    }
}
