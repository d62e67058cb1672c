//! `token` section: API token issuance and introspection.

use serde::Deserialize;
use serde_json::Value;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "token";

/// Handle for `token.*` methods.
pub struct Token<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Reply of `token.auth`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthGrant {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Identity and capabilities of the token in use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenIdentity {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub features: Value,
    #[serde(default)]
    pub bot_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MeReply {
    #[serde(default)]
    information: TokenIdentity,
}

#[derive(Debug, Default, Deserialize)]
struct IssueReply {
    #[serde(default)]
    token: String,
}

impl Token<'_> {
    /// Trades an identity token for an API token.
    ///
    /// This is the same remote method the client uses to bootstrap its own
    /// credential; calling it directly never touches the cached token.
    pub async fn auth(&self, identity_token: &str) -> Result<AuthGrant, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "auth",
                Verb::Post,
                vec![Param::body("token", identity_token)],
                false,
            )
            .await?;
        decode(reply)
    }

    /// Issues an API token for the given account.
    pub async fn issue(&self, owner: &str) -> Result<String, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "issue", Verb::Post, vec![Param::body("owner", owner)], true)
            .await?;
        let reply: IssueReply = decode(reply)?;
        Ok(reply.token)
    }

    /// Returns the information about the API token in use.
    pub async fn me(&self) -> Result<TokenIdentity, ApiError> {
        let reply = self.client.execute(SECTION, "me", Verb::Get, Vec::new(), true).await?;
        let reply: MeReply = decode(reply)?;
        Ok(reply.information)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::stub_client;

    #[tokio::test]
    async fn me_unwraps_the_information_envelope() {
        let (client, _transport) = stub_client(json!({
            "information": {
                "account_id": "77",
                "name": "Bridge Bot",
                "guild_id": "g-1",
                "type": "bot",
                "features": ["bridge"],
                "bot_id": "b-1",
            }
        }));

        let identity = client.token().me().await.expect("identity");
        assert_eq!(identity.account_id.as_deref(), Some("77"));
        assert_eq!(identity.kind.as_deref(), Some("bot"));
        assert_eq!(identity.features, json!(["bridge"]));
    }

    #[tokio::test]
    async fn issue_extracts_the_token() {
        let (client, transport) = stub_client(json!({ "token": "fresh" }));

        let token = client.token().issue("77").await.expect("token");
        assert_eq!(token, "fresh");

        let request = transport.last_request().expect("request");
        assert_eq!(request.query_value("method").as_deref(), Some("token.issue"));
        assert_eq!(request.body.as_ref().expect("body")["owner"], json!("77"));
    }

    #[tokio::test]
    async fn auth_is_dispatched_unauthorized() {
        let (client, transport) = stub_client(json!({ "token": "t", "owner": "77" }));

        let grant = client.token().auth("identity").await.expect("grant");
        assert_eq!(grant.token, "t");
        assert_eq!(grant.owner.as_deref(), Some("77"));

        let request = transport.last_request().expect("request");
        assert_eq!(request.header("authorization"), None);
    }
}
