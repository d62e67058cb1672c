//! `server` section: service blacklist and Discord verification.

use serde::Deserialize;
use serde_json::Value;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "server";

/// Handle for `server.*` methods.
pub struct Server<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Blacklist state of one player.
#[derive(Debug, Clone, Deserialize)]
pub struct BlacklistStatus {
    #[serde(default)]
    pub banned: bool,
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "N/A".to_string()
}

impl Default for BlacklistStatus {
    fn default() -> Self {
        Self {
            banned: false,
            reason: default_reason(),
        }
    }
}

/// Verification record of one member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifiedAccount {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub discord_id: Option<String>,
}

impl Server<'_> {
    /// Blacklists a player from the service. The reason travels even when
    /// absent, as an explicit null.
    pub async fn add_blacklist(&self, uuid: &str, reason: Option<&str>) -> Result<(), ApiError> {
        let reason = match reason {
            Some(reason) => Value::from(reason),
            None => Value::Null,
        };
        self.client
            .execute(
                SECTION,
                "addBlacklist",
                Verb::Post,
                vec![Param::body("uuid", uuid), Param::body("reason", reason)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Lifts a player's blacklist.
    pub async fn remove_blacklist(&self, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "removeBlacklist",
                Verb::Post,
                vec![Param::body("uuid", uuid)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Checks whether a player is blacklisted.
    pub async fn is_blacklisted(&self, uuid: &str) -> Result<BlacklistStatus, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "isBlacklisted",
                Verb::Get,
                vec![Param::query("uuid", uuid)],
                true,
            )
            .await?;
        decode(reply)
    }

    /// Records a member as verified.
    pub async fn verify(&self, discord_id: &str, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "verify",
                Verb::Post,
                vec![Param::body("discord_id", discord_id), Param::body("uuid", uuid)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Clears a member's verification.
    pub async fn unverify(&self, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(SECTION, "unverify", Verb::Post, vec![Param::body("uuid", uuid)], true)
            .await?;
        Ok(())
    }

    /// Looks up a verification record by game UUID or Discord ID.
    pub async fn get_verified(
        &self,
        uuid: Option<&str>,
        discord_id: Option<&str>,
    ) -> Result<VerifiedAccount, ApiError> {
        let mut params = Vec::new();
        if let Some(uuid) = uuid {
            params.push(Param::query("uuid", uuid));
        }
        if let Some(discord_id) = discord_id {
            params.push(Param::query("discord_id", discord_id));
        }

        let reply = self
            .client
            .execute(SECTION, "getVerified", Verb::Get, params, true)
            .await?;
        decode(reply)
    }
}
