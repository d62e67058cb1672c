//! `bridgelock` section: moderation locks on bridge access.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "bridgelock";

/// Handle for `bridgelock.*` methods.
pub struct Bridgelock<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Details of an active bridge lock.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockInfo {
    #[serde(default)]
    pub lock_id: Option<i64>,
    #[serde(default, rename = "moderator")]
    pub moderator_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Reply of `bridgelock.check`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockStatus {
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub info: LockInfo,
}

impl Bridgelock<'_> {
    /// Locks a player out of guild bridges.
    pub async fn add(&self, uuid: &str, moderator_id: &str, reason: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "add",
                Verb::Post,
                vec![
                    Param::body("uuid", uuid),
                    Param::body("moderator_id", moderator_id),
                    Param::body("reason", reason),
                ],
                true,
            )
            .await?;
        Ok(())
    }

    /// Checks whether a player is bridge locked.
    pub async fn check(&self, uuid: &str) -> Result<LockStatus, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "check", Verb::Get, vec![Param::query("uuid", uuid)], true)
            .await?;
        decode(reply)
    }

    /// Lifts the bridge lock for a player.
    pub async fn remove(&self, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(SECTION, "remove", Verb::Post, vec![Param::body("uuid", uuid)], true)
            .await?;
        Ok(())
    }
}
