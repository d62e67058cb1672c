//! `inactive` section: inactivity exemptions for guild members.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "inactive";

/// Handle for `inactive.*` methods.
pub struct Inactive<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// State of one player's inactivity exemption.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InactiveWindow {
    /// Whether the exemption is currently in force.
    #[serde(default)]
    pub state: bool,
    #[serde(default)]
    pub requested: i64,
    #[serde(default)]
    pub expired: i64,
}

/// One row of the full inactivity list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InactiveEntry {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub requested: i64,
    #[serde(default)]
    pub expired: i64,
}

#[derive(Debug, Default, Deserialize)]
struct AddReply {
    #[serde(default)]
    expires: i64,
}

#[derive(Debug, Default, Deserialize)]
struct CheckReply {
    #[serde(default)]
    info: InactiveWindow,
}

#[derive(Debug, Default, Deserialize)]
struct ListReply {
    #[serde(default)]
    list: Vec<InactiveEntry>,
}

impl Inactive<'_> {
    /// Marks a player inactive for the given number of days, returning the
    /// expiry timestamp.
    pub async fn add(&self, uuid: &str, days: u32) -> Result<i64, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "add",
                Verb::Post,
                vec![Param::body("uuid", uuid), Param::body("days", days)],
                true,
            )
            .await?;
        let reply: AddReply = decode(reply)?;
        Ok(reply.expires)
    }

    /// Removes a player from the inactivity list.
    pub async fn remove(&self, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(SECTION, "remove", Verb::Post, vec![Param::body("uuid", uuid)], true)
            .await?;
        Ok(())
    }

    /// Returns the exemption window for a player.
    pub async fn check(&self, uuid: &str) -> Result<InactiveWindow, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "check", Verb::Get, vec![Param::query("uuid", uuid)], true)
            .await?;
        let reply: CheckReply = decode(reply)?;
        Ok(reply.info)
    }

    /// Returns every player currently on the inactivity list.
    pub async fn list(&self) -> Result<Vec<InactiveEntry>, ApiError> {
        let reply = self.client.execute(SECTION, "list", Verb::Get, Vec::new(), true).await?;
        let reply: ListReply = decode(reply)?;
        Ok(reply.list)
    }
}
