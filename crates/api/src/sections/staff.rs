//! `staff` section: moderation action log.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "staff";

/// Handle for `staff.*` methods.
pub struct Staff<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// One logged moderation action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffLogEntry {
    #[serde(default)]
    pub action_id: i64,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub affected: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub approved_by: String,
}

#[derive(Debug, Default, Deserialize)]
struct CreateReply {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct LogsReply {
    #[serde(default)]
    actions: Vec<StaffLogEntry>,
}

impl Staff<'_> {
    /// Creates a log entry, returning its id.
    pub async fn create_log(
        &self,
        actor: &str,
        action: &str,
        affected: &str,
        description: &str,
    ) -> Result<String, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "createLog",
                Verb::Post,
                vec![
                    Param::body("actor", actor),
                    Param::body("action", action),
                    Param::body("affected", affected),
                    Param::body("description", description),
                ],
                true,
            )
            .await?;
        let reply: CreateReply = decode(reply)?;
        Ok(reply.id)
    }

    /// Approves a pending log entry.
    pub async fn approve_log(&self, id: &str, reviewer: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "approveLog",
                Verb::Post,
                vec![Param::body("id", id), Param::body("reviewer", reviewer)],
                true,
            )
            .await?;
        Ok(())
    }

    /// Denies (removes) a pending log entry.
    pub async fn deny_log(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .execute(SECTION, "denyLog", Verb::Post, vec![Param::body("id", id)], true)
            .await?;
        Ok(())
    }

    /// Returns the log entries recorded for an actor.
    pub async fn get_logs(&self, actor: &str) -> Result<Vec<StaffLogEntry>, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "getLogs", Verb::Get, vec![Param::query("actor", actor)], true)
            .await?;
        let reply: LogsReply = decode(reply)?;
        Ok(reply.actions)
    }
}
