//! `experimental` section: features still behind the service's experiments
//! flag.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "experimental";

/// Handle for `experimental.*` methods.
pub struct Experimental<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Verdict of the message-moderation model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationVerdict {
    /// Action to take; the service falls back to allowing the message when
    /// the model is unavailable.
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub fallback: bool,
}

fn default_action() -> String {
    "allow".to_string()
}

impl Default for ModerationVerdict {
    fn default() -> Self {
        Self {
            action: default_action(),
            fallback: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct InvitedReply {
    #[serde(default)]
    saved: bool,
}

impl Experimental<'_> {
    /// Runs AI moderation over a player message.
    pub async fn moderate_message(&self, message: &str) -> Result<ModerationVerdict, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "moderateMessage",
                Verb::Post,
                vec![Param::body("message", message)],
                true,
            )
            .await?;
        decode(reply)
    }

    /// Records that a player was invited to the guild.
    pub async fn save_invite(&self, uuid: &str) -> Result<(), ApiError> {
        self.client
            .execute(SECTION, "saveInvite", Verb::Post, vec![Param::body("uuid", uuid)], true)
            .await?;
        Ok(())
    }

    /// Checks whether a player was already invited to the guild.
    pub async fn was_invited(&self, uuid: &str) -> Result<bool, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "wasInvited", Verb::Get, vec![Param::query("uuid", uuid)], true)
            .await?;
        let reply: InvitedReply = decode(reply)?;
        Ok(reply.saved)
    }
}
