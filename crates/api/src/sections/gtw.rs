//! `gtw` section: the Guess The Word minigame.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "gtw";

/// Handle for `gtw.*` methods.
pub struct Gtw<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Hints generated for one round.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordRound {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// One leaderboard row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtwPlayer {
    #[serde(default)]
    pub discord_id: String,
    #[serde(default)]
    pub total: i64,
}

/// Weekly and overall variants of a leaderboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtwLeaderboard {
    #[serde(default)]
    pub weekly: Vec<GtwPlayer>,
    #[serde(default)]
    pub overall: Vec<GtwPlayer>,
}

/// Both Guess The Word leaderboards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtwTop {
    #[serde(default)]
    pub score: GtwLeaderboard,
    #[serde(default)]
    pub rounds: GtwLeaderboard,
}

#[derive(Debug, Default, Deserialize)]
struct TopReply {
    #[serde(default)]
    top: GtwTop,
}

#[derive(Debug, Default, Deserialize)]
struct AwardReply {
    #[serde(default)]
    game_id: Option<String>,
}

impl Gtw<'_> {
    /// Generates the description and hints for a word.
    pub async fn start(&self, word: &str) -> Result<WordRound, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "start", Verb::Get, vec![Param::query("word", word)], true)
            .await?;
        decode(reply)
    }

    /// Returns the score and rounds leaderboards.
    pub async fn get_top(&self) -> Result<GtwTop, ApiError> {
        let reply = self.client.execute(SECTION, "getTop", Verb::Get, Vec::new(), true).await?;
        let reply: TopReply = decode(reply)?;
        Ok(reply.top)
    }

    /// Awards points for a finished round, returning the logged game id.
    pub async fn award_points(&self, discord_id: &str, points: i64) -> Result<Option<String>, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "awardPoints",
                Verb::Post,
                vec![Param::body("discord_id", discord_id), Param::body("points", points)],
                true,
            )
            .await?;
        let reply: AwardReply = decode(reply)?;
        Ok(reply.game_id)
    }
}
