//! `score` section: guild message scores and leaderboards.

use serde::Deserialize;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "score";

/// Handle for `score.*` methods.
pub struct Score<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Aggregation period of a score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Hour,
    Day,
    Week,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Hour => "hour",
            Period::Day => "day",
            Period::Week => "week",
        }
    }
}

/// Score and leaderboard place of one player.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreStanding {
    #[serde(default)]
    pub place: i64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub nick: String,
}

/// One leaderboard row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerScore {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub nick: String,
}

/// One page of the guild leaderboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreboardPage {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub players: Vec<PlayerScore>,
}

/// Raw score record. Fields arrive as text from the aggregation store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreEntry {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub nick: String,
    #[serde(default)]
    pub guild_id: String,
    #[serde(default)]
    pub messages: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub last_message: String,
}

#[derive(Debug, Default, Deserialize)]
struct EntryReply {
    #[serde(default)]
    entry: ScoreEntry,
}

impl Score<'_> {
    /// Returns a player's score and place in this week's cutoff.
    pub async fn get_cutoff(&self, uuid: &str, overall: bool) -> Result<ScoreStanding, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "getCutoff",
                Verb::Get,
                vec![
                    Param::query("uuid", uuid),
                    Param::query("overall", if overall { 1 } else { 0 }),
                ],
                true,
            )
            .await?;
        decode(reply)
    }

    /// Returns a player's score and place over the past seven days.
    pub async fn get_rolling(&self, uuid: &str, overall: bool) -> Result<ScoreStanding, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "getRolling",
                Verb::Get,
                vec![
                    Param::query("uuid", uuid),
                    Param::query("overall", if overall { 1 } else { 0 }),
                ],
                true,
            )
            .await?;
        decode(reply)
    }

    /// Logs one sent guild message.
    pub async fn save_message(&self, uuid: &str, nick: &str, guild_id: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "saveMessage",
                Verb::Post,
                vec![
                    Param::body("uuid", uuid),
                    Param::body("nick", nick),
                    Param::body("guild_id", guild_id),
                ],
                true,
            )
            .await?;
        Ok(())
    }

    /// Returns a page of the guild leaderboard. A zero offset is omitted
    /// from the request, as is an unset guild filter.
    pub async fn get_top(&self, guild_id: Option<&str>, offset: u32) -> Result<ScoreboardPage, ApiError> {
        let mut params = Vec::new();
        if let Some(guild_id) = guild_id {
            params.push(Param::query("guild_id", guild_id));
        }
        if offset != 0 {
            params.push(Param::query("offset", offset));
        }

        let reply = self.client.execute(SECTION, "getTop", Verb::Get, params, true).await?;
        decode(reply)
    }

    /// Sums the player entries from a starting period onward. Aggregation
    /// endpoint with weak guarantees; prefer the leaderboards when possible.
    pub async fn get_player_summary(
        &self,
        uuid: &str,
        period: Period,
        period_id: &str,
    ) -> Result<ScoreEntry, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "getPlayerSummary",
                Verb::Get,
                vec![
                    Param::query("uuid", uuid),
                    Param::query("type", period.as_str()),
                    Param::query("period_id", period_id),
                ],
                true,
            )
            .await?;
        let reply: EntryReply = decode(reply)?;
        Ok(reply.entry)
    }

    /// Returns one raw score record. Same caveats as
    /// [`Score::get_player_summary`].
    pub async fn get_player_entry(&self, uuid: &str, period: Period, period_id: &str) -> Result<ScoreEntry, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "getPlayerEntry",
                Verb::Get,
                vec![
                    Param::query("uuid", uuid),
                    Param::query("type", period.as_str()),
                    Param::query("period_id", period_id),
                ],
                true,
            )
            .await?;
        let reply: EntryReply = decode(reply)?;
        Ok(reply.entry)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::stub_client;

    #[tokio::test]
    async fn get_cutoff_converts_the_overall_flag() {
        let (client, transport) = stub_client(json!({ "place": 3, "score": 1200, "nick": "ash" }));

        let standing = client.score().get_cutoff("u-1", true).await.expect("standing");
        assert_eq!(standing.place, 3);

        let request = transport.last_request().expect("request");
        assert_eq!(request.query_value("overall").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn get_top_omits_unset_filters() {
        let (client, transport) = stub_client(json!({ "total": 0, "players": [] }));

        client.score().get_top(None, 0).await.expect("page");

        let request = transport.last_request().expect("request");
        let names: Vec<String> = request.query_pairs().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["method"]);
    }

    #[tokio::test]
    async fn get_top_sends_filters_when_set() {
        let (client, transport) = stub_client(json!({ "total": 40, "players": [] }));

        client.score().get_top(Some("g-1"), 20).await.expect("page");

        let request = transport.last_request().expect("request");
        assert_eq!(request.query_value("guild_id").as_deref(), Some("g-1"));
        assert_eq!(request.query_value("offset").as_deref(), Some("20"));
    }
}
