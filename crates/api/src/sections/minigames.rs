//! `minigames` section: coin economy and game logs.

use serde::Deserialize;
use serde_json::Value;

use guildgate_types::{Param, Verb};

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "minigames";

/// Handle for `minigames.*` methods.
pub struct Minigames<'a> {
    pub(crate) client: &'a GuildgateClient,
}

// TODO: add fund holds so an aborted game cannot debit the player; needs a
// reserve/commit pair on the service side before it can land here.

/// Coin balances of one profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MinigameCoins {
    #[serde(default)]
    pub purse: i64,
    #[serde(default)]
    pub bank: i64,
    #[serde(default)]
    pub total: i64,
}

/// One minigame profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MinigamePlayer {
    #[serde(default)]
    pub discord_id: String,
    #[serde(default)]
    pub coins: MinigameCoins,
    /// Cooldown timers keyed by activity name.
    #[serde(default)]
    pub cooldowns: Value,
}

#[derive(Debug, Default, Deserialize)]
struct TopReply {
    #[serde(default)]
    top: Vec<MinigamePlayer>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileReply {
    #[serde(default)]
    profile: MinigamePlayer,
}

impl Minigames<'_> {
    /// Adjusts the purse balance. The wire takes an absolute amount plus a
    /// `negative` flag, so the sign is split off here.
    pub async fn update_coins(&self, discord_id: &str, amount: i64) -> Result<(), ApiError> {
        let negative = amount < 0;
        self.client
            .execute(
                SECTION,
                "updateCoins",
                Verb::Post,
                vec![
                    Param::body("discord_id", discord_id),
                    Param::body("amount", amount.abs()),
                    Param::body("negative", if negative { 1 } else { 0 }),
                ],
                true,
            )
            .await?;
        Ok(())
    }

    /// Resets one named cooldown timer to the given time.
    pub async fn reset_cooldown(&self, discord_id: &str, cooldown: &str, time: i64) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "resetCooldown",
                Verb::Post,
                vec![
                    Param::body("discord_id", discord_id),
                    Param::body("cooldown", cooldown),
                    Param::body("time", time),
                ],
                true,
            )
            .await?;
        Ok(())
    }

    /// Logs a completed game outcome.
    pub async fn log_outcome(
        &self,
        game_id: &str,
        discord_id: &str,
        game: &str,
        bet: i64,
        outcome: i64,
    ) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "logOutcome",
                Verb::Post,
                vec![
                    Param::body("game_id", game_id),
                    Param::body("discord_id", discord_id),
                    Param::body("game", game),
                    Param::body("bet", bet),
                    Param::body("outcome", outcome),
                ],
                true,
            )
            .await?;
        Ok(())
    }

    /// Returns the top players sorted by net worth.
    pub async fn get_top(&self) -> Result<Vec<MinigamePlayer>, ApiError> {
        let reply = self.client.execute(SECTION, "getTop", Verb::Get, Vec::new(), true).await?;
        let reply: TopReply = decode(reply)?;
        Ok(reply.top)
    }

    /// Returns the profile for a Discord ID.
    pub async fn get_profile(&self, discord_id: &str) -> Result<MinigamePlayer, ApiError> {
        let reply = self
            .client
            .execute(
                SECTION,
                "getProfile",
                Verb::Get,
                vec![Param::query("discord_id", discord_id)],
                true,
            )
            .await?;
        let reply: ProfileReply = decode(reply)?;
        Ok(reply.profile)
    }

    /// Moves coins between bank and purse.
    pub async fn bank_transfer(&self, discord_id: &str, amount: i64, withdraw: bool) -> Result<(), ApiError> {
        self.client
            .execute(
                SECTION,
                "bankTransfer",
                Verb::Post,
                vec![
                    Param::body("discord_id", discord_id),
                    Param::body("amount", amount),
                    Param::body("withdraw", if withdraw { 1 } else { 0 }),
                ],
                true,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::stub_client;

    #[tokio::test]
    async fn update_coins_splits_the_sign_off() {
        let (client, transport) = stub_client(json!({ "success": true }));

        client.minigames().update_coins("42", -250).await.expect("update");

        let body = transport.last_request().expect("request").body.expect("body");
        assert_eq!(body["amount"], json!(250));
        assert_eq!(body["negative"], json!(1));
    }

    #[tokio::test]
    async fn positive_amounts_clear_the_negative_flag() {
        let (client, transport) = stub_client(json!({ "success": true }));

        client.minigames().update_coins("42", 100).await.expect("update");

        let body = transport.last_request().expect("request").body.expect("body");
        assert_eq!(body["amount"], json!(100));
        assert_eq!(body["negative"], json!(0));
    }

    #[tokio::test]
    async fn bank_transfer_encodes_withdraw_as_a_flag() {
        let (client, transport) = stub_client(json!({ "success": true }));

        client.minigames().bank_transfer("42", 500, true).await.expect("transfer");

        let body = transport.last_request().expect("request").body.expect("body");
        assert_eq!(body["withdraw"], json!(1));
    }
}
