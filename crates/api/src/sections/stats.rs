//! `stats` section: public guild statistics. These methods are served
//! without authorization.

use serde::Deserialize;
use serde_json::Value;

use guildgate_types::Verb;

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "stats";

/// Handle for `stats.*` methods.
pub struct Stats<'a> {
    pub(crate) client: &'a GuildgateClient,
}

/// Per-week statistics series keyed by guild.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSeries {
    #[serde(default)]
    pub weeks: Vec<String>,
    #[serde(default)]
    pub points: Value,
    #[serde(default)]
    pub guilds: Value,
}

/// Hourly message statistics keyed by guild.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub points: Value,
    #[serde(default)]
    pub guilds: Value,
}

impl Stats<'_> {
    /// Returns per-player statistics over time. Aggregation endpoint with
    /// weak guarantees.
    pub async fn get_player_stats(&self) -> Result<StatsSeries, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "getPlayerStats", Verb::Get, Vec::new(), false)
            .await?;
        decode(reply)
    }

    /// Returns hourly message statistics.
    pub async fn get_hourly_stats(&self) -> Result<HourlySeries, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "getHourlyStats", Verb::Get, Vec::new(), false)
            .await?;
        decode(reply)
    }

    /// Returns weekly guild statistics.
    pub async fn get_weekly_stats(&self) -> Result<StatsSeries, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "getWeeklyStats", Verb::Get, Vec::new(), false)
            .await?;
        decode(reply)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::stub_client;

    #[tokio::test]
    async fn stats_calls_are_dispatched_unauthorized() {
        let (client, transport) = stub_client(json!({ "weeks": ["2024-40"], "points": {}, "guilds": {} }));

        let series = client.stats().get_weekly_stats().await.expect("series");
        assert_eq!(series.weeks, ["2024-40"]);

        let request = transport.last_request().expect("request");
        assert_eq!(request.header("authorization"), None);
    }
}
