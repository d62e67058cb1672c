//! `services` section: per-token service configuration.

use serde::Deserialize;
use serde_json::{Map, Value};

use guildgate_types::Verb;

use crate::client::GuildgateClient;
use crate::error::ApiError;
use crate::sections::decode;

const SECTION: &str = "services";

/// Handle for `services.*` methods.
pub struct Services<'a> {
    pub(crate) client: &'a GuildgateClient,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigReply {
    #[serde(default)]
    config: Map<String, Value>,
}

impl Services<'_> {
    /// Returns the configuration variables of the service behind the token.
    pub async fn get_config(&self) -> Result<Map<String, Value>, ApiError> {
        let reply = self
            .client
            .execute(SECTION, "getConfig", Verb::Get, Vec::new(), true)
            .await?;
        let reply: ConfigReply = decode(reply)?;
        Ok(reply.config)
    }
}
