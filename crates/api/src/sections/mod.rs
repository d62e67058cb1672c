//! Per-section method wrappers.
//!
//! Each section borrows the client and translates typed arguments into call
//! parameters for [`GuildgateClient::execute`](crate::client::GuildgateClient::execute).
//! Reply reshaping (envelopes, serde defaults for absent fields) happens
//! here; the dispatcher itself never reinterprets a successful payload.

pub mod bridge;
pub mod bridgelock;
pub mod experimental;
pub mod gtw;
pub mod inactive;
pub mod longpoll;
pub mod minigames;
pub mod score;
pub mod server;
pub mod services;
pub mod staff;
pub mod stats;
pub mod token;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::decode)
}
