//! Guildgate API client.
//!
//! The Guildgate service is a JSON-over-HTTP API addressed by
//! `method={section}.{method}` query identities. This crate exposes it as
//! namespaced method calls while transparently managing the bearer token the
//! service itself issues: construct a [`GuildgateClient`] with either an
//! identity token (the API token is then issued lazily through `token.auth`)
//! or a pre-issued API token, and call section methods on it.
//!
//! # Example
//!
//! ```ignore
//! use guildgate_api::{Credentials, GuildgateClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), guildgate_api::ApiError> {
//!     let client = GuildgateClient::new(
//!         "https://provider.example/api/",
//!         Credentials::identity("discord-bot-token"),
//!     )?;
//!     let linked = client.bridge().get_linked(Some("player-uuid"), None).await?;
//!     println!("linked: {linked:?}");
//!     Ok(())
//! }
//! ```
//!
//! For tests and descriptor inspection, construct the client with
//! [`GuildgateClient::with_transport`] and a
//! [`RecordingTransport`](transport::RecordingTransport): every call is then
//! captured instead of sent.

mod auth;
pub mod client;
pub mod error;
pub mod request;
pub mod sections;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{Credentials, ENV_API_BASE, ENV_API_TOKEN, ENV_IDENTITY_TOKEN, GuildgateClient};
pub use error::ApiError;
pub use request::USER_AGENT;
pub use transport::{NetworkTransport, RecordingTransport, Transport};

pub use guildgate_types::{Param, Placement, RequestDescriptor, Verb};
