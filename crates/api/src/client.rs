//! The Guildgate client: dispatch, classification, and the credential
//! bootstrap.
//!
//! Every remote call funnels through [`GuildgateClient::execute`]: the
//! request builder assembles a descriptor, the client attaches the bearer
//! token where required, the injected transport carries the exchange, and
//! the reply is classified into a payload or one [`ApiError`] kind. The
//! bearer token is itself issued by a remote method (`token.auth`), reached
//! through a dedicated unauthorized path so the bootstrap cannot recurse.

use std::env;
use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use guildgate_types::{Param, Verb};

use crate::auth::TokenCache;
use crate::error::ApiError;
use crate::request::build_request;
use crate::sections::bridge::Bridge;
use crate::sections::bridgelock::Bridgelock;
use crate::sections::experimental::Experimental;
use crate::sections::gtw::Gtw;
use crate::sections::inactive::Inactive;
use crate::sections::longpoll::Longpoll;
use crate::sections::minigames::Minigames;
use crate::sections::score::Score;
use crate::sections::server::Server;
use crate::sections::services::Services;
use crate::sections::staff::Staff;
use crate::sections::stats::Stats;
use crate::sections::token::Token;
use crate::transport::{NetworkTransport, Transport};

/// Environment variable naming the API endpoint base.
pub const ENV_API_BASE: &str = "GUILDGATE_API_BASE";
/// Environment variable holding the upstream identity token.
pub const ENV_IDENTITY_TOKEN: &str = "GUILDGATE_IDENTITY_TOKEN";
/// Environment variable holding a pre-issued API token.
pub const ENV_API_TOKEN: &str = "GUILDGATE_API_TOKEN";

/// Credential material supplied at construction.
///
/// At least one field must be present: a pre-issued API token is used as-is;
/// an identity token lets the client issue its own API token on the first
/// authorized call.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub identity_token: Option<String>,
    pub api_token: Option<String>,
}

impl Credentials {
    /// Authorize lazily through `token.auth` with an identity token.
    pub fn identity(token: impl Into<String>) -> Self {
        Self {
            identity_token: Some(token.into()),
            api_token: None,
        }
    }

    /// Use a pre-issued API token directly.
    pub fn api_token(token: impl Into<String>) -> Self {
        Self {
            identity_token: None,
            api_token: Some(token.into()),
        }
    }
}

/// Client for the Guildgate remote API.
pub struct GuildgateClient {
    base: Url,
    identity_token: Option<String>,
    token: TokenCache,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for GuildgateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuildgateClient")
            .field("base", &self.base.as_str())
            .field("has_identity_token", &self.identity_token.is_some())
            .finish_non_exhaustive()
    }
}

impl GuildgateClient {
    /// Construct a networked client.
    pub fn new(base: &str, credentials: Credentials) -> Result<Self, ApiError> {
        let transport = NetworkTransport::new()
            .map_err(|error| ApiError::Configuration(format!("could not build HTTP client: {error}")))?;
        Self::with_transport(base, credentials, Arc::new(transport))
    }

    /// Construct with an explicit transport strategy.
    ///
    /// This is the capture-mode seam: inject a
    /// [`RecordingTransport`](crate::transport::RecordingTransport) to
    /// observe descriptors without network I/O.
    pub fn with_transport(
        base: &str,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let base = Url::parse(base)
            .map_err(|error| ApiError::Configuration(format!("invalid API base URL '{base}': {error}")))?;
        validate_base(&base)?;

        if credentials.identity_token.is_none() && credentials.api_token.is_none() {
            return Err(ApiError::Configuration(
                "either an identity token or an API token must be provided".into(),
            ));
        }

        Ok(Self {
            base,
            identity_token: credentials.identity_token,
            token: TokenCache::new(credentials.api_token),
            transport,
        })
    }

    /// Construct from `GUILDGATE_API_BASE`, `GUILDGATE_IDENTITY_TOKEN`, and
    /// `GUILDGATE_API_TOKEN`.
    pub fn from_env() -> Result<Self, ApiError> {
        let base = env::var(ENV_API_BASE)
            .map_err(|_| ApiError::Configuration(format!("{ENV_API_BASE} is not set")))?;
        let credentials = Credentials {
            identity_token: env::var(ENV_IDENTITY_TOKEN).ok(),
            api_token: env::var(ENV_API_TOKEN).ok(),
        };
        Self::new(&base, credentials)
    }

    /// Dispatch one remote method call.
    ///
    /// Builds the descriptor, resolves and attaches the bearer token when
    /// `requires_auth` is set, sends the descriptor through the transport,
    /// and classifies the reply. A single failed attempt is terminal: no
    /// retries at any layer.
    pub async fn execute(
        &self,
        section: &str,
        method: &str,
        verb: Verb,
        params: Vec<Param>,
        requires_auth: bool,
    ) -> Result<Value, ApiError> {
        let mut request = build_request(&self.base, section, method, verb, &params);

        if requires_auth {
            let token = self.resolve_token().await?;
            request
                .headers
                .insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        debug!(section, method, %verb, authorized = requires_auth, "dispatching API call");

        let reply = match self.transport.send(&request).await {
            Ok(reply) => reply,
            Err(source) => {
                warn!(section, method, error = %source, "API request failed");
                return Err(ApiError::transport(source));
            }
        };

        let Some(body) = reply else {
            return Err(ApiError::EmptyResponse);
        };

        if let Some(error) = classify_remote_error(&body) {
            return Err(error);
        }

        Ok(body)
    }

    /// Resolve the bearer token, issuing one on first use.
    ///
    /// Concurrent resolutions coalesce onto a single in-flight `token.auth`
    /// call; failures propagate to the caller.
    async fn resolve_token(&self) -> Result<String, ApiError> {
        self.token.get_or_fetch(|| self.issue_api_token()).await
    }

    /// Dedicated bootstrap path: trades the identity token for an API token
    /// via `token.auth`, dispatched unauthorized so it cannot recurse into
    /// token resolution.
    // Boxed: this future is awaited inside `execute`, which it itself awaits.
    fn issue_api_token(&self) -> BoxFuture<'_, Result<String, ApiError>> {
        Box::pin(async move {
            let Some(identity) = self.identity_token.clone() else {
                return Err(ApiError::Configuration(
                    "an identity token is required to authorize".into(),
                ));
            };

            let response = match self
                .execute(
                    "token",
                    "auth",
                    Verb::Post,
                    vec![Param::body("token", identity)],
                    false,
                )
                .await
            {
                Ok(response) => response,
                Err(error) => {
                    warn!(%error, "API token issuance failed");
                    return Err(error);
                }
            };

            match response.get("token").and_then(Value::as_str) {
                Some(token) => Ok(token.to_string()),
                None => Err(ApiError::decode("token.auth reply did not contain a token")),
            }
        })
    }
}

/// Section accessors.
impl GuildgateClient {
    pub fn bridge(&self) -> Bridge<'_> {
        Bridge { client: self }
    }

    pub fn bridgelock(&self) -> Bridgelock<'_> {
        Bridgelock { client: self }
    }

    pub fn experimental(&self) -> Experimental<'_> {
        Experimental { client: self }
    }

    pub fn gtw(&self) -> Gtw<'_> {
        Gtw { client: self }
    }

    pub fn inactive(&self) -> Inactive<'_> {
        Inactive { client: self }
    }

    pub fn longpoll(&self) -> Longpoll<'_> {
        Longpoll { client: self }
    }

    pub fn minigames(&self) -> Minigames<'_> {
        Minigames { client: self }
    }

    pub fn score(&self) -> Score<'_> {
        Score { client: self }
    }

    pub fn server(&self) -> Server<'_> {
        Server { client: self }
    }

    pub fn services(&self) -> Services<'_> {
        Services { client: self }
    }

    pub fn staff(&self) -> Staff<'_> {
        Staff { client: self }
    }

    pub fn stats(&self) -> Stats<'_> {
        Stats { client: self }
    }

    pub fn token(&self) -> Token<'_> {
        Token { client: self }
    }
}

/// A reply carrying `code` alongside an explicit `success: false` marker is a
/// service-reported failure; everything else passes through untouched.
fn classify_remote_error(body: &Value) -> Option<ApiError> {
    let code = body.get("code")?;
    if code.is_null() {
        return None;
    }
    if body.get("success") != Some(&Value::Bool(false)) {
        return None;
    }

    let code = match code {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(ApiError::Remote { code, message })
}

fn validate_base(base: &Url) -> Result<(), ApiError> {
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::Configuration(format!(
            "API base URL must use http or https; got '{}://'",
            base.scheme()
        )));
    }
    if base.host_str().is_none() {
        return Err(ApiError::Configuration("API base URL must include a host".into()));
    }
    Ok(())
}
