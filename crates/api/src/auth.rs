//! Lazy bearer-credential cache.

use std::future::Future;

use tokio::sync::Mutex;

use crate::error::ApiError;

/// Cached API token with single-flight resolution.
///
/// The mutex is held across the fetch, so resolvers racing on an absent token
/// coalesce onto one upstream authentication call; every waiter then observes
/// the cached write. A token, once cached, lives for the client's lifetime.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    token: Mutex<Option<String>>,
}

impl TokenCache {
    pub(crate) fn new(preissued: Option<String>) -> Self {
        Self {
            token: Mutex::new(preissued),
        }
    }

    /// Return the cached token, resolving it through `fetch` when absent.
    pub(crate) async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ApiError>>,
    {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }
        let token = fetch().await?;
        *slot = Some(token.clone());
        Ok(token)
    }
}
