//! Resource fetcher
//!
//! Performs one HTTP GET per invocation and decodes the envelope. There is no
//! retry, cache or timeout; the request settles when the transport does.

use log::{error, info};
use reqwest::Client;

use super::envelope::{Resource, parse_envelope};
use super::state::FetchState;
use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = "workout-core/0.1";

/// HTTP client for envelope-wrapped collections.
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    client: Client,
}

impl ResourceFetcher {
    /// Build a fetcher with the default user agent.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the settled state, never `Loading`.
    pub async fn fetch<T: Resource>(&self, url: &str) -> FetchState<T> {
        let result = self.try_fetch(url).await;
        if let Err(e) = &result {
            error!("Fetch of {} failed: {}", url, e);
        }
        FetchState::from(result)
    }

    /// Same as `fetch`, keeping the typed error.
    pub async fn try_fetch<T: Resource>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let items = parse_envelope::<T>(&body)?;
        info!("Fetched {} {} from {}", items.len(), T::COLLECTION_KEY, url);
        Ok(items)
    }
}
