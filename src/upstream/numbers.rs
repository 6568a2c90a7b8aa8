//! Number endpoints of the upstream provider

use {
    super::fetcher::{FetchOutcome, GatedFetcher},
    crate::{error::AuthError, window::Category},
    serde::Deserialize,
    serde_json::Number,
    std::{sync::Arc, time::Duration},
};

/// `{ "numbers": [...] }` payload returned by every number endpoint
///
/// Any JSON number is accepted, including integers beyond `i64` and floats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NumbersPayload {
    pub numbers: Vec<Number>,
}

pub struct NumbersClient {
    fetcher: Arc<GatedFetcher>,
    base_url: String,
    timeout: Duration,
}

impl NumbersClient {
    pub fn new(fetcher: Arc<GatedFetcher>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn url_for(&self, category: Category) -> String {
        format!("{}/{}", self.base_url, category.upstream_path())
    }

    /// Fetch the latest numbers for `category` under the hard timeout
    pub async fn fetch(&self, category: Category) -> Result<FetchOutcome<Vec<Number>>, AuthError> {
        let url = self.url_for(category);

        let outcome = self
            .fetcher
            .fetch::<NumbersPayload, _>(|client| client.get(&url), self.timeout)
            .await?;

        Ok(match outcome {
            FetchOutcome::Ok(payload) => FetchOutcome::Ok(payload.numbers),
            FetchOutcome::TimedOut => FetchOutcome::TimedOut,
            FetchOutcome::Failed(reason) => FetchOutcome::Failed(reason),
        })
    }
}
