//! Google Custom Search adapter

use super::{parse_count, require};
use async_trait::async_trait;
use serde::Deserialize;
use srom_application::{BackendError, SearchBackend};
use tracing::warn;

const API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search JSON API
///
/// The hit count is read from `queries.request[0].totalResults`.
pub struct GoogleSearch {
    client: reqwest::Client,
    api_key: String,
    custom_search_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    queries: Queries,
}

#[derive(Debug, Deserialize)]
struct Queries {
    #[serde(default)]
    request: Vec<RequestInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestInfo {
    total_results: String,
}

impl GoogleSearch {
    pub fn new(
        client: reqwest::Client,
        api_key: &str,
        custom_search_id: &str,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            client,
            api_key: require("api_key", api_key)?,
            custom_search_id: require("custom_search_id", custom_search_id)?,
        })
    }

    fn parse_hits(body: &str) -> Result<u64, BackendError> {
        let response: SearchResponse = serde_json::from_str(body)
            .map_err(|e| BackendError::InvalidResponse(format!("Google response: {}", e)))?;
        let first = response.queries.request.first().ok_or_else(|| {
            BackendError::InvalidResponse("Google response has no request entry".to_string())
        })?;
        parse_count(&first.total_results)
    }
}

#[async_trait]
impl SearchBackend for GoogleSearch {
    fn identity(&self) -> &str {
        "Google Custom Search"
    }

    async fn query(&self, query: &str) -> Result<u64, BackendError> {
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.custom_search_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Bad response code from Google: {}", status);
            return Err(BackendError::BadStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        Self::parse_hits(&body)
    }
}
