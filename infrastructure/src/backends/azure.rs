//! Azure Data Market (Bing composite search) adapter

use super::{parse_count, require};
use async_trait::async_trait;
use serde::Deserialize;
use srom_application::{BackendError, SearchBackend};
use tracing::warn;

const API_URL: &str = "https://api.datamarket.azure.com/Bing/Search/v1/Composite";

/// Bing search through the Azure Data Market, authenticated with HTTP basic
/// auth.
///
/// The hit count is read from `d.results[0].WebTotal`; exactly one result
/// entry is expected.
pub struct AzureSearch {
    client: reqwest::Client,
    customer_id: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct CompositeResponse {
    d: CompositeData,
}

#[derive(Debug, Deserialize)]
struct CompositeData {
    #[serde(default)]
    results: Vec<CompositeResult>,
}

#[derive(Debug, Deserialize)]
struct CompositeResult {
    #[serde(rename = "WebTotal")]
    web_total: String,
}

impl AzureSearch {
    pub fn new(client: reqwest::Client, customer_id: &str, key: &str) -> Result<Self, BackendError> {
        Ok(Self {
            client,
            customer_id: require("customer_id", customer_id)?,
            key: require("key", key)?,
        })
    }

    fn parse_hits(body: &str) -> Result<u64, BackendError> {
        let response: CompositeResponse = serde_json::from_str(body)
            .map_err(|e| BackendError::InvalidResponse(format!("Azure response: {}", e)))?;
        match response.d.results.as_slice() {
            [only] => parse_count(&only.web_total),
            results => Err(BackendError::InvalidResponse(format!(
                "expected a single result entry, got {}",
                results.len()
            ))),
        }
    }
}

#[async_trait]
impl SearchBackend for AzureSearch {
    fn identity(&self) -> &str {
        "Azure Data Market"
    }

    async fn query(&self, query: &str) -> Result<u64, BackendError> {
        // The service expects string parameters wrapped in single quotes
        let quoted = format!("'{}'", query);
        let response = self
            .client
            .get(API_URL)
            .basic_auth(&self.customer_id, Some(&self.key))
            .query(&[
                ("Sources", "'web'"),
                ("$format", "json"),
                ("Query", quoted.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Bad response code from Bing: {}", status);
            return Err(BackendError::BadStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        Self::parse_hits(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hits() {
        let body = r#"{"d": {"results": [{"ID": "a1", "WebTotal": "1520000", "WebOffset": "0"}]}}"#;
        assert_eq!(AzureSearch::parse_hits(body).unwrap(), 1_520_000);
    }

    #[test]
    fn test_parse_hits_requires_single_entry() {
        let empty = r#"{"d": {"results": []}}"#;
        let double = r#"{"d": {"results": [{"WebTotal": "1"}, {"WebTotal": "2"}]}}"#;
        assert!(matches!(
            AzureSearch::parse_hits(empty),
            Err(BackendError::InvalidResponse(_))
        ));
        assert!(matches!(
            AzureSearch::parse_hits(double),
            Err(BackendError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_credentials() {
        let client = reqwest::Client::new();
        assert!(matches!(
            AzureSearch::new(client, "customer", " "),
            Err(BackendError::MissingCredentials(field)) if field == "key"
        ));
    }
}
