//! Search backend adapters
//!
//! Thin HTTP adapters implementing the [`SearchBackend`] port. Each adapter
//! sends one GET per composed query and reads the engine's total hit count.

mod azure;
mod google;

pub use azure::AzureSearch;
pub use google::GoogleSearch;

use crate::config::FileBackendsConfig;
use srom_application::{BackendError, SearchBackend};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout shared by all adapters
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by every backend.
pub fn http_client() -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("srom/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BackendError::Other(format!("Failed to create HTTP client: {}", e)))
}

/// Instantiate every backend that has a config section, in a fixed order
/// (Google, then Azure).
pub fn build_backends(
    config: &FileBackendsConfig,
) -> Result<Vec<Arc<dyn SearchBackend>>, BackendError> {
    let client = http_client()?;
    let mut backends: Vec<Arc<dyn SearchBackend>> = Vec::new();

    if let Some(google) = &config.google {
        backends.push(Arc::new(GoogleSearch::new(
            client.clone(),
            &google.api_key,
            &google.custom_search_id,
        )?));
    }
    if let Some(azure) = &config.azure {
        backends.push(Arc::new(AzureSearch::new(
            client.clone(),
            &azure.customer_id,
            &azure.key,
        )?));
    }

    debug!("Configured {} search backend(s)", backends.len());
    Ok(backends)
}

/// Parse a decimal hit count as returned in JSON string fields
fn parse_count(raw: &str) -> Result<u64, BackendError> {
    raw.trim()
        .parse()
        .map_err(|_| BackendError::InvalidResponse(format!("not a hit count: '{}'", raw)))
}

fn require(field: &str, value: &str) -> Result<String, BackendError> {
    if value.trim().is_empty() {
        return Err(BackendError::MissingCredentials(field.to_string()));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileAzureConfig, FileGoogleConfig};

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12345").unwrap(), 12345);
        assert_eq!(parse_count(" 7 ").unwrap(), 7);
        assert!(matches!(
            parse_count("-1"),
            Err(BackendError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_build_backends_in_order() {
        let config = FileBackendsConfig {
            google: Some(FileGoogleConfig {
                api_key: "k".to_string(),
                custom_search_id: "cx".to_string(),
            }),
            azure: Some(FileAzureConfig {
                customer_id: "c".to_string(),
                key: "k".to_string(),
            }),
        };
        let backends = build_backends(&config).unwrap();
        let names: Vec<_> = backends.iter().map(|b| b.identity()).collect();
        assert_eq!(names, ["Google Custom Search", "Azure Data Market"]);
    }

    #[test]
    fn test_build_backends_rejects_blank_credentials() {
        let config = FileBackendsConfig {
            google: Some(FileGoogleConfig::default()),
            azure: None,
        };
        assert!(matches!(
            build_backends(&config),
            Err(BackendError::MissingCredentials(_))
        ));
    }
}
