//! Search backend port
//!
//! Defines the interface for executing a composed query against a search
//! engine and reading back its hit count.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while querying a search backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Bad response status: {0}")]
    BadStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// A search engine that can count hits for a query
///
/// This port defines how the application layer talks to search providers.
/// Implementations (adapters) live in the infrastructure layer; the pool
/// never looks past this contract.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Human-readable identity (e.g., "Google Custom Search")
    fn identity(&self) -> &str;

    /// Execute a composed query string and return the total hit count
    async fn query(&self, query: &str) -> Result<u64, BackendError>;
}
