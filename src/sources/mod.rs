//! Book search providers with a trait-based architecture.
//!
//! This module defines the [`Source`] trait that every book search provider
//! implements. The recognition core only depends on the trait, so providers can
//! be swapped (or mocked in tests) without touching extraction or ranking.
//!
//! # Available Sources
//!
//! - [`GoogleBooksSource`] - Google Books volumes API (search and ISBN lookup)
//! - [`MockSource`] - scripted responses, failures and delays for tests
//!
//! # Error Handling
//!
//! Sources report failures through [`SourceError`]. Transient failures
//! (network, rate limits) are retried inside the source; whatever error
//! remains is absorbed by the aggregator and never reaches the caller of the
//! recognition pipeline.

mod google_books;
pub mod mock;

pub use google_books::{GoogleBooksSource, GOOGLE_BOOKS_API_BASE};
pub use mock::MockSource;

use crate::models::{BookRecord, SearchQuery, SearchResponse};
use async_trait::async_trait;

bitflags::bitflags! {
    /// Capabilities that a source can support
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceCapabilities: u32 {
        const SEARCH = 1 << 0;
        const ISBN_LOOKUP = 1 << 1;
    }
}

/// The Source trait defines the interface for all book search providers.
///
/// # Implementing a New Source
///
/// 1. Create a new struct that implements `Source`
/// 2. Implement `id`, `name`, and `search`
/// 3. Override `capabilities` and `lookup_isbn` if the provider supports ISBN lookup
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "google_books")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Describe the capabilities of this source
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    /// Whether this source supports ISBN lookup
    fn supports_isbn_lookup(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::ISBN_LOOKUP)
    }

    /// Search for books matching a free-text query
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError>;

    /// Look up a single book by ISBN
    async fn lookup_isbn(&self, _isbn: &str) -> Result<Option<BookRecord>, SourceError> {
        Err(SourceError::NotImplemented)
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested operation is not implemented for this source
    #[error("Operation not implemented for this source")]
    NotImplemented,

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),

    /// The call did not finish in time
    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<crate::utils::ValidationError> for SourceError {
    fn from(err: crate::utils::ValidationError) -> Self {
        SourceError::InvalidRequest(err.to_string())
    }
}
