//! Search request and response models.

use serde::{Deserialize, Serialize};

use crate::models::{BookRecord, CandidateSet};

/// A single request to a book search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query string
    pub query: String,

    /// Maximum number of results to return
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: 5,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// True when the query text is blank
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// Search response containing books and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Books found, in provider order
    pub books: Vec<BookRecord>,

    /// Total number of matches reported by the provider (may exceed `books.len()`)
    pub total_results: Option<usize>,

    /// Source of the results
    pub source: String,

    /// Query that was executed
    pub query: String,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(books: Vec<BookRecord>, source: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            books,
            total_results: None,
            source: source.into(),
            query: query.into(),
        }
    }

    /// Set total results
    pub fn total_results(mut self, total: usize) -> Self {
        self.total_results = Some(total);
        self
    }
}

/// Everything the recognition core produces for one cover
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    /// Extracted title/author guesses
    pub candidates: CandidateSet,

    /// Queries sent to the provider, in priority order
    pub search_queries: Vec<String>,

    /// Deduplicated, ranked books
    pub books: Vec<BookRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new("sleeping murder").max_results(3);
        assert_eq!(query.query, "sleeping murder");
        assert_eq!(query.max_results, 3);
        assert!(!query.is_blank());
        assert!(SearchQuery::new("   ").is_blank());
    }

    #[test]
    fn test_recognition_result_shape() {
        let result = RecognitionResult::default();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["candidates"]["titleCandidates"].is_array());
        assert!(json["searchQueries"].is_array());
        assert!(json["books"].is_array());
    }
}
