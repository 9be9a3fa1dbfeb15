//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::models::{BookRecord, BookRecordBuilder, SearchQuery, SearchResponse};
use crate::sources::{Source, SourceCapabilities, SourceError};

/// A mock source that returns scripted responses keyed by query text.
///
/// Unknown queries return an empty response. Failures and delays can be
/// scripted per query to exercise error absorption and timeouts.
#[derive(Debug, Default)]
pub struct MockSource {
    responses: Mutex<HashMap<String, Vec<BookRecord>>>,
    failures: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<SearchQuery>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `books` for `query`.
    pub fn with_response(self, query: impl Into<String>, books: Vec<BookRecord>) -> Self {
        lock(&self.responses).insert(query.into(), books);
        self
    }

    /// Fail every search for `query`.
    pub fn with_failure(self, query: impl Into<String>) -> Self {
        lock(&self.failures).insert(query.into());
        self
    }

    /// Sleep before answering `query`.
    pub fn with_delay(self, query: impl Into<String>, delay: Duration) -> Self {
        lock(&self.delays).insert(query.into(), delay);
        self
    }

    /// Queries received so far, in call order.
    pub fn calls(&self) -> Vec<SearchQuery> {
        lock(&self.calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH | SourceCapabilities::ISBN_LOOKUP
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        lock(&self.calls).push(query.clone());

        let delay = lock(&self.delays).get(&query.query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if lock(&self.failures).contains(&query.query) {
            return Err(SourceError::Api(format!("scripted failure for '{}'", query.query)));
        }

        let books = lock(&self.responses)
            .get(&query.query)
            .map(|books| books.iter().take(query.max_results).cloned().collect())
            .unwrap_or_default();
        Ok(SearchResponse::new(books, "Mock Source", &query.query))
    }

    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookRecord>, SourceError> {
        let found = lock(&self.responses)
            .values()
            .flatten()
            .find(|book| book.isbn == isbn)
            .cloned();
        Ok(found)
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(id: &str, title: &str, author: &str) -> BookRecord {
    BookRecordBuilder::new(id, title, author).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_response_respects_max_results() {
        let source = MockSource::new().with_response(
            "dune",
            vec![
                make_book("1", "Dune", "Frank Herbert"),
                make_book("2", "Dune Messiah", "Frank Herbert"),
            ],
        );

        let response = source.search(&SearchQuery::new("dune").max_results(1)).await.unwrap();
        assert_eq!(response.books.len(), 1);
        assert_eq!(response.books[0].title, "Dune");

        let empty = source.search(&SearchQuery::new("unknown")).await.unwrap();
        assert!(empty.books.is_empty());
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let source = MockSource::new().with_failure("broken");
        let result = source.search(&SearchQuery::new("broken")).await;
        assert!(matches!(result, Err(SourceError::Api(_))));
    }

    #[tokio::test]
    async fn test_isbn_lookup() {
        let mut book = make_book("1", "Atomic Habits", "James Clear");
        book.isbn = "9780735211292".into();
        let source = MockSource::new().with_response("atomic habits", vec![book]);

        let found = source.lookup_isbn("9780735211292").await.unwrap();
        assert_eq!(found.map(|b| b.title), Some("Atomic Habits".to_string()));
        assert!(source.lookup_isbn("0000000000").await.unwrap().is_none());
    }
}
