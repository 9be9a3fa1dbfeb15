//! Multi-query search aggregation with deduplication and ranking.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::models::{BookRecord, CandidateSet, SearchQuery};
use crate::recognition::ranking::rank;
use crate::sources::{Source, SourceError};
use crate::utils::deduplicate_books;

/// Tuning for [`ResultAggregator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Results requested from the provider per query
    pub per_query_results: usize,
    /// Upper bound for a single provider call
    pub query_timeout: Duration,
    /// Provider calls allowed in flight at once
    pub max_concurrent_queries: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            per_query_results: 5,
            query_timeout: Duration::from_secs(10),
            max_concurrent_queries: 4,
        }
    }
}

/// Runs a query list against a [`Source`] and merges the results
///
/// Provider calls may complete in any order, but results are merged strictly
/// in query order, so the first (most specific) query's copy of a book wins
/// deduplication. A failed or timed-out query contributes nothing.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    source: Arc<dyn Source>,
    settings: AggregatorSettings,
}

impl ResultAggregator {
    /// Create an aggregator with default settings
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self::with_settings(source, AggregatorSettings::default())
    }

    /// Create an aggregator with explicit settings
    pub fn with_settings(source: Arc<dyn Source>, settings: AggregatorSettings) -> Self {
        Self { source, settings }
    }

    /// The provider behind this aggregator
    pub fn source(&self) -> &Arc<dyn Source> {
        &self.source
    }

    /// Search every query, deduplicate, optionally rank, and cap at `max_total`
    ///
    /// Without candidates (or with an empty set) books keep arrival order.
    /// Otherwise they are sorted by descending score, ties keeping arrival order.
    pub async fn search(
        &self,
        queries: &[String],
        max_total: usize,
        candidates: Option<&CandidateSet>,
    ) -> Vec<BookRecord> {
        let per_query = self.fetch_all(queries).await;
        let merged = deduplicate_books(per_query.into_iter().flatten());
        debug!(
            queries = queries.len(),
            unique = merged.len(),
            "merged search results"
        );

        let ordered = match candidates {
            Some(candidates) if !candidates.is_empty() => rank(merged, candidates),
            _ => merged,
        };

        ordered.into_iter().take(max_total).collect()
    }

    /// One result list per query, in query order
    async fn fetch_all(&self, queries: &[String]) -> Vec<Vec<BookRecord>> {
        let concurrency = self.settings.max_concurrent_queries.max(1);
        stream::iter(queries.iter())
            .map(|query| self.fetch_one(query))
            .buffered(concurrency)
            .collect()
            .await
    }

    async fn fetch_one(&self, query: &str) -> Vec<BookRecord> {
        let request = SearchQuery::new(query).max_results(self.settings.per_query_results);
        debug!(source = self.source.id(), query, "searching");

        let outcome = match timeout(self.settings.query_timeout, self.source.search(&request)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(self.settings.query_timeout)),
        };

        match outcome {
            Ok(response) => {
                debug!(query, found = response.books.len(), "search finished");
                response.books
            }
            Err(e) => {
                warn!(source = self.source.id(), query, error = %e, "search failed, skipping query");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::{make_book, MockSource};

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn titles(books: &[BookRecord]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_merges_in_query_order_without_candidates() {
        let source = MockSource::new()
            .with_response("q1", vec![make_book("1", "Alpha", "A"), make_book("2", "Beta", "B")])
            .with_response("q2", vec![make_book("3", "Gamma", "C"), make_book("4", "alpha", "a")]);
        let aggregator = ResultAggregator::new(Arc::new(source));

        let books = aggregator.search(&queries(&["q1", "q2"]), 10, None).await;
        assert_eq!(titles(&books), vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(books[0].google_books_id, "1");
    }

    #[tokio::test]
    async fn test_truncates_to_max_total() {
        let source = MockSource::new().with_response(
            "q",
            vec![make_book("1", "A1", "x"), make_book("2", "A2", "x"), make_book("3", "A3", "x")],
        );
        let aggregator = ResultAggregator::new(Arc::new(source));

        assert_eq!(aggregator.search(&queries(&["q"]), 2, None).await.len(), 2);
        assert!(aggregator.search(&queries(&["q"]), 0, None).await.is_empty());
    }

    #[tokio::test]
    async fn test_requests_bounded_per_query_count() {
        let source = Arc::new(MockSource::new());
        let settings = AggregatorSettings {
            per_query_results: 3,
            ..Default::default()
        };
        let aggregator = ResultAggregator::with_settings(source.clone(), settings);

        aggregator.search(&queries(&["a", "b"]), 8, None).await;
        let calls = source.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|q| q.max_results == 3));
    }

    #[tokio::test]
    async fn test_failed_query_is_skipped() {
        let source = MockSource::new()
            .with_failure("broken")
            .with_response("ok", vec![make_book("1", "Survive the Night", "Riley Sager")]);
        let aggregator = ResultAggregator::new(Arc::new(source));

        let books = aggregator.search(&queries(&["broken", "ok"]), 8, None).await;
        assert_eq!(titles(&books), vec!["Survive the Night"]);
    }

    #[tokio::test]
    async fn test_slow_query_times_out() {
        let source = MockSource::new()
            .with_delay("slow", Duration::from_secs(5))
            .with_response("slow", vec![make_book("1", "Never Seen", "Nobody")])
            .with_response("fast", vec![make_book("2", "Book Lovers", "Emily Henry")]);
        let settings = AggregatorSettings {
            query_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let aggregator = ResultAggregator::with_settings(Arc::new(source), settings);

        let books = aggregator.search(&queries(&["slow", "fast"]), 8, None).await;
        assert_eq!(titles(&books), vec!["Book Lovers"]);
    }

    #[tokio::test]
    async fn test_results_resequenced_when_completion_order_differs() {
        let source = MockSource::new()
            .with_delay("first", Duration::from_millis(100))
            .with_response("first", vec![make_book("1", "Dune", "Frank Herbert")])
            .with_response("second", vec![make_book("2", "DUNE", "FRANK HERBERT")]);
        let aggregator = ResultAggregator::new(Arc::new(source));

        let books = aggregator.search(&queries(&["first", "second"]), 8, None).await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].google_books_id, "1");
    }

    #[tokio::test]
    async fn test_ranks_with_candidates() {
        let source = MockSource::new().with_response(
            "q",
            vec![
                make_book("1", "Atomic Habits", "James Clear"),
                make_book("2", "Sleeping Murder", "Agatha Christie"),
            ],
        );
        let aggregator = ResultAggregator::new(Arc::new(source));
        let candidates =
            CandidateSet::new(vec!["Sleeping Murder".into()], vec!["Agatha Christie".into()]);

        let ranked = aggregator.search(&queries(&["q"]), 8, Some(&candidates)).await;
        assert_eq!(titles(&ranked), vec!["Sleeping Murder", "Atomic Habits"]);

        let unranked = aggregator
            .search(&queries(&["q"]), 8, Some(&CandidateSet::default()))
            .await;
        assert_eq!(titles(&unranked), vec!["Atomic Habits", "Sleeping Murder"]);
    }

    #[tokio::test]
    async fn test_no_queries_no_results() {
        let aggregator = ResultAggregator::new(Arc::new(MockSource::new()));
        assert!(aggregator.search(&[], 8, None).await.is_empty());
    }
}
