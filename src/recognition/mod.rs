//! Book identification from cover text.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! - [`CandidateExtractor`]: raw OCR text → [`CandidateSet`]
//! - [`plan`] / [`QueryPlanner`]: candidates → ordered search queries
//! - [`ResultAggregator`]: queries → deduplicated, ranked [`BookRecord`]s
//!
//! [`CoverRecognizer`] wires them together behind a single call.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cover_match::recognition::CoverRecognizer;
//! use cover_match::sources::GoogleBooksSource;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recognizer = CoverRecognizer::new(Arc::new(GoogleBooksSource::new()?));
//! let result = recognizer.recognize("SLEEPING\nMURDER\nAgatha Christie", 8).await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! [`CandidateSet`]: crate::models::CandidateSet
//! [`BookRecord`]: crate::models::BookRecord

mod aggregator;
pub mod extractor;
mod lexicon;
mod names;
pub mod planner;
pub mod ranking;

pub use aggregator::{AggregatorSettings, ResultAggregator};
pub use extractor::CandidateExtractor;
pub use lexicon::{
    Lexicon, DEFAULT_BOILERPLATE, DEFAULT_NAME_PARTICLES, DEFAULT_PHRASE_ARTICLES,
    DEFAULT_TITLE_JOINERS, DEFAULT_TITLE_KEYWORDS,
};
pub use names::NameDictionary;
pub use planner::{plan, QueryPlanner};
pub use ranking::{rank, score, ScoredBookRecord};

use std::sync::Arc;

use tracing::info;

use crate::models::RecognitionResult;
use crate::sources::Source;

/// Full cover recognition: extract, plan, search, rank
#[derive(Debug, Clone)]
pub struct CoverRecognizer {
    extractor: CandidateExtractor,
    planner: QueryPlanner,
    aggregator: ResultAggregator,
}

impl CoverRecognizer {
    /// Create a recognizer with the built-in dictionary, lexicon and settings
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self::with_parts(
            CandidateExtractor::default(),
            QueryPlanner::default(),
            ResultAggregator::new(source),
        )
    }

    /// Create a recognizer from explicitly configured stages
    pub fn with_parts(
        extractor: CandidateExtractor,
        planner: QueryPlanner,
        aggregator: ResultAggregator,
    ) -> Self {
        Self {
            extractor,
            planner,
            aggregator,
        }
    }

    /// The extraction stage
    pub fn extractor(&self) -> &CandidateExtractor {
        &self.extractor
    }

    /// The planning stage
    pub fn planner(&self) -> &QueryPlanner {
        &self.planner
    }

    /// The aggregation stage
    pub fn aggregator(&self) -> &ResultAggregator {
        &self.aggregator
    }

    /// Identify the book behind `raw_text`, returning at most `max_results` books
    ///
    /// Never fails: blank text, provider errors and empty searches all degrade
    /// to smaller or empty results. Rejecting a zero cap is the caller's job.
    pub async fn recognize(&self, raw_text: &str, max_results: usize) -> RecognitionResult {
        let candidates = self.extractor.extract(raw_text);
        let search_queries = self.planner.plan(&candidates);
        let books = self
            .aggregator
            .search(&search_queries, max_results, Some(&candidates))
            .await;

        info!(
            titles = candidates.title_candidates.len(),
            authors = candidates.author_candidates.len(),
            queries = search_queries.len(),
            books = books.len(),
            "cover recognized"
        );

        RecognitionResult {
            candidates,
            search_queries,
            books,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::{make_book, MockSource};

    #[tokio::test]
    async fn test_blank_text_makes_no_requests() {
        let source = Arc::new(MockSource::new());
        let recognizer = CoverRecognizer::new(source.clone());

        let result = recognizer.recognize("   \n  ", 8).await;
        assert_eq!(result, RecognitionResult::default());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_recognize_wires_stages() {
        let source = Arc::new(MockSource::new().with_response(
            "Book Lovers Emily Henry",
            vec![make_book("1", "Book Lovers", "Emily Henry")],
        ));
        let recognizer = CoverRecognizer::new(source.clone());

        let result = recognizer.recognize("Book Lovers\nEmily Henry", 8).await;
        assert_eq!(result.candidates.title_candidates, vec!["Book Lovers"]);
        assert_eq!(result.search_queries[0], "Book Lovers Emily Henry");
        assert_eq!(result.books.len(), 1);
        assert_eq!(source.calls().len(), result.search_queries.len());
    }
}
