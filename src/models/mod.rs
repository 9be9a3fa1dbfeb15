//! Core data models for books, candidates, and search operations.

mod book;
mod candidates;
mod search;

pub use book::{BookRecord, BookRecordBuilder};
pub use candidates::{CandidateSet, MAX_AUTHOR_CANDIDATES, MAX_TITLE_CANDIDATES};
pub use search::{RecognitionResult, SearchQuery, SearchResponse};
