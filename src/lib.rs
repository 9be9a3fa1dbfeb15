//! # Cover Match
//!
//! Identify a book from the noisy text an OCR engine read off its cover.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (BookRecord, CandidateSet, RecognitionResult, etc.)
//! - [`recognition`]: Candidate extraction, query planning, result aggregation and ranking
//! - [`sources`]: Book search providers behind the [`Source`] trait
//! - [`utils`]: HTTP client, retry, ISBN validation, and deduplication
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod recognition;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{BookRecord, CandidateSet, RecognitionResult};
pub use recognition::CoverRecognizer;
pub use sources::{Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
