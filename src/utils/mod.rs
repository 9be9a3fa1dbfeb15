//! Utility modules supporting book search.
//!
//! - [`deduplicate_books`]: Keep the first book per lowercase `(title, author)` pair
//! - [`HttpClient`]: Shared HTTP client with timeouts
//! - [`RetryConfig`] / [`with_retry`]: Retry transient provider errors with exponential backoff
//! - [`normalize_isbn`]: Normalize and checksum-validate an ISBN
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use cover_match::sources::SourceError;
//! use cover_match::utils::{with_retry, RetryConfig};
//!
//! # async fn fetch_data() -> Result<String, SourceError> { Ok("data".to_string()) }
//! # #[tokio::main]
//! # async fn main() -> Result<(), SourceError> {
//! let config = RetryConfig::default().max_attempts(3);
//! let result = with_retry(config, || fetch_data()).await?;
//! # Ok(())
//! # }
//! ```

mod dedup;
mod http;
mod retry;
mod validate;

pub use dedup::deduplicate_books;
pub use http::{HttpClient, DEFAULT_TIMEOUT};
pub use retry::{with_retry, RetryConfig, TransientError};
pub use validate::{normalize_isbn, ValidationError};
