//! Configuration management.
//!
//! Settings come from an optional TOML file overlaid with `COVER_MATCH_*`
//! environment variables (`__` separates section and key, for example
//! `COVER_MATCH_SEARCH__MAX_RESULTS=10`). Every field has a default, so an
//! absent file is not an error.

mod file_config;

pub use file_config::{example_config, find_config_file, save_config, CONFIG_FILE_NAME};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::recognition::{
    AggregatorSettings, CandidateExtractor, CoverRecognizer, Lexicon, NameDictionary,
    QueryPlanner, ResultAggregator, DEFAULT_BOILERPLATE, DEFAULT_TITLE_KEYWORDS,
};
use crate::sources::{GoogleBooksSource, Source, SourceError, GOOGLE_BOOKS_API_BASE};
use crate::utils::{HttpClient, RetryConfig};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "COVER_MATCH";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Google Books provider settings
    #[serde(default)]
    pub google_books: GoogleBooksConfig,

    /// Search and aggregation settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Extraction word lists
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid(
                "search.max_results must be at least 1".to_string(),
            ));
        }
        if self.search.per_query_results == 0 {
            return Err(ConfigError::Invalid(
                "search.per_query_results must be at least 1".to_string(),
            ));
        }
        if self.search.query_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "search.query_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.search.max_concurrent_queries == 0 {
            return Err(ConfigError::Invalid(
                "search.max_concurrent_queries must be at least 1".to_string(),
            ));
        }
        if self.google_books.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "google_books.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a recognizer over `source` using the search and lexicon settings
    pub fn recognizer(&self, source: Arc<dyn Source>) -> CoverRecognizer {
        CoverRecognizer::with_parts(
            CandidateExtractor::new(self.lexicon.names(), self.lexicon.lexicon()),
            QueryPlanner::default(),
            ResultAggregator::with_settings(source, self.search.aggregator_settings()),
        )
    }
}

/// Google Books provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleBooksConfig {
    /// API key; `GOOGLE_BOOKS_API_KEY` is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// Retries after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_http_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl GoogleBooksConfig {
    /// The configured API key, falling back to the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_BOOKS_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Build the provider described by this section
    pub fn build_source(&self) -> Result<GoogleBooksSource, SourceError> {
        let client = HttpClient::with_timeout(Duration::from_secs(self.timeout_secs))?;
        Ok(GoogleBooksSource::with_client(client)
            .base_url(self.base_url.clone())
            .api_key(self.resolved_api_key())
            .retry_config(RetryConfig::default().max_attempts(self.max_retries.saturating_add(1))))
    }
}

fn default_base_url() -> String {
    GOOGLE_BOOKS_API_BASE.to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

/// Search and aggregation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Books returned by a recognition
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Books requested per query
    #[serde(default = "default_per_query_results")]
    pub per_query_results: usize,

    /// Timeout for a single provider call, in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,

    /// Provider calls in flight at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_queries: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            per_query_results: default_per_query_results(),
            query_timeout_secs: default_query_timeout(),
            max_concurrent_queries: default_max_concurrent(),
        }
    }
}

impl SearchConfig {
    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings {
            per_query_results: self.per_query_results,
            query_timeout: Duration::from_secs(self.query_timeout_secs),
            max_concurrent_queries: self.max_concurrent_queries,
        }
    }
}

fn default_max_results() -> usize {
    8
}

fn default_per_query_results() -> usize {
    5
}

fn default_query_timeout() -> u64 {
    10
}

fn default_max_concurrent() -> usize {
    4
}

/// Word lists used by candidate extraction
///
/// `boilerplate` and `title_keywords` replace the built-in lists when set;
/// the `extra_*` lists are added on top of whichever lists are in effect.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boilerplate: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_keywords: Option<Vec<String>>,

    #[serde(default)]
    pub extra_boilerplate: Vec<String>,

    #[serde(default)]
    pub extra_title_keywords: Vec<String>,

    #[serde(default)]
    pub extra_first_names: Vec<String>,
}

impl LexiconConfig {
    /// Build the lexicon described by this section
    pub fn lexicon(&self) -> Lexicon {
        let lexicon = match (&self.boilerplate, &self.title_keywords) {
            (None, None) => Lexicon::default(),
            (Some(bp), None) => Lexicon::new(bp, DEFAULT_TITLE_KEYWORDS.iter()),
            (None, Some(kw)) => Lexicon::new(DEFAULT_BOILERPLATE.iter(), kw),
            (Some(bp), Some(kw)) => Lexicon::new(bp, kw),
        };
        lexicon
            .extend_boilerplate(&self.extra_boilerplate)
            .extend_title_keywords(&self.extra_title_keywords)
    }

    /// Build the first-name dictionary described by this section
    pub fn names(&self) -> NameDictionary {
        if self.extra_first_names.is_empty() {
            NameDictionary::builtin()
        } else {
            NameDictionary::builtin_with(&self.extra_first_names)
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for this crate when neither `RUST_LOG` nor `-v`/`-q` is given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Load configuration from `path` (or a discovered file) plus the environment
///
/// An explicit path must exist. Without one, [`find_config_file`] is consulted
/// and defaults apply when nothing is found.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(config::File::from(path));
        }
        None => {
            if let Some(found) = find_config_file() {
                tracing::debug!(path = %found.display(), "using discovered config file");
                builder = builder.add_source(config::File::from(found.as_path()));
            }
        }
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
