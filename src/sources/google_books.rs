//! Google Books source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::models::{BookRecord, BookRecordBuilder, SearchQuery, SearchResponse};
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::{normalize_isbn, with_retry, HttpClient, RetryConfig};

/// Default Google Books API host
pub const GOOGLE_BOOKS_API_BASE: &str = "https://www.googleapis.com";

const VOLUMES_PATH: &str = "/books/v1/volumes";

/// Google Books source
///
/// Uses the public volumes endpoint. An API key is optional; without one the
/// shared anonymous quota applies.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
    retry: RetryConfig,
}

impl GoogleBooksSource {
    /// Create a new Google Books source, reading `GOOGLE_BOOKS_API_KEY` if set
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(HttpClient::new()?)
            .api_key(std::env::var("GOOGLE_BOOKS_API_KEY").ok()))
    }

    /// Create a source over an existing HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self {
            client,
            base_url: GOOGLE_BOOKS_API_BASE.to_string(),
            api_key: None,
            retry: RetryConfig::default(),
        }
    }

    /// Override the API host (used to point tests at a mock server)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set or clear the API key
    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Set the retry policy for transient failures
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Build the volumes request URL
    fn volumes_url(&self, query: &str, max_results: usize) -> Result<Url, SourceError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, VOLUMES_PATH))
            .map_err(|e| SourceError::InvalidRequest(format!("Bad base URL: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("maxResults", &max_results.to_string())
                .append_pair("printType", "books");
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        Ok(url)
    }

    async fn fetch_volumes(&self, url: &Url) -> Result<VolumesResponse, SourceError> {
        let response = self
            .client
            .client()
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Google Books: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "Google Books API returned status: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))
    }

    async fn volumes(&self, query: &str, max_results: usize) -> Result<VolumesResponse, SourceError> {
        let url = self.volumes_url(query, max_results)?;
        with_retry(self.retry, || self.fetch_volumes(&url)).await
    }

    /// Map a Google Books volume to a BookRecord
    fn parse_volume(volume: &Volume) -> BookRecord {
        let info = &volume.volume_info;

        let mut builder = BookRecordBuilder::new(
            volume.id.clone(),
            info.title.clone().unwrap_or_default(),
            info.authors.join(", "),
        )
        .publisher(info.publisher.clone().unwrap_or_default())
        .isbn(preferred_isbn(&info.industry_identifiers));

        if let Some(year) = info.published_date.as_deref().and_then(parse_year) {
            builder = builder.publish_year(year);
        }
        if let Some(pages) = info.page_count {
            builder = builder.page_count(pages);
        }
        if let Some(thumbnail) = info.image_links.as_ref().and_then(|l| l.thumbnail.as_ref()) {
            builder = builder.cover_url(thumbnail.replacen("http:", "https:", 1));
        }

        builder.build()
    }
}

/// Year from a Google Books date ("1976", "1976-10", "1976-10-01")
fn parse_year(date: &str) -> Option<i32> {
    date.chars().take(4).collect::<String>().parse().ok()
}

/// ISBN-13 when present, else ISBN-10, else empty
fn preferred_isbn(identifiers: &[IndustryIdentifier]) -> String {
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.clone())
    };
    find("ISBN_13").or_else(|| find("ISBN_10")).unwrap_or_default()
}

#[async_trait]
impl Source for GoogleBooksSource {
    fn id(&self) -> &str {
        "google_books"
    }

    fn name(&self) -> &str {
        "Google Books"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH | SourceCapabilities::ISBN_LOOKUP
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        if query.is_blank() {
            return Ok(SearchResponse::new(Vec::new(), self.name(), &query.query));
        }

        let data = self.volumes(&query.query, query.max_results).await?;
        let books: Vec<BookRecord> = data.items.iter().map(Self::parse_volume).collect();

        let mut response = SearchResponse::new(books, self.name(), &query.query);
        if let Some(total) = data.total_items {
            response = response.total_results(total);
        }
        Ok(response)
    }

    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookRecord>, SourceError> {
        let isbn = normalize_isbn(isbn)?;
        let data = self.volumes(&format!("isbn:{}", isbn), 1).await?;
        Ok(data.items.first().map(Self::parse_volume))
    }
}

// Google Books API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: Option<usize>,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    published_date: Option<String>,
    publisher: Option<String>,
    page_count: Option<u32>,
    image_links: Option<ImageLinks>,
    #[serde(default)]
    industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}
