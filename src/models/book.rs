//! Book model representing a volume returned by a book search provider.

use serde::{Deserialize, Serialize};

/// A book as described by an external search provider
///
/// The recognition core treats this as opaque apart from `title` and `author`,
/// which drive deduplication and scoring. Field names serialize in camelCase so
/// the output matches what the web client expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Google Books volume ID
    pub google_books_id: String,

    /// Book title
    pub title: String,

    /// Authors (comma-separated)
    pub author: String,

    /// Year of first publication
    pub publish_year: Option<i32>,

    /// Publisher name
    pub publisher: String,

    /// Number of pages
    pub page_count: Option<u32>,

    /// Cover thumbnail URL (always https)
    pub cover_url: String,

    /// ISBN-13 if known, else ISBN-10, else empty
    pub isbn: String,
}

impl BookRecord {
    /// Create a new record with required fields
    pub fn new(google_books_id: String, title: String, author: String) -> Self {
        Self {
            google_books_id,
            title,
            author,
            publish_year: None,
            publisher: String::new(),
            page_count: None,
            cover_url: String::new(),
            isbn: String::new(),
        }
    }

    /// Key used to merge results from several queries: lowercase `title|author`
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.title.to_lowercase(), self.author.to_lowercase())
    }

    /// Returns the author names as a vector
    pub fn author_list(&self) -> Vec<&str> {
        self.author
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Check if the record carries a cover image
    pub fn has_cover(&self) -> bool {
        !self.cover_url.is_empty()
    }
}

/// Builder for constructing BookRecord objects
#[derive(Debug, Clone)]
pub struct BookRecordBuilder {
    book: BookRecord,
}

impl BookRecordBuilder {
    /// Create a new builder with required fields
    pub fn new(
        google_books_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            book: BookRecord::new(google_books_id.into(), title.into(), author.into()),
        }
    }

    /// Set publication year
    pub fn publish_year(mut self, year: i32) -> Self {
        self.book.publish_year = Some(year);
        self
    }

    /// Set publisher
    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.book.publisher = publisher.into();
        self
    }

    /// Set page count
    pub fn page_count(mut self, pages: u32) -> Self {
        self.book.page_count = Some(pages);
        self
    }

    /// Set cover URL
    pub fn cover_url(mut self, url: impl Into<String>) -> Self {
        self.book.cover_url = url.into();
        self
    }

    /// Set ISBN
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.book.isbn = isbn.into();
        self
    }

    /// Build the BookRecord
    pub fn build(self) -> BookRecord {
        self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_builder() {
        let book = BookRecordBuilder::new("abc123", "Sleeping Murder", "Agatha Christie")
            .publish_year(1976)
            .publisher("Collins")
            .page_count(224)
            .isbn("9780007120864")
            .build();

        assert_eq!(book.google_books_id, "abc123");
        assert_eq!(book.title, "Sleeping Murder");
        assert_eq!(book.publish_year, Some(1976));
        assert_eq!(book.page_count, Some(224));
        assert_eq!(book.isbn, "9780007120864");
        assert!(!book.has_cover());
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = BookRecordBuilder::new("1", "Book Lovers", "Emily Henry").build();
        let b = BookRecordBuilder::new("2", "BOOK LOVERS", "emily henry").build();

        assert_eq!(a.dedup_key(), "book lovers|emily henry");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_author_list() {
        let book = BookRecordBuilder::new("1", "Good Omens", "Terry Pratchett, Neil Gaiman").build();
        assert_eq!(book.author_list(), vec!["Terry Pratchett", "Neil Gaiman"]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let book = BookRecordBuilder::new("id1", "Atomic Habits", "James Clear")
            .cover_url("https://books.google.com/thumb")
            .build();
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["googleBooksId"], "id1");
        assert_eq!(json["coverUrl"], "https://books.google.com/thumb");
        assert!(json["publishYear"].is_null());
        assert!(json.get("score").is_none());
    }
}
