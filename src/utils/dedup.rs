//! Deduplication of books merged from several queries.

use std::collections::HashSet;

use crate::models::BookRecord;

/// Remove books whose lowercase `(title, author)` pair was already seen
///
/// The first occurrence wins, so callers should pass books in priority order.
pub fn deduplicate_books<I>(books: I) -> Vec<BookRecord>
where
    I: IntoIterator<Item = BookRecord>,
{
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(book.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookRecordBuilder;

    #[test]
    fn test_first_occurrence_wins() {
        let books = vec![
            BookRecordBuilder::new("a", "Sleeping Murder", "Agatha Christie").build(),
            BookRecordBuilder::new("b", "Atomic Habits", "James Clear").build(),
            BookRecordBuilder::new("c", "SLEEPING MURDER", "AGATHA CHRISTIE").build(),
        ];

        let unique = deduplicate_books(books);
        let ids: Vec<&str> = unique.iter().map(|b| b.google_books_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_same_title_different_author_kept() {
        let books = vec![
            BookRecordBuilder::new("a", "Dune", "Frank Herbert").build(),
            BookRecordBuilder::new("b", "Dune", "Brian Herbert").build(),
        ];
        assert_eq!(deduplicate_books(books).len(), 2);
    }
}
