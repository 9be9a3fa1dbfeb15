//! Relevance scoring of search results against extracted candidates.

use crate::models::{BookRecord, CandidateSet};

const TITLE_EXACT: u32 = 100;
const TITLE_PARTIAL: u32 = 50;
const TITLE_WORD: u32 = 20;
const TITLE_WORD_MIN_LEN: usize = 4;

const AUTHOR_EXACT: u32 = 80;
const AUTHOR_PARTIAL: u32 = 40;
const AUTHOR_WORD: u32 = 15;
const AUTHOR_WORD_MIN_LEN: usize = 3;

/// A record paired with its relevance score, discarded after sorting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredBookRecord {
    pub book: BookRecord,
    pub score: u32,
}

impl ScoredBookRecord {
    /// Score a record against the candidates
    pub fn new(book: BookRecord, candidates: &CandidateSet) -> Self {
        let score = score(&book, candidates);
        Self { book, score }
    }

    /// Drop the score
    pub fn into_book(self) -> BookRecord {
        self.book
    }
}

/// Additive similarity score, higher is better
///
/// Every candidate contributes independently, so a record matching several
/// candidates outranks one matching a single candidate. Comparison is
/// case-insensitive throughout.
pub fn score(book: &BookRecord, candidates: &CandidateSet) -> u32 {
    let title = book.title.to_lowercase();
    let author = book.author.to_lowercase();

    let title_score: u32 = candidates
        .title_candidates
        .iter()
        .map(|candidate| title_signal(&title, &candidate.to_lowercase()))
        .sum();
    let author_score: u32 = candidates
        .author_candidates
        .iter()
        .map(|candidate| author_signal(&author, &candidate.to_lowercase()))
        .sum();

    title_score + author_score
}

fn title_signal(title: &str, candidate: &str) -> u32 {
    if title.is_empty() || candidate.is_empty() {
        return 0;
    }
    if title == candidate {
        return TITLE_EXACT;
    }
    if title.contains(candidate) || candidate.contains(title) {
        return TITLE_PARTIAL;
    }
    let word_hit = candidate
        .split_whitespace()
        .any(|word| word.chars().count() >= TITLE_WORD_MIN_LEN && title.contains(word));
    if word_hit {
        TITLE_WORD
    } else {
        0
    }
}

fn author_signal(author: &str, candidate: &str) -> u32 {
    if author.is_empty() || candidate.is_empty() {
        return 0;
    }
    if author == candidate {
        return AUTHOR_EXACT;
    }
    if author.contains(candidate) || candidate.contains(author) {
        return AUTHOR_PARTIAL;
    }
    let hits = candidate
        .split_whitespace()
        .filter(|word| word.chars().count() >= AUTHOR_WORD_MIN_LEN && author.contains(word))
        .count() as u32;
    hits * AUTHOR_WORD
}

/// Sort books by descending score, ties keeping arrival order
pub fn rank(books: Vec<BookRecord>, candidates: &CandidateSet) -> Vec<BookRecord> {
    let mut scored: Vec<ScoredBookRecord> = books
        .into_iter()
        .map(|book| ScoredBookRecord::new(book, candidates))
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.into_iter().map(ScoredBookRecord::into_book).collect()
}
