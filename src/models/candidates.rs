//! Title/author candidates extracted from cover text.

use serde::{Deserialize, Serialize};

/// Maximum number of title candidates kept after extraction
pub const MAX_TITLE_CANDIDATES: usize = 5;

/// Maximum number of author candidates kept after extraction
pub const MAX_AUTHOR_CANDIDATES: usize = 3;

/// Ordered title and author guesses, most likely first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSet {
    /// Title guesses (at most 5, unique case-insensitively)
    pub title_candidates: Vec<String>,

    /// Author guesses (at most 3, unique case-insensitively)
    pub author_candidates: Vec<String>,
}

impl CandidateSet {
    /// Create a candidate set from explicit lists
    pub fn new(title_candidates: Vec<String>, author_candidates: Vec<String>) -> Self {
        Self {
            title_candidates,
            author_candidates,
        }
    }

    /// True when neither list holds a candidate
    pub fn is_empty(&self) -> bool {
        self.title_candidates.is_empty() && self.author_candidates.is_empty()
    }

    /// Best title guess, if any
    pub fn best_title(&self) -> Option<&str> {
        self.title_candidates.first().map(String::as_str)
    }

    /// Best author guess, if any
    pub fn best_author(&self) -> Option<&str> {
        self.author_candidates.first().map(String::as_str)
    }
}
