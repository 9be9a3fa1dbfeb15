//! Search query planning from extracted candidates.

use std::collections::HashSet;

use crate::models::CandidateSet;

/// Maximum number of queries sent for one cover
pub const MAX_QUERIES: usize = 6;

/// Build the ordered query list for a candidate set
///
/// Most specific first: every `title author` pair, then each title alone,
/// then each author alone. Queries are unique under a case- and
/// whitespace-insensitive key, never blank, and capped at [`MAX_QUERIES`].
pub fn plan(candidates: &CandidateSet) -> Vec<String> {
    QueryPlanner::default().plan(candidates)
}

/// Query planner with an adjustable cap
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner {
    max_queries: usize,
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self {
            max_queries: MAX_QUERIES,
        }
    }
}

impl QueryPlanner {
    /// Create a planner that emits at most `max_queries` queries
    pub fn new(max_queries: usize) -> Self {
        Self { max_queries }
    }

    /// Build the ordered query list
    pub fn plan(&self, candidates: &CandidateSet) -> Vec<String> {
        let titles = &candidates.title_candidates;
        let authors = &candidates.author_candidates;

        let combined = titles
            .iter()
            .flat_map(|title| authors.iter().map(move |author| format!("{} {}", title, author)));
        let ordered = combined
            .chain(titles.iter().cloned())
            .chain(authors.iter().cloned());

        let mut seen = HashSet::new();
        ordered
            .map(|query| query.trim().to_string())
            .filter(|query| !query.is_empty())
            .filter(|query| seen.insert(query_key(query)))
            .take(self.max_queries)
            .collect()
    }
}

/// Lower-cased, whitespace-collapsed comparison key
pub fn query_key(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
