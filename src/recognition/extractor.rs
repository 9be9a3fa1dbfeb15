//! Heuristic extraction of title and author candidates from OCR text.
//!
//! Cover text arrives as loosely ordered lines with no schema. Extraction runs
//! in three passes:
//!
//! 1. Lines are split, trimmed, and wrapped ALL-CAPS titles
//!    (`"THE\nCHILDREN\nOF\nRED\nPEAK"`) are joined back into one line.
//! 2. Each working line is classified by an ordered list of predicates
//!    (boilerplate, author after a `by` line, inline `by`, name-like,
//!    title-like) and folded into the candidate lists.
//! 3. Scattered single-word ALL-CAPS lines are recombined into a
//!    high-priority title, then both lists are cleaned, deduplicated and capped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::models::{CandidateSet, MAX_AUTHOR_CANDIDATES, MAX_TITLE_CANDIDATES};
use crate::recognition::{Lexicon, NameDictionary};

static STRIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s'.-]").expect("valid strip pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static INLINE_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^by\s+(.+)$").expect("valid inline by pattern"));

static BARE_INITIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Lu}\.$").expect("valid initial pattern"));

static LETTER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}{2,}").expect("valid letter run pattern"));

const MIN_TITLE_LEN: usize = 3;
const MAX_TITLE_LEN: usize = 100;
const MIN_CAPS_WORD_LEN: usize = 3;

/// How a single working line contributes to the candidate lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Marketing or legal text; contributes nothing
    Boilerplate,
    /// Author captured through a `by` rule; classification stops here
    Author(String),
    /// Ordinary line, possibly name-like and/or title-like
    Plain { author: bool, title: bool },
}

/// Accumulator threaded through the classification fold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionState {
    /// Title candidates in discovery order (cleaned, not yet deduplicated)
    pub titles: Vec<String>,
    /// Author candidates in discovery order (cleaned, not yet deduplicated)
    pub authors: Vec<String>,
    /// Lower-cased text of the previous working line
    pub previous: String,
}

impl ExtractionState {
    /// Fold one classified line into the state
    pub fn record(mut self, line: &str, class: LineClass) -> Self {
        match class {
            LineClass::Boilerplate => {}
            LineClass::Author(name) => push_cleaned(&mut self.authors, &name),
            LineClass::Plain { author, title } => {
                if author {
                    push_cleaned(&mut self.authors, line);
                }
                if title && self.titles.len() < MAX_TITLE_CANDIDATES {
                    push_cleaned(&mut self.titles, line);
                }
            }
        }
        self.previous = line.to_lowercase();
        self
    }
}

/// Turns raw OCR text into a [`CandidateSet`]
#[derive(Debug, Clone, Default)]
pub struct CandidateExtractor {
    names: NameDictionary,
    lexicon: Lexicon,
}

impl CandidateExtractor {
    /// Create an extractor over a name dictionary and lexicon
    pub fn new(names: NameDictionary, lexicon: Lexicon) -> Self {
        Self { names, lexicon }
    }

    /// Extract title and author candidates
    ///
    /// Blank input yields an empty set. The result holds at most five titles
    /// and three authors, with no case-insensitive duplicates and no title
    /// that equals a retained author.
    pub fn extract(&self, raw_text: &str) -> CandidateSet {
        if raw_text.trim().is_empty() {
            return CandidateSet::default();
        }

        let lines = split_lines(raw_text);
        let working = join_wrapped_titles(&lines, &self.lexicon);

        let state = working
            .iter()
            .fold(ExtractionState::default(), |state, line| {
                let class = self.classify(line, &state.previous);
                trace!(line = %line, ?class, "classified cover line");
                state.record(line, class)
            });

        let mut titles = state.titles;
        if let Some(combined) = self.recombine_caps_fragments(&lines) {
            let key = combined.to_lowercase();
            if !titles.iter().any(|t| t.to_lowercase() == key) {
                titles.insert(0, combined);
            }
        }

        let authors: Vec<String> = dedup_case_insensitive(state.authors)
            .into_iter()
            .take(MAX_AUTHOR_CANDIDATES)
            .collect();
        let author_keys: HashSet<String> = authors.iter().map(|a| a.to_lowercase()).collect();
        let titles: Vec<String> = dedup_case_insensitive(titles)
            .into_iter()
            .filter(|t| !author_keys.contains(&t.to_lowercase()))
            .take(MAX_TITLE_CANDIDATES)
            .collect();

        CandidateSet::new(titles, authors)
    }

    /// Classify a working line given the previous line (lower-cased)
    pub fn classify(&self, line: &str, previous: &str) -> LineClass {
        if self.lexicon.is_boilerplate(line) {
            return LineClass::Boilerplate;
        }

        if previous.contains("by") && self.looks_like_author(line) {
            return LineClass::Author(line.to_string());
        }

        if let Some(rest) = INLINE_BY
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        {
            if self.looks_like_author(rest) {
                return LineClass::Author(rest.to_string());
            }
        }

        LineClass::Plain {
            author: self.looks_like_author(line),
            title: looks_like_title(line),
        }
    }

    /// Name-shaped and not obviously a title phrase
    pub fn looks_like_author(&self, text: &str) -> bool {
        self.looks_like_name(text)
            && !self.looks_like_title_phrase(text)
            && !self.has_title_keyword(text)
    }

    /// A lone ALL-CAPS surname, or 2-4 capitalised tokens with a name signal
    ///
    /// The signal is a dictionary first name, a bare initial (`"K."`), or a
    /// surname particle. Particles are the one token allowed in lower case.
    pub fn looks_like_name(&self, text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        if let [single] = tokens.as_slice() {
            return is_caps_word(single) && single.chars().count() >= MIN_CAPS_WORD_LEN;
        }
        if !(2..=4).contains(&tokens.len()) {
            return false;
        }

        let capitalised = tokens.iter().all(|token| {
            if self.lexicon.is_name_particle(&normalize_token(token)) {
                return true;
            }
            token
                .trim_end_matches(['.', ','])
                .chars()
                .next()
                .is_some_and(char::is_uppercase)
        });
        if !capitalised {
            return false;
        }

        self.names.contains(tokens[0])
            || tokens.iter().any(|t| BARE_INITIAL.is_match(t))
            || tokens
                .iter()
                .any(|t| self.lexicon.is_name_particle(&normalize_token(t)))
    }

    /// Two or more articles/prepositions
    fn looks_like_title_phrase(&self, text: &str) -> bool {
        text.split_whitespace()
            .filter(|t| self.lexicon.is_phrase_article(&normalize_token(t)))
            .count()
            >= 2
    }

    fn has_title_keyword(&self, text: &str) -> bool {
        text.split_whitespace()
            .any(|t| self.lexicon.is_title_keyword(&normalize_token(t)))
    }

    /// Join 2-4 standalone ALL-CAPS words from anywhere on the cover
    fn recombine_caps_fragments(&self, lines: &[&str]) -> Option<String> {
        let fragments: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| {
                is_caps_word(line)
                    && line.chars().count() >= MIN_CAPS_WORD_LEN
                    && !self.lexicon.is_boilerplate(line)
            })
            .collect();

        if !(2..=4).contains(&fragments.len()) {
            return None;
        }
        let combined = clean_text(&fragments.join(" "));
        (!combined.is_empty()).then_some(combined)
    }
}

/// Split on newlines, trim, and drop lines of one character or less
pub fn split_lines(raw_text: &str) -> Vec<&str> {
    raw_text
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > 1)
        .collect()
}

/// Concatenate runs of consecutive single-word ALL-CAPS lines
///
/// A line belongs to a run when it is one upper-case word of at least three
/// letters, or a short joiner such as `OF` or `THE`. Runs of one line, and all
/// other lines, pass through unchanged.
pub fn join_wrapped_titles(lines: &[&str], lexicon: &Lexicon) -> Vec<String> {
    fn flush(run: &mut Vec<&str>, out: &mut Vec<String>) {
        if !run.is_empty() {
            out.push(run.join(" "));
            run.clear();
        }
    }

    let mut out = Vec::with_capacity(lines.len());
    let mut run: Vec<&str> = Vec::new();

    for line in lines {
        let fragment = is_caps_word(line)
            && (line.chars().count() >= MIN_CAPS_WORD_LEN
                || lexicon.is_title_joiner(&line.to_lowercase()));
        if fragment {
            run.push(*line);
        } else {
            flush(&mut run, &mut out);
            out.push((*line).to_string());
        }
    }
    flush(&mut run, &mut out);

    out
}

/// Plausible title text: 3-100 characters with at least one run of two letters
pub fn looks_like_title(text: &str) -> bool {
    let len = text.chars().count();
    if !(MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) {
        return false;
    }

    let only_symbols = text
        .chars()
        .all(|c| c.is_numeric() || c.is_whitespace() || c.is_ascii_punctuation());
    if only_symbols {
        return false;
    }

    LETTER_RUN.is_match(text)
}

/// Strip characters outside `[\w\s'.-]`, collapse whitespace, and trim
pub fn clean_text(text: &str) -> String {
    let stripped = STRIP_PATTERN.replace_all(text, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// `^[A-Z]+$`
fn is_caps_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_uppercase())
}

fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn push_cleaned(list: &mut Vec<String>, text: &str) {
    let cleaned = clean_text(text);
    if !cleaned.is_empty() {
        list.push(cleaned);
    }
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
