//! Lookup tables that steer line classification.
//!
//! The lists here are tuning data rather than rules: they are English and
//! genre flavoured, and the `[lexicon]` configuration section can replace or
//! extend them (see [`crate::config::LexiconConfig`]).

use std::collections::HashSet;

/// Marketing and legal phrases that never belong to a title or author
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    "new york times bestseller",
    "bestseller",
    "best-selling",
    "a novel",
    "a memoir",
    "a thriller",
    "now a major motion picture",
    "introduction by",
    "foreword by",
    "afterword by",
    "translated by",
    "edited by",
    "isbn",
    "barcode",
    "copyright",
    "all rights reserved",
    "penguin",
    "classics",
    "http",
    "www.",
    ".com",
    "$",
    "£",
    "€",
];

/// Words that mark a phrase as a title even when it is shaped like a name
pub const DEFAULT_TITLE_KEYWORDS: &[&str] = &[
    "murder", "death", "escape", "sleeping", "night", "red", "peak", "children", "survive",
];

/// Short words allowed inside a run of single-word ALL-CAPS title lines
pub const DEFAULT_TITLE_JOINERS: &[&str] = &[
    "of", "the", "and", "a", "an", "in", "on", "at", "to", "for", "by",
];

/// Lower-case surname particles (Heinrich von Kleist, Vincent van Gogh)
pub const DEFAULT_NAME_PARTICLES: &[&str] = &["von", "van", "de", "la", "du"];

/// Articles and prepositions; two or more in a line make it read as a title phrase
pub const DEFAULT_PHRASE_ARTICLES: &[&str] = &[
    "the", "of", "and", "or", "in", "on", "at", "for", "with", "a", "an",
];

/// Lookup tables consulted by the candidate extractor
#[derive(Debug, Clone)]
pub struct Lexicon {
    boilerplate: Vec<String>,
    title_keywords: HashSet<String>,
    title_joiners: HashSet<String>,
    name_particles: HashSet<String>,
    phrase_articles: HashSet<String>,
}

impl Lexicon {
    /// Create a lexicon from explicit boilerplate phrases and title keywords,
    /// keeping the built-in structural word lists
    pub fn new<B, K>(boilerplate: B, title_keywords: K) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            boilerplate: lowercase_list(boilerplate),
            title_keywords: lowercase_set(title_keywords),
            title_joiners: lowercase_set(DEFAULT_TITLE_JOINERS.iter()),
            name_particles: lowercase_set(DEFAULT_NAME_PARTICLES.iter()),
            phrase_articles: lowercase_set(DEFAULT_PHRASE_ARTICLES.iter()),
        }
    }

    /// Add boilerplate phrases
    pub fn extend_boilerplate<I>(mut self, phrases: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for phrase in lowercase_list(phrases) {
            if !self.boilerplate.contains(&phrase) {
                self.boilerplate.push(phrase);
            }
        }
        self
    }

    /// Add title keywords
    pub fn extend_title_keywords<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.title_keywords.extend(lowercase_set(keywords));
        self
    }

    /// Case-insensitive substring match against the boilerplate phrases
    pub fn is_boilerplate(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.boilerplate.iter().any(|bp| lower.contains(bp.as_str()))
    }

    /// Whether a lower-case token is a title keyword
    pub fn is_title_keyword(&self, token: &str) -> bool {
        self.title_keywords.contains(token)
    }

    /// Whether a lower-case token may join a wrapped ALL-CAPS title
    pub fn is_title_joiner(&self, token: &str) -> bool {
        self.title_joiners.contains(token)
    }

    /// Whether a lower-case token is a surname particle
    pub fn is_name_particle(&self, token: &str) -> bool {
        self.name_particles.contains(token)
    }

    /// Whether a lower-case token is an article or preposition
    pub fn is_phrase_article(&self, token: &str) -> bool {
        self.phrase_articles.contains(token)
    }

    /// The boilerplate phrases, lower-cased
    pub fn boilerplate(&self) -> &[String] {
        &self.boilerplate
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_BOILERPLATE.iter(), DEFAULT_TITLE_KEYWORDS.iter())
    }
}

fn lowercase_list<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn lowercase_set<I>(items: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lowercase_list(items).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boilerplate_matches_substrings() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_boilerplate("A New York Times Bestseller"));
        assert!(lexicon.is_boilerplate("ISBN 978-0-00-712086-4"));
        assert!(lexicon.is_boilerplate("www.harpercollins.co.uk"));
        assert!(lexicon.is_boilerplate("$16.99 US"));
        assert!(lexicon.is_boilerplate("PENGUIN CLASSICS"));
        assert!(!lexicon.is_boilerplate("Sleeping Murder"));
    }

    #[test]
    fn test_word_lists() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_title_keyword("murder"));
        assert!(!lexicon.is_title_keyword("christie"));
        assert!(lexicon.is_title_joiner("of"));
        assert!(lexicon.is_name_particle("von"));
        assert!(lexicon.is_phrase_article("with"));
    }

    #[test]
    fn test_replace_and_extend() {
        let lexicon = Lexicon::new(["Book Club Pick"], ["Wolf"])
            .extend_boilerplate(["Signed Edition", "book club pick"])
            .extend_title_keywords(["Summer"]);

        assert!(lexicon.is_boilerplate("BOOK CLUB PICK"));
        assert!(lexicon.is_boilerplate("signed edition"));
        assert!(!lexicon.is_boilerplate("Bestseller"));
        assert_eq!(lexicon.boilerplate().len(), 2);
        assert!(lexicon.is_title_keyword("wolf"));
        assert!(lexicon.is_title_keyword("summer"));
        assert!(!lexicon.is_title_keyword("murder"));
    }
}
