//! Query Parser & Keyword Extractor
//!
//! Lower-cases and tokenizes free-text queries, dropping short tokens,
//! stop words and anything that is not purely alphabetic.

/// Stop words that should be excluded from keyword matching.
/// The last three are noise words for this marketplace.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "startup", "company", "business",
];

/// Tokens of this many characters or fewer are dropped
const MIN_KEYWORD_LEN: usize = 2;

/// Parsed and processed search query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query, used for the full-query scoring pass
    pub whole_query: String,
    /// Extracted keywords in query order, duplicates kept
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    /// True when the query has no non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.whole_query.trim().is_empty()
    }
}

/// Query parser and preprocessor
pub struct QueryParser;

impl QueryParser {
    /// Parse a search query into its components
    pub fn parse(query: &str) -> ParsedQuery {
        ParsedQuery {
            whole_query: query.to_string(),
            keywords: Self::extract_keywords(query),
        }
    }

    /// Tokenize text into keywords.
    ///
    /// Repeated words are kept: each occurrence contributes to the score
    /// again, so repetition in a query acts as emphasis.
    pub fn extract_keywords(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
            .filter(|w| !Self::is_stop_word(w))
            .filter(|w| w.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_string)
            .collect()
    }

    /// Check if a word is a stop word
    fn is_stop_word(word: &str) -> bool {
        STOP_WORDS.contains(&word)
    }
}

/// Free-function form of [`QueryParser::extract_keywords`]
pub fn extract_keywords(text: &str) -> Vec<String> {
    QueryParser::extract_keywords(text)
}
