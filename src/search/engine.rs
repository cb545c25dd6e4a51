//! Search Engine Integration
//!
//! Ties together keyword extraction, weighted scoring, filtering and
//! ranking into the two public search entry points.

use super::filter::FilterOptions;
use super::parser::QueryParser;
use super::ranking::{RecordScorer, ScoringConfig, SearchField};
use crate::catalog::StartupRecord;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A ranked match
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
    /// The matched record, borrowed from the caller's collection
    pub startup: &'a StartupRecord,
    /// Relevance in [0, 100]
    pub score: f64,
    /// Fields that contributed, in first-discovered order
    pub matched_fields: Vec<SearchField>,
}

/// Search engine that combines parsing, scoring, filtering and ranking.
///
/// Holds only configuration; every call works on its own inputs, so one
/// engine can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    scorer: RecordScorer,
}

impl SearchEngine {
    /// Create a new search engine with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create search engine with a custom scoring configuration
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            scorer: RecordScorer::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    /// Score every candidate and return those at or above `threshold`,
    /// highest score first.
    ///
    /// A blank query returns nothing. Equal scores keep their input order.
    /// `None` uses the configured default threshold.
    pub fn search_startups<'a>(
        &self,
        query: &str,
        candidates: &'a [StartupRecord],
        threshold: Option<f64>,
    ) -> Vec<SearchResult<'a>> {
        self.rank(query, candidates.iter(), threshold)
    }

    /// Narrow the candidates with `filters`, then search like
    /// [`search_startups`](Self::search_startups)
    pub fn advanced_search<'a>(
        &self,
        query: &str,
        candidates: &'a [StartupRecord],
        filters: &FilterOptions,
        threshold: Option<f64>,
    ) -> Vec<SearchResult<'a>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let filtered = candidates.iter().filter(|record| filters.matches(record));
        self.rank(query, filtered, threshold)
    }

    fn rank<'a, I>(&self, query: &str, candidates: I, threshold: Option<f64>) -> Vec<SearchResult<'a>>
    where
        I: Iterator<Item = &'a StartupRecord>,
    {
        let parsed = QueryParser::parse(query);
        if parsed.is_blank() {
            return Vec::new();
        }

        let threshold = threshold.unwrap_or(self.config().default_threshold);
        debug!(
            "Searching for '{}' with {} keywords, threshold {}",
            parsed.whole_query,
            parsed.keywords.len(),
            threshold
        );

        let mut scanned = 0usize;
        let mut results: Vec<SearchResult<'a>> = candidates
            .filter_map(|record| {
                scanned += 1;
                let scored = self.scorer.score(&parsed, record);
                (scored.score >= threshold).then(|| SearchResult {
                    startup: record,
                    score: scored.score,
                    matched_fields: scored.matched_fields,
                })
            })
            .collect();

        // Stable sort: ties keep input order
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!("{} of {} candidates matched", results.len(), scanned);
        results
    }
}

/// Search with the default constants
pub fn search_startups<'a>(
    query: &str,
    candidates: &'a [StartupRecord],
    threshold: Option<f64>,
) -> Vec<SearchResult<'a>> {
    SearchEngine::new().search_startups(query, candidates, threshold)
}

/// Filtered search with the default constants
pub fn advanced_search<'a>(
    query: &str,
    candidates: &'a [StartupRecord],
    filters: &FilterOptions,
    threshold: Option<f64>,
) -> Vec<SearchResult<'a>> {
    SearchEngine::new().advanced_search(query, candidates, filters, threshold)
}
