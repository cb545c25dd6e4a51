//! Ranking & Scoring System
//!
//! Weighted multi-field aggregation with configurable weights. Each record
//! exposes five searchable text blobs; the full query and every extracted
//! keyword are scored against each blob and the weighted sum is damped into
//! a 0-100 relevance score.

use super::fuzzy::FuzzyMatcher;
use super::parser::ParsedQuery;
use crate::catalog::StartupRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The searchable fields of a record, in scoring order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Description,
    Industry,
    Tags,
    Projects,
}

impl SearchField {
    /// All fields in the order they are scored
    pub const ALL: [SearchField; 5] = [
        SearchField::Name,
        SearchField::Description,
        SearchField::Industry,
        SearchField::Tags,
        SearchField::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Description => "description",
            SearchField::Industry => "industry",
            SearchField::Tags => "tags",
            SearchField::Projects => "projects",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub name: f64,
    pub description: f64,
    pub industry: f64,
    pub tags: f64,
    pub projects: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 3.0,
            description: 2.0,
            industry: 2.5,
            tags: 2.0,
            projects: 1.5,
        }
    }
}

impl FieldWeights {
    pub fn weight(&self, field: SearchField) -> f64 {
        match field {
            SearchField::Name => self.name,
            SearchField::Description => self.description,
            SearchField::Industry => self.industry,
            SearchField::Tags => self.tags,
            SearchField::Projects => self.projects,
        }
    }
}

/// Every tunable constant of the scoring pipeline.
///
/// The defaults reproduce the established ranking. The default threshold of 50 only
/// means something together with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Field weights
    pub weights: FieldWeights,
    /// Score for a case-insensitive full-string match
    pub exact_score: f64,
    /// Score for a case-insensitive substring match
    pub substring_score: f64,
    /// Subsequence coverage (percent) that must be exceeded to count
    pub subsequence_cutoff: f64,
    /// Multiplier applied to keyword hits relative to full-query hits
    pub keyword_discount: f64,
    /// Divisor applied to the weighted total
    pub normalizer: f64,
    /// Cap on the normalized score
    pub max_score: f64,
    /// Threshold used when the caller does not pass one
    pub default_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            exact_score: 100.0,
            substring_score: 90.0,
            subsequence_cutoff: 60.0,
            keyword_discount: 0.7,
            // one per searchable field
            normalizer: SearchField::ALL.len() as f64,
            max_score: 100.0,
            default_threshold: 50.0,
        }
    }
}

/// The five text blobs a record is scored against
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableFields {
    texts: [(SearchField, String); 5],
}

impl SearchableFields {
    /// Build the searchable blobs for a record
    pub fn from_record(record: &StartupRecord) -> Self {
        let projects = record
            .projects
            .iter()
            .map(|p| format!("{} {} {}", p.name, p.description, p.technologies.join(" ")))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            texts: [
                (SearchField::Name, record.name.clone()),
                (SearchField::Description, record.description.clone()),
                (SearchField::Industry, record.industry.clone()),
                (SearchField::Tags, record.tags.join(" ")),
                (SearchField::Projects, projects),
            ],
        }
    }

    pub fn text(&self, field: SearchField) -> &str {
        self.texts
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, t)| t.as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (SearchField, &str)> {
        self.texts.iter().map(|(f, t)| (*f, t.as_str()))
    }
}

/// Score of a single record with field provenance
#[derive(Debug, Clone, PartialEq)]
pub struct RecordScore {
    /// Normalized score in [0, max_score]
    pub score: f64,
    /// Fields that contributed, in first-discovered order
    pub matched_fields: Vec<SearchField>,
}

impl RecordScore {
    fn add_field(&mut self, field: SearchField) {
        if !self.matched_fields.contains(&field) {
            self.matched_fields.push(field);
        }
    }
}

/// Weighted aggregator over the searchable fields
#[derive(Debug, Clone)]
pub struct RecordScorer {
    matcher: FuzzyMatcher,
    config: ScoringConfig,
}

impl Default for RecordScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl RecordScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            matcher: FuzzyMatcher::with_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one record against a parsed query
    pub fn score(&self, parsed: &ParsedQuery, record: &StartupRecord) -> RecordScore {
        let fields = SearchableFields::from_record(record);
        let weights = &self.config.weights;

        let mut total = 0.0;
        let mut result = RecordScore {
            score: 0.0,
            matched_fields: Vec::new(),
        };

        // Direct full-query pass
        for (field, text) in fields.iter() {
            let score = self.matcher.score(&parsed.whole_query, text);
            if score > 0.0 {
                total += score * weights.weight(field);
                result.add_field(field);
            }
        }

        // Keyword pass, discounted
        for keyword in &parsed.keywords {
            for (field, text) in fields.iter() {
                let score = self.matcher.score(keyword, text);
                if score > 0.0 {
                    total += score * weights.weight(field) * self.config.keyword_discount;
                    result.add_field(field);
                }
            }
        }

        result.score = (total / self.config.normalizer).min(self.config.max_score);
        result
    }
}

/// Score a record with the default constants
pub fn score_record(query: &str, keywords: &[String], record: &StartupRecord) -> RecordScore {
    let parsed = ParsedQuery {
        whole_query: query.to_string(),
        keywords: keywords.to_vec(),
    };
    RecordScorer::default().score(&parsed, record)
}
