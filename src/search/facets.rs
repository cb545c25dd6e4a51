//! Facets and search suggestions
//!
//! Query-independent summaries of a candidate collection, used to fill
//! filter pickers and the "popular searches" strip.

use crate::catalog::StartupRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Suggestions that are always offered
pub const EDITORIAL_SUGGESTIONS: [&str; 5] = [
    "AI automation",
    "workflow platform",
    "data analytics",
    "mobile app",
    "cloud solution",
];

const TOP_INDUSTRIES: usize = 5;
const TOP_TAGS: usize = 10;

/// Distinct values per filterable attribute, each sorted ascending.
/// An empty string is a value like any other and sorts first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacets {
    pub industries: Vec<String>,
    pub locations: Vec<String>,
    pub funding_stages: Vec<String>,
    pub tags: Vec<String>,
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Collect the distinct industries, locations, funding stages and tags
pub fn get_filter_options(candidates: &[StartupRecord]) -> FilterFacets {
    FilterFacets {
        industries: distinct_sorted(candidates.iter().map(|s| &s.industry)),
        locations: distinct_sorted(candidates.iter().map(|s| &s.location)),
        funding_stages: distinct_sorted(candidates.iter().map(|s| &s.funding_stage)),
        tags: distinct_sorted(candidates.iter().flat_map(|s| s.tags.iter())),
    }
}

/// The `limit` most frequent values, ties in first-seen order
fn most_frequent<'a>(values: impl Iterator<Item = &'a String>, limit: usize) -> Vec<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        match index.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.as_str(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(v, _)| v).collect()
}

/// Top industries, then top tags, then the editorial suggestions,
/// deduplicated in that order
pub fn get_search_suggestions(candidates: &[StartupRecord]) -> Vec<String> {
    let industries = most_frequent(candidates.iter().map(|s| &s.industry), TOP_INDUSTRIES);
    let tags = most_frequent(candidates.iter().flat_map(|s| s.tags.iter()), TOP_TAGS);

    let mut seen = HashSet::new();
    industries
        .into_iter()
        .chain(tags)
        .map(str::to_string)
        .chain(EDITORIAL_SUGGESTIONS.iter().map(|s| s.to_string()))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn startup(id: &str, industry: &str, location: &str, stage: &str, tags: &[&str]) -> StartupRecord {
        StartupRecord {
            id: id.into(),
            industry: industry.into(),
            location: location.into(),
            funding_stage: stage.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..StartupRecord::default()
        }
    }

    #[test]
    fn test_filter_options_sorted_and_deduplicated() {
        let startups = vec![
            startup("1", "SaaS", "Austin, TX", "Seed", &["ai", "crm"]),
            startup("2", "SaaS", "Boston, MA", "Series A", &["crm"]),
            startup("3", "AI/ML", "Austin, TX", "Seed", &["ai", "vision"]),
        ];
        let facets = get_filter_options(&startups);
        assert_eq!(facets.industries, vec!["AI/ML", "SaaS"]);
        assert_eq!(facets.locations, vec!["Austin, TX", "Boston, MA"]);
        assert_eq!(facets.funding_stages, vec!["Seed", "Series A"]);
        assert_eq!(facets.tags, vec!["ai", "crm", "vision"]);
    }

    #[test]
    fn test_filter_options_empty() {
        assert_eq!(get_filter_options(&[]), FilterFacets::default());
    }

    #[test]
    fn test_filter_options_keep_blank_values() {
        let startups = vec![
            startup("1", "", "", "", &[""]),
            startup("2", "Fintech", "", "Seed", &[]),
        ];
        let facets = get_filter_options(&startups);
        assert_eq!(facets.industries, vec!["", "Fintech"]);
        assert_eq!(facets.locations, vec![""]);
        assert_eq!(facets.funding_stages, vec!["", "Seed"]);
        assert_eq!(facets.tags, vec![""]);
    }

    #[test]
    fn test_suggestions_count_blank_values() {
        let startups = vec![
            startup("1", "", "", "", &["ai"]),
            startup("2", "Fintech", "", "", &["ai"]),
        ];
        let suggestions = get_search_suggestions(&startups);
        // blank industry seen first with a tied count
        assert_eq!(suggestions[0], "");
        assert_eq!(suggestions[1], "Fintech");
        assert_eq!(suggestions[2], "ai");
        assert_eq!(suggestions.len(), 3 + EDITORIAL_SUGGESTIONS.len());
    }

    #[test]
    fn test_suggestions_always_include_editorial() {
        let suggestions = get_search_suggestions(&[]);
        assert_eq!(suggestions, EDITORIAL_SUGGESTIONS.to_vec());
    }

    #[test]
    fn test_suggestions_order_industries_tags_editorial() {
        let startups = vec![
            startup("1", "SaaS", "", "", &["crm", "ai"]),
            startup("2", "HealthTech", "", "", &["ai"]),
            startup("3", "HealthTech", "", "", &["mobile app"]),
        ];
        let suggestions = get_search_suggestions(&startups);
        assert_eq!(
            suggestions,
            vec![
                "HealthTech",
                "SaaS",
                "ai",
                "crm",
                "mobile app",
                "AI automation",
                "workflow platform",
                "data analytics",
                "cloud solution",
            ]
        );
    }

    #[test]
    fn test_suggestions_limit_top_industries_and_tags() {
        let startups: Vec<StartupRecord> = (0..8)
            .map(|i| {
                let tags: Vec<String> = (0..3).map(|t| format!("tag{}-{}", i, t)).collect();
                StartupRecord {
                    id: i.to_string(),
                    industry: format!("industry{}", i),
                    tags,
                    ..StartupRecord::default()
                }
            })
            .collect();
        let suggestions = get_search_suggestions(&startups);
        let industries = suggestions.iter().filter(|s| s.starts_with("industry")).count();
        let tags = suggestions.iter().filter(|s| s.starts_with("tag")).count();
        assert_eq!(industries, 5);
        assert_eq!(tags, 10);
        // equal counts keep first-seen order
        assert_eq!(suggestions[0], "industry0");
        assert_eq!(suggestions[5], "tag0-0");
    }
}
