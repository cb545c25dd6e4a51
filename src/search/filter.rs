//! Filter Predicate
//!
//! Structured constraints applied before scoring. Every populated field is
//! a conjunctive predicate; an unpopulated field is a wildcard.
//!
//! Empty strings, empty tag lists and zero numeric bounds count as
//! unpopulated, which is what a cleared filter form sends.

use crate::catalog::StartupRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Caller-supplied filter set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Exact industry
    pub industry: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Exact funding stage
    pub funding_stage: Option<String>,
    /// Inclusive lower bound on team size
    pub min_team_size: Option<u32>,
    /// Inclusive upper bound on team size
    pub max_team_size: Option<u32>,
    /// Inclusive lower bound on rating
    pub min_rating: Option<f64>,
    /// At least one of these must be a case-insensitive substring of a record tag
    pub tags: Vec<String>,
}

fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterOptions {
    /// True when no field constrains anything
    pub fn is_empty(&self) -> bool {
        populated(&self.industry).is_none()
            && populated(&self.location).is_none()
            && populated(&self.funding_stage).is_none()
            && self.min_team_size.unwrap_or(0) == 0
            && self.max_team_size.unwrap_or(0) == 0
            && self.min_rating.unwrap_or(0.0) == 0.0
            && self.tags.is_empty()
    }

    /// Evaluate every populated constraint against a record
    pub fn matches(&self, record: &StartupRecord) -> bool {
        if let Some(industry) = populated(&self.industry) {
            if record.industry != industry {
                return false;
            }
        }

        if let Some(location) = populated(&self.location) {
            if !record
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(stage) = populated(&self.funding_stage) {
            if record.funding_stage != stage {
                return false;
            }
        }

        if let Some(min) = self.min_team_size.filter(|&n| n > 0) {
            if record.team_size < min {
                return false;
            }
        }

        if let Some(max) = self.max_team_size.filter(|&n| n > 0) {
            if record.team_size > max {
                return false;
            }
        }

        if let Some(min) = self.min_rating.filter(|&r| r != 0.0) {
            if record.rating < min {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let record_tags: Vec<String> = record.tags.iter().map(|t| t.to_lowercase()).collect();
            let any_tag = self.tags.iter().any(|wanted| {
                let wanted = wanted.to_lowercase();
                record_tags.iter().any(|tag| tag.contains(&wanted))
            });
            if !any_tag {
                return false;
            }
        }

        true
    }
}

/// Free-function form of [`FilterOptions::matches`]
pub fn passes_filters(record: &StartupRecord, filters: &FilterOptions) -> bool {
    filters.matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StartupRecord {
        StartupRecord {
            id: "s1".into(),
            name: "DataFlow Analytics".into(),
            industry: "AI/ML".into(),
            location: "New York, NY".into(),
            funding_stage: "Seed".into(),
            team_size: 8,
            rating: 4.6,
            tags: vec!["data analytics".into(), "Big Data".into()],
            ..StartupRecord::default()
        }
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let filters = FilterOptions::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&record()));
        assert!(filters.matches(&StartupRecord::default()));
    }

    #[test]
    fn test_industry_exact() {
        let mut filters = FilterOptions {
            industry: Some("AI/ML".into()),
            ..Default::default()
        };
        assert!(filters.matches(&record()));
        filters.industry = Some("ai/ml".into());
        assert!(!filters.matches(&record()));
        filters.industry = Some("AI".into());
        assert!(!filters.matches(&record()));
    }

    #[test]
    fn test_location_substring_case_insensitive() {
        let filters = FilterOptions {
            location: Some("new york".into()),
            ..Default::default()
        };
        assert!(filters.matches(&record()));

        let filters = FilterOptions {
            location: Some("Boston".into()),
            ..Default::default()
        };
        assert!(!filters.matches(&record()));
    }

    #[test]
    fn test_funding_stage_exact() {
        let filters = FilterOptions {
            funding_stage: Some("Series A".into()),
            ..Default::default()
        };
        assert!(!filters.matches(&record()));
    }

    #[test]
    fn test_team_size_bounds_inclusive() {
        let at_bounds = FilterOptions {
            min_team_size: Some(8),
            max_team_size: Some(8),
            ..Default::default()
        };
        assert!(at_bounds.matches(&record()));

        let too_small = FilterOptions {
            min_team_size: Some(10),
            ..Default::default()
        };
        assert!(!too_small.matches(&record()));

        let too_large = FilterOptions {
            max_team_size: Some(5),
            ..Default::default()
        };
        assert!(!too_large.matches(&record()));
    }

    #[test]
    fn test_min_rating_inclusive() {
        let filters = FilterOptions {
            min_rating: Some(4.6),
            ..Default::default()
        };
        assert!(filters.matches(&record()));

        let filters = FilterOptions {
            min_rating: Some(4.7),
            ..Default::default()
        };
        assert!(!filters.matches(&record()));
    }

    #[test]
    fn test_tags_existential_substring() {
        let filters = FilterOptions {
            tags: vec!["quantum".into(), "big".into()],
            ..Default::default()
        };
        assert!(filters.matches(&record()));

        let filters = FilterOptions {
            tags: vec!["quantum".into()],
            ..Default::default()
        };
        assert!(!filters.matches(&record()));
    }

    #[test]
    fn test_blank_values_are_wildcards() {
        let filters = FilterOptions {
            industry: Some(String::new()),
            location: Some(String::new()),
            funding_stage: Some(String::new()),
            min_team_size: Some(0),
            max_team_size: Some(0),
            min_rating: Some(0.0),
            tags: vec![],
        };
        assert!(filters.is_empty());
        assert!(filters.matches(&record()));
    }

    #[test]
    fn test_conjunction() {
        let filters = FilterOptions {
            industry: Some("AI/ML".into()),
            min_team_size: Some(10),
            ..Default::default()
        };
        assert!(!filters.is_empty());
        assert!(!passes_filters(&record(), &filters));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let filters: FilterOptions =
            serde_json::from_str(r#"{"minTeamSize": 5, "fundingStage": "Seed", "tags": ["ai"]}"#)
                .unwrap();
        assert_eq!(filters.min_team_size, Some(5));
        assert_eq!(filters.funding_stage.as_deref(), Some("Seed"));
        assert_eq!(filters.tags, vec!["ai"]);
    }
}
