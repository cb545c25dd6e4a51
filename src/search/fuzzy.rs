//! Fuzzy Field Scorer
//!
//! Scores how well a query (or a single keyword) matches a field's text.
//! Three tiers, checked in order:
//!
//! 1. case-insensitive equality of the full strings
//! 2. case-insensitive substring containment
//! 3. ordered character subsequence coverage, kept only above a cutoff
//!
//! This is a cheap approximation rather than an edit distance: it favours
//! prefix and in-order character matches over transpositions.

use super::ranking::ScoringConfig;

/// Match result with score and tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// Score in (0, 100]
    pub score: f64,
    /// Which tier produced the score
    pub kind: MatchKind,
}

/// Classification of how the query matched the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Field text equals the query
    Exact,
    /// Field text contains the query
    Substring,
    /// Query characters appear in order inside the field text
    Subsequence,
}

/// Fuzzy matcher with configurable tier scores
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    exact_score: f64,
    substring_score: f64,
    subsequence_cutoff: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    /// Create a new fuzzy matcher with the default constants
    pub fn new() -> Self {
        Self::with_config(&ScoringConfig::default())
    }

    /// Create a fuzzy matcher from a scoring configuration
    pub fn with_config(config: &ScoringConfig) -> Self {
        Self {
            exact_score: config.exact_score,
            substring_score: config.substring_score,
            subsequence_cutoff: config.subsequence_cutoff,
        }
    }

    /// Score `needle` against `haystack`, returning 0.0 for no match
    pub fn score(&self, needle: &str, haystack: &str) -> f64 {
        self.fuzzy_match(needle, haystack).map_or(0.0, |m| m.score)
    }

    /// Perform fuzzy matching between needle and haystack
    ///
    /// Returns Some(FuzzyMatch) if there's a match, None otherwise
    pub fn fuzzy_match(&self, needle: &str, haystack: &str) -> Option<FuzzyMatch> {
        if needle.is_empty() {
            return None;
        }

        let needle_lower = needle.to_lowercase();
        let haystack_lower = haystack.to_lowercase();

        if haystack_lower.contains(&needle_lower) {
            return Some(if haystack_lower == needle_lower {
                FuzzyMatch {
                    score: self.exact_score,
                    kind: MatchKind::Exact,
                }
            } else {
                FuzzyMatch {
                    score: self.substring_score,
                    kind: MatchKind::Substring,
                }
            });
        }

        let needle_chars: Vec<char> = needle_lower.chars().collect();
        let consumed = Self::subsequence_len(&needle_chars, &haystack_lower);
        let ratio = consumed as f64 / needle_chars.len() as f64 * 100.0;

        // Strictly above the cutoff; exactly at it is still noise
        if ratio > self.subsequence_cutoff {
            Some(FuzzyMatch {
                score: ratio,
                kind: MatchKind::Subsequence,
            })
        } else {
            None
        }
    }

    /// Count how many needle characters are consumed, in order, while
    /// walking the haystack once
    fn subsequence_len(needle: &[char], haystack: &str) -> usize {
        let mut consumed = 0;
        for ch in haystack.chars() {
            if consumed == needle.len() {
                break;
            }
            if ch == needle[consumed] {
                consumed += 1;
            }
        }
        consumed
    }
}

/// Score a query against a field's text with the default constants
pub fn fuzzy_score(query: &str, field_text: &str) -> f64 {
    FuzzyMatcher::new().score(query, field_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let matcher = FuzzyMatcher::new();
        let m = matcher.fuzzy_match("SaaS", "saas").unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn test_substring_match() {
        let matcher = FuzzyMatcher::new();
        let m = matcher.fuzzy_match("workflow", "AI Workflow Solutions").unwrap();
        assert_eq!(m.kind, MatchKind::Substring);
        assert_eq!(m.score, 90.0);
    }

    #[test]
    fn test_subsequence_match() {
        let matcher = FuzzyMatcher::new();
        // "analtics" is a subsequence of "analytics" but not a substring
        let m = matcher.fuzzy_match("analtics", "analytics").unwrap();
        assert_eq!(m.kind, MatchKind::Subsequence);
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn test_partial_subsequence_above_cutoff() {
        // "cloudx": c-l-o-u-d consumed, x never found -> 5/6
        let score = fuzzy_score("cloudx", "cloud platform");
        assert!((score - 500.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_subsequence_cutoff_is_strict() {
        // "abcxy" against "abc": 3/5 = 60%, not above the cutoff
        assert_eq!(fuzzy_score("abcxy", "abc"), 0.0);
        // "abcdxy" against "abcd": 4/6 = 66.7%, above the cutoff
        assert!(fuzzy_score("abcdxy", "abcd") > 60.0);
    }

    #[test]
    fn test_subsequence_respects_order() {
        // every character present, but in reverse order
        assert_eq!(fuzzy_score("dcba", "abcd"), 0.0);
    }

    #[test]
    fn test_tier_precedence() {
        let exact = fuzzy_score("fintech", "FinTech");
        let substring = fuzzy_score("fintech", "FinTech Labs");
        // six of seven characters in order
        let subsequence = fuzzy_score("fintech", "F-i-n-t-e-c");
        assert!(exact > substring);
        assert!(substring > subsequence);
        assert!(subsequence > 0.0);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(fuzzy_score("zzzznonexistentqueryterm", "AI Workflow Solutions"), 0.0);
    }

    #[test]
    fn test_empty_needle() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.fuzzy_match("", "anything").is_none());
        assert_eq!(matcher.score("", ""), 0.0);
    }

    #[test]
    fn test_empty_haystack() {
        assert_eq!(fuzzy_score("ai", ""), 0.0);
    }

    #[test]
    fn test_custom_cutoff() {
        let config = ScoringConfig {
            subsequence_cutoff: 50.0,
            ..ScoringConfig::default()
        };
        let matcher = FuzzyMatcher::with_config(&config);
        // 3/5 = 60% now clears a 50% cutoff
        assert!((matcher.score("abcxy", "abc") - 60.0).abs() < 1e-9);
    }
}
