//! Startup discovery search with fuzzy matching
//!
//! Pipeline: filters narrow the candidates, the parser extracts keywords,
//! the fuzzy scorer rates the full query and each keyword against five
//! weighted fields, and the engine thresholds and ranks the results.
//! Facets and suggestions are derived from the candidates independently.

pub mod engine;
pub mod facets;
pub mod filter;
pub mod fuzzy;
pub mod parser;
pub mod ranking;


pub use engine::{advanced_search, search_startups, SearchEngine, SearchResult};
pub use facets::{get_filter_options, get_search_suggestions, FilterFacets};
pub use filter::{passes_filters, FilterOptions};
pub use fuzzy::{fuzzy_score, FuzzyMatcher};
pub use parser::{extract_keywords, ParsedQuery, QueryParser};
pub use ranking::{score_record, RecordScore, ScoringConfig, SearchField};
