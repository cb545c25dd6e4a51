//! yhteys startup discovery search
//!
//! Fuzzy, weighted multi-field search over startup profiles with
//! structured filters, facet derivation and search suggestions. The
//! `search` module is the pure core; the rest wires it to catalog files,
//! configuration, a CLI and an MCP stdio server.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod search;
pub mod tools;

pub use catalog::{Catalog, StartupRecord};
pub use search::{
    advanced_search, get_filter_options, get_search_suggestions, search_startups, FilterFacets,
    FilterOptions, SearchEngine, SearchResult,
};
