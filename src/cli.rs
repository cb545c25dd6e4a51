//! CLI mode implementation
//!
//! Argument structs double as MCP tool input schemas. Catalog selection
//! is CLI-only; the MCP server searches the catalog it was started with.

use crate::search::FilterOptions;
use clap::{Args, Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Yhteys startup discovery CLI
#[derive(Parser)]
#[command(name = "yhteys")]
#[command(about = "Fuzzy search over a startup catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to $YHTEYS_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search startups by free text, optionally narrowed by filters
    Search(SearchArgs),
    /// List popular search suggestions
    Suggest(SuggestArgs),
    /// List the distinct values available for each filter
    Filters(FiltersArgs),
}

/// Where the startups come from
#[derive(Args, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct CatalogArgs {
    /// Catalog file (JSON array of startups, or an object with a `startups` array)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Append the built-in demo startups even if the config leaves them out
    #[arg(long, conflicts_with = "no_demo")]
    pub demo: bool,

    /// Leave out the built-in demo startups
    #[arg(long)]
    pub no_demo: bool,
}

impl CatalogArgs {
    /// Whether to append the demo startups, given the configured default
    pub fn include_demo(&self, configured: bool) -> bool {
        if self.no_demo {
            false
        } else {
            self.demo || configured
        }
    }
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// Free-text search terms
    #[arg(short = 'q', long)]
    #[schemars(description = "Free-text search terms")]
    pub query: String,

    #[command(flatten)]
    #[serde(skip)]
    pub catalog: CatalogArgs,

    /// Minimum relevance score, 0-100 (default 50)
    #[arg(short = 't', long)]
    #[serde(default)]
    #[schemars(description = "Minimum relevance score, 0-100 (default 50)")]
    pub threshold: Option<f64>,

    /// Maximum number of results (default 20, max 200)
    #[arg(short = 'l', long)]
    #[serde(default)]
    #[schemars(description = "Maximum number of results (default 20, max 200)")]
    pub limit: Option<usize>,

    /// Exact industry
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Exact industry, e.g. SaaS")]
    pub industry: Option<String>,

    /// Location substring (case-insensitive)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Location substring (case-insensitive)")]
    pub location: Option<String>,

    /// Exact funding stage
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Exact funding stage, e.g. Seed")]
    pub funding_stage: Option<String>,

    /// Minimum team size (inclusive)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Minimum team size (inclusive)")]
    pub min_team_size: Option<u32>,

    /// Maximum team size (inclusive)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Maximum team size (inclusive)")]
    pub max_team_size: Option<u32>,

    /// Minimum rating (inclusive)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Minimum rating (inclusive)")]
    pub min_rating: Option<f64>,

    /// Tag substring; repeat for any-of matching
    #[arg(long = "tag")]
    #[serde(default)]
    #[schemars(description = "Tag substrings; a startup matches if any of its tags contains one")]
    pub tags: Vec<String>,

    /// Emit JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Return JSON instead of markdown")]
    pub json: bool,
}

impl SearchArgs {
    /// Filter options carried by these arguments
    pub fn filters(&self) -> FilterOptions {
        FilterOptions {
            industry: self.industry.clone(),
            location: self.location.clone(),
            funding_stage: self.funding_stage.clone(),
            min_team_size: self.min_team_size,
            max_team_size: self.max_team_size,
            min_rating: self.min_rating,
            tags: self.tags.clone(),
        }
    }
}

/// Suggest tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct SuggestArgs {
    #[command(flatten)]
    #[serde(skip)]
    pub catalog: CatalogArgs,

    /// Emit JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Return JSON instead of markdown")]
    pub json: bool,
}

/// Filters tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct FiltersArgs {
    #[command(flatten)]
    #[serde(skip)]
    pub catalog: CatalogArgs,

    /// Emit JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Return JSON instead of markdown")]
    pub json: bool,
}
