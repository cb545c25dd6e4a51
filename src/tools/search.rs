//! Search tool implementation
//!
//! Implements the `search(query, ...filters)` MCP tool

use super::{parse_args, respond, ToolContext};
use crate::cli::SearchArgs;
use crate::error::{validate_query, validate_threshold, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::search::SearchResult;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// JSON body of a search response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse<'a> {
    query: &'a str,
    total: usize,
    results: &'a [SearchResult<'a>],
}

/// Format search results as result cards in markdown
pub fn format_search_results(results: &[SearchResult<'_>], query: &str, total: usize) -> String {
    if results.is_empty() {
        return format!(
            "# Search Results\n\nNo startups found matching \"{}\". \
             Try broader terms or fewer filters.\n",
            query
        );
    }

    let mut md = String::new();
    md.push_str(&format!("# Search Results · {} startups\n\n", total));
    if results.len() < total {
        md.push_str(&format!("Showing top {} of {}\n\n", results.len(), total));
    }

    for result in results {
        let startup = result.startup;
        md.push_str(&format!("## {}\n", startup.name));
        md.push_str(&format!("**{}% match**", result.score.round()));
        if !startup.industry.is_empty() {
            md.push_str(&format!(" · {}", startup.industry));
        }
        if !startup.location.is_empty() {
            md.push_str(&format!(" · {}", startup.location));
        }
        if startup.rating > 0.0 {
            md.push_str(&format!(" · ★ {:.1}", startup.rating));
        }
        md.push_str("\n\n");

        if !startup.description.is_empty() {
            md.push_str(&format!("> {}\n\n", startup.description));
        }

        if !startup.tags.is_empty() {
            md.push_str(&format!("Tags: {}\n", startup.tags.join(", ")));
        }

        let fields: Vec<&str> = result.matched_fields.iter().map(|f| f.as_str()).collect();
        md.push_str(&format!("Matched in: {}\n", fields.join(", ")));
        md.push_str("\n---\n\n");
    }

    md
}

/// Handle search tool call (MCP)
pub async fn handle_search(id: Option<Value>, args: Value, ctx: &ToolContext) -> McpResponse {
    let result = parse_args(args).and_then(|args| execute_search(ctx, args));
    respond(id, result)
}

/// Shared implementation for search (used by MCP and CLI)
pub fn execute_search(ctx: &ToolContext, args: SearchArgs) -> Result<ToolResult, AppError> {
    validate_query(&args.query)?;
    validate_threshold(args.threshold)?;

    let filters = args.filters();
    let limit = ctx.config.effective_limit(args.limit);
    debug!("Search request: '{}', filters: {:?}, limit {}", args.query, filters, limit);

    let records = ctx.catalog.records();
    let mut results = if filters.is_empty() {
        ctx.engine.search_startups(&args.query, records, args.threshold)
    } else {
        ctx.engine
            .advanced_search(&args.query, records, &filters, args.threshold)
    };

    let total = results.len();
    results.truncate(limit);
    info!("Found {} startups for '{}'", total, args.query);

    if args.json {
        let body = SearchResponse {
            query: &args.query,
            total,
            results: &results,
        };
        return Ok(ToolResult::text(serde_json::to_string_pretty(&body)?));
    }

    Ok(ToolResult::text(format_search_results(&results, &args.query, total)))
}
