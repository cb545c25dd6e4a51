//! Filters tool implementation
//!
//! Implements the `filters()` MCP tool: the distinct values a filter
//! form can offer for the current catalog.

use super::{bullet_list, parse_args, respond, ToolContext};
use crate::cli::FiltersArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::search::FilterFacets;
use serde_json::Value;

/// Format facets as one markdown section per attribute
pub fn format_filter_options(facets: &FilterFacets) -> String {
    let mut md = String::from("# Filter Options\n\n");
    for (title, values) in [
        ("Industries", &facets.industries),
        ("Locations", &facets.locations),
        ("Funding Stages", &facets.funding_stages),
        ("Tags", &facets.tags),
    ] {
        md.push_str(&format!("## {}\n\n", title));
        md.push_str(&bullet_list(values));
        md.push('\n');
    }
    md
}

/// Handle filters tool call (MCP)
pub async fn handle_filters(id: Option<Value>, args: Value, ctx: &ToolContext) -> McpResponse {
    let result = parse_args(args).and_then(|args| execute_filters(ctx, args));
    respond(id, result)
}

/// Shared implementation for filters (used by MCP and CLI)
pub fn execute_filters(ctx: &ToolContext, args: FiltersArgs) -> Result<ToolResult, AppError> {
    let facets = ctx.cache.filter_options(&ctx.catalog);

    if args.json {
        return Ok(ToolResult::text(serde_json::to_string_pretty(&facets)?));
    }

    Ok(ToolResult::text(format_filter_options(&facets)))
}
