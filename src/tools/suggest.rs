//! Suggest tool implementation
//!
//! Implements the `suggest()` MCP tool: popular industries and tags
//! followed by the editorial suggestions.

use super::{bullet_list, parse_args, respond, ToolContext};
use crate::cli::SuggestArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use serde_json::Value;
use tracing::debug;

/// Handle suggest tool call (MCP)
pub async fn handle_suggest(id: Option<Value>, args: Value, ctx: &ToolContext) -> McpResponse {
    let result = parse_args(args).and_then(|args| execute_suggest(ctx, args));
    respond(id, result)
}

/// Shared implementation for suggest (used by MCP and CLI)
pub fn execute_suggest(ctx: &ToolContext, args: SuggestArgs) -> Result<ToolResult, AppError> {
    let suggestions = ctx.cache.suggestions(&ctx.catalog);
    debug!("{} suggestions from {} startups", suggestions.len(), ctx.catalog.len());

    if args.json {
        return Ok(ToolResult::text(serde_json::to_string_pretty(&suggestions)?));
    }

    let mut md = String::from("# Popular Searches\n\n");
    md.push_str(&bullet_list(&suggestions));
    Ok(ToolResult::text(md))
}
