//! MCP tools implementation
//!
//! Each tool has a synchronous `execute_*` shared by the CLI and the MCP
//! server, and an async `handle_*` that wraps it into a JSON-RPC response.

pub mod filters;
pub mod search;
pub mod suggest;

use crate::cache::FacetCache;
use crate::catalog::Catalog;
use crate::cli::CatalogArgs;
use crate::config::SearchConfig;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::search::SearchEngine;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

/// Everything a tool call needs: the catalog it searches, the engine
/// built from the configured scoring table, and the facet cache.
#[derive(Debug)]
pub struct ToolContext {
    pub catalog: Catalog,
    pub engine: SearchEngine,
    pub cache: FacetCache,
    pub config: SearchConfig,
}

impl ToolContext {
    pub fn new(catalog: Catalog, config: SearchConfig) -> Self {
        Self {
            catalog,
            engine: SearchEngine::with_config(config.scoring.clone()),
            cache: FacetCache::new(),
            config,
        }
    }

    /// Resolve the catalog from command-line overrides, falling back to
    /// the configured path and demo setting
    pub fn resolve(config: SearchConfig, args: &CatalogArgs) -> Result<Self, AppError> {
        let path = args.catalog.as_deref().or(config.catalog_path.as_deref());
        let catalog = Catalog::resolve(path, args.include_demo(config.include_demo))?;
        info!("Loaded catalog with {} startups", catalog.len());
        Ok(Self::new(catalog, config))
    }
}

/// Deserialize MCP tool arguments into a CLI argument struct
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, AppError> {
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))
}

/// Wrap a tool outcome into a JSON-RPC response
pub(crate) fn respond(id: Option<Value>, result: Result<ToolResult, AppError>) -> McpResponse {
    match result.and_then(|content| serde_json::to_value(content).map_err(AppError::from)) {
        Ok(value) => McpResponse::success(id, value),
        Err(e) => McpResponse::from_app_error(id, &e),
    }
}

/// Render a list as markdown bullets, or a placeholder when empty.
/// Empty strings get a visible `_(blank)_` marker.
pub(crate) fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "_none_\n".to_string();
    }
    items
        .iter()
        .map(|item| match item.as_str() {
            "" => "- _(blank)_\n".to_string(),
            text => format!("- {}\n", text),
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn demo_context() -> ToolContext {
    ToolContext::new(Catalog::demo().unwrap(), SearchConfig::default())
}
