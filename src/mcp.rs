//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication.

use crate::error::AppError;
use crate::tools::ToolContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info};

/// Server context for tracking client information
#[derive(Clone, Default)]
pub struct ServerContext {
    pub client_info: Option<ClientInfo>,
}

impl ServerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_client_name(&self) -> String {
        self.client_info
            .as_ref()
            .and_then(|info| info.name.as_ref())
            .cloned()
            .unwrap_or_else(|| "Unknown Client".to_string())
    }
}

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required on the wire but not read
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    #[allow(dead_code)]
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// JSON-RPC 2.0 error codes
pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
/// Server-defined codes, in the -32000..=-32099 range
pub const CATALOG_NOT_FOUND: i64 = -32001;
pub const CATALOG_PARSE_FAILED: i64 = -32002;
pub const CONFIG_ERROR: i64 = -32003;

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
    /// Symbolic reason, e.g. `{"code": "invalid_input"}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    /// Symbolic reason carried in `data.code`, if any
    pub fn reason(&self) -> Option<&str> {
        self.data.as_ref()?.get("code")?.as_str()
    }
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i64, message: &str) -> Self {
        Self::error_with_reason(id, code, message, None)
    }

    /// Create an error response with a symbolic reason in `data.code`
    pub fn error_with_reason(
        id: Option<Value>,
        code: i64,
        message: &str,
        reason: Option<&str>,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.to_string(),
                data: reason.map(|r| serde_json::json!({ "code": r })),
            }),
        }
    }

    /// Create an error response from an application error
    pub fn from_app_error(id: Option<Value>, err: &AppError) -> Self {
        Self::error_with_reason(id, err.rpc_code(), &err.message(), Some(err.error_code()))
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(content)],
        }
    }

    /// Text of the first content item, as printed in CLI mode
    pub fn into_text(self) -> String {
        self.content
            .into_iter()
            .next()
            .map(|c| c.text)
            .unwrap_or_default()
    }
}

impl ContentItem {
    /// Helper to create plain text content
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: content.into(),
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio(tools: &ToolContext) -> Result<()> {
    info!(
        "Starting yhteys MCP server on stdio ({} startups)",
        tools.catalog.len()
    );

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    let mut context = ServerContext::new();

    while let Some(line) = reader.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handle_request(request, &mut context, tools).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::error(None, PARSE_ERROR, &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Handle a single MCP request
async fn handle_request(
    request: McpRequest,
    context: &mut ServerContext,
    tools: &ToolContext,
) -> McpResponse {
    match request.method.as_str() {
        "initialize" => handle_initialize(request, context).await,
        "tools/call" => handle_tool_call(request, tools).await,
        "tools/list" => handle_tools_list(request).await,
        _ => McpResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest, tools: &ToolContext) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id.clone(),
                INVALID_PARAMS,
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    // Tools with no required fields may be called without arguments
    let arguments = match args.arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    match args.name.as_str() {
        "search" => crate::tools::search::handle_search(request.id, arguments, tools).await,
        "suggest" => crate::tools::suggest::handle_suggest(request.id, arguments, tools).await,
        "filters" => crate::tools::filters::handle_filters(request.id, arguments, tools).await,
        _ => McpResponse::error_with_reason(
            request.id,
            INVALID_PARAMS,
            &format!("Tool '{}' not found", args.name),
            Some("tool_not_found"),
        ),
    }
}

/// Handle tools/list method
async fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
async fn handle_initialize(request: McpRequest, context: &mut ServerContext) -> McpResponse {
    if let Some(params) = request.params {
        if let Ok(init_params) = serde_json::from_value::<InitializeParams>(params) {
            context.client_info = init_params.client_info;
        }
    }
    info!("Initialized for {}", context.get_client_name());

    let tools = build_tools_array();
    let result = serde_json::json!({
        "serverInfo": {
            "name": "yhteys",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true }
        },
        "tools": tools
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list and initialize
pub(crate) fn build_tools_array() -> serde_json::Value {
    use crate::cli::{FiltersArgs, SearchArgs, SuggestArgs};
    use schemars::schema_for;

    // Generate JSON schemas from the CLI argument structs
    let search_schema = schema_for!(SearchArgs);
    let suggest_schema = schema_for!(SuggestArgs);
    let filters_schema = schema_for!(FiltersArgs);

    serde_json::json!([
        {
            "name": "search",
            "description": "Fuzzy search startups by name, description, industry, tags and projects, with optional filters",
            "inputSchema": search_schema
        },
        {
            "name": "suggest",
            "description": "List popular search suggestions drawn from the catalog",
            "inputSchema": suggest_schema
        },
        {
            "name": "filters",
            "description": "List the distinct industries, locations, funding stages and tags available as filters",
            "inputSchema": filters_schema
        }
    ])
}
