//! Error types and handling for the search CLI and MCP server
//!
//! The search core itself never fails; these cover catalog loading,
//! configuration and argument validation at the outer surfaces.

use crate::catalog::CatalogError;
use crate::mcp;
use serde::Serialize;
use std::fmt;

/// Maximum accepted query length, in characters
pub const MAX_QUERY_LEN: usize = 500;

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    CatalogNotFound(String),
    CatalogParseFailed(String),
    ConfigError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::CatalogNotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::CatalogParseFailed(msg) => write!(f, "Catalog parse failed: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Symbolic error code, sent as `data.code` in MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::CatalogNotFound(_) => "not_found",
            AppError::CatalogParseFailed(_) => "catalog_parse_failed",
            AppError::ConfigError(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Numeric JSON-RPC error code for MCP responses
    pub fn rpc_code(&self) -> i64 {
        match self {
            AppError::InvalidInput(_) => mcp::INVALID_PARAMS,
            AppError::CatalogNotFound(_) => mcp::CATALOG_NOT_FOUND,
            AppError::CatalogParseFailed(_) => mcp::CATALOG_PARSE_FAILED,
            AppError::ConfigError(_) => mcp::CONFIG_ERROR,
            AppError::Internal(_) => mcp::INTERNAL_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Process exit code for CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::CatalogNotFound(_) => 3,
            _ => 5,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::CatalogNotFound(err.to_string()),
            CatalogError::Parse(_) | CatalogError::Shape => {
                AppError::CatalogParseFailed(err.to_string())
            }
            CatalogError::Io { .. } => AppError::Internal(err.to_string()),
        }
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert std::io::Error to AppError
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Validation functions
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
    }

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::InvalidInput(format!(
            "Query too long, maximum {} characters",
            MAX_QUERY_LEN
        )));
    }

    Ok(())
}

pub fn validate_threshold(threshold: Option<f64>) -> Result<(), AppError> {
    match threshold {
        Some(t) if !t.is_finite() || !(0.0..=100.0).contains(&t) => Err(AppError::InvalidInput(
            format!("Threshold must be between 0 and 100, got {}", t),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_query() {
        assert!(validate_query("ai platform").is_ok());
        assert!(matches!(validate_query(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_query("   "), Err(AppError::InvalidInput(_))));
        assert!(validate_query(&"a".repeat(MAX_QUERY_LEN)).is_ok());
        assert!(validate_query(&"a".repeat(MAX_QUERY_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(None).is_ok());
        assert!(validate_threshold(Some(0.0)).is_ok());
        assert!(validate_threshold(Some(100.0)).is_ok());
        assert!(validate_threshold(Some(-1.0)).is_err());
        assert!(validate_threshold(Some(100.5)).is_err());
        assert!(validate_threshold(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_error_codes_and_exit_codes() {
        let err = AppError::InvalidInput("x".into());
        assert_eq!(err.error_code(), "invalid_input");
        assert_eq!(err.rpc_code(), -32602);
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.message(), "Invalid input: x");

        let err: AppError = CatalogError::NotFound(PathBuf::from("/tmp/none.json")).into();
        assert_eq!(err.error_code(), "not_found");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_catalog_parse_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = CatalogError::Parse(parse).into();
        assert_eq!(err.error_code(), "catalog_parse_failed");
        assert_eq!(err.rpc_code(), -32002);
        assert_eq!(err.exit_code(), 5);
    }
}
