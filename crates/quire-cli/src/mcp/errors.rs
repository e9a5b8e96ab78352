//! Error handling utilities for MCP server

use quire_core::QuireError;
use rmcp::ErrorData;

/// Helper to convert core errors to MCP errors
///
/// Validation failures become `invalid_params` so the client can correct
/// the call; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &QuireError) -> ErrorData {
    match error {
        QuireError::InvalidInput { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}
