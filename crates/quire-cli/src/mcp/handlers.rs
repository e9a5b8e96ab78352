//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use quire_core::{
    Document, Edit, OperationStatus, Outline, Workspace, handlers, params as core,
};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// Core parameter types carry `JsonSchema` behind the `schema` feature. The
// transparent wrapper adds the serde and schema plumbing rmcp expects
// without touching the core types.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Render = McpParams<core::Render>;
pub type SetFields = McpParams<core::SetFields>;
pub type Text = McpParams<core::Text>;
pub type Position = McpParams<core::Position>;
pub type MoveEntry = McpParams<core::MoveEntry>;
pub type AddStep = McpParams<core::AddStep>;
pub type EditStep = McpParams<core::EditStep>;
pub type LinkCriteria = McpParams<core::LinkCriteria>;
pub type Diagram = McpParams<core::Diagram>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Turns an edit into a tool result.
///
/// Rejected edits are tool-level errors (`is_error`), not protocol errors:
/// the call was well-formed but addressed nothing.
fn edit_result(edit: &Edit<Document>, action: &str) -> McpResult {
    let status = OperationStatus::for_edit(edit.applied, action);
    let content = vec![Content::text(status.to_string())];
    if edit.applied {
        Ok(CallToolResult::success(content))
    } else {
        Ok(CallToolResult::error(content))
    }
}

/// Handler implementations for the MCP server
///
/// The workspace sits behind a mutex so that concurrent tool calls apply
/// their load-edit-save cycles one at a time.
pub struct McpHandlers {
    workspace: Arc<Mutex<Workspace>>,
}

impl McpHandlers {
    pub fn new(workspace: Arc<Mutex<Workspace>>) -> Self {
        Self { workspace }
    }

    pub async fn show_template(&self, Parameters(params): Parameters<Render>) -> McpResult {
        debug!("show_template: {params:?}");

        let workspace = self.workspace.lock().await;
        let markdown = handlers::handle_show_template(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to render template", &e))?;

        let text = if markdown.is_empty() {
            "The template is empty.".to_string()
        } else {
            markdown
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub async fn show_outline(&self) -> McpResult {
        debug!("show_outline");

        let workspace = self.workspace.lock().await;
        let document = handlers::handle_show_outline(&workspace)
            .await
            .map_err(|e| to_mcp_error("Failed to load template", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            Outline(&document).to_string(),
        )]))
    }

    pub async fn set_fields(&self, Parameters(params): Parameters<SetFields>) -> McpResult {
        debug!("set_fields: {params:?}");

        let workspace = self.workspace.lock().await;
        let edit = handlers::handle_set_fields(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update template fields", &e))?;
        edit_result(&edit, "Updated template fields")
    }

    pub async fn add_criterion(&self, Parameters(params): Parameters<Text>) -> McpResult {
        debug!("add_criterion: {params:?}");

        let workspace = self.workspace.lock().await;
        let edit = handlers::handle_add_criterion(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add criterion", &e))?;
        let position = edit.model.criteria.len().saturating_sub(1);
        edit_result(&edit, &format!("Added criterion at position {position}"))
    }

    pub async fn remove_criterion(&self, Parameters(params): Parameters<Position>) -> McpResult {
        debug!("remove_criterion: {params:?}");

        let workspace = self.workspace.lock().await;
        let index = params.as_ref().index;
        let edit = handlers::handle_remove_criterion(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove criterion", &e))?;
        edit_result(
            &edit,
            &format!("Removed criterion {index}; step links were renumbered"),
        )
    }

    pub async fn add_step(&self, Parameters(params): Parameters<AddStep>) -> McpResult {
        debug!("add_step: {params:?}");

        let workspace = self.workspace.lock().await;
        let edit = handlers::handle_add_step(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;
        let position = edit.model.steps.len().saturating_sub(1);
        edit_result(&edit, &format!("Added step at position {position}"))
    }

    pub async fn add_divider(&self) -> McpResult {
        debug!("add_divider");

        let workspace = self.workspace.lock().await;
        let edit = handlers::handle_add_divider(&workspace)
            .await
            .map_err(|e| to_mcp_error("Failed to add divider", &e))?;
        edit_result(&edit, "Added stage divider")
    }

    pub async fn edit_step(&self, Parameters(params): Parameters<EditStep>) -> McpResult {
        debug!("edit_step: {params:?}");

        let workspace = self.workspace.lock().await;
        let index = params.as_ref().index;
        let edit = handlers::handle_edit_step(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to edit step", &e))?;
        edit_result(&edit, &format!("Updated step {index}"))
    }

    pub async fn link_criteria(&self, Parameters(params): Parameters<LinkCriteria>) -> McpResult {
        debug!("link_criteria: {params:?}");

        let workspace = self.workspace.lock().await;
        let index = params.as_ref().index;
        let edit = handlers::handle_link_criteria(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to link criteria", &e))?;
        edit_result(&edit, &format!("Updated criteria links of step {index}"))
    }

    pub async fn move_step(&self, Parameters(params): Parameters<MoveEntry>) -> McpResult {
        debug!("move_step: {params:?}");

        let workspace = self.workspace.lock().await;
        let core::MoveEntry { from, to } = *params.as_ref();
        let edit = handlers::handle_move_step(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to move step", &e))?;
        edit_result(&edit, &format!("Moved step {from} to {to}"))
    }

    pub async fn remove_step(&self, Parameters(params): Parameters<Position>) -> McpResult {
        debug!("remove_step: {params:?}");

        let workspace = self.workspace.lock().await;
        let index = params.as_ref().index;
        let edit = handlers::handle_remove_step(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove step", &e))?;
        edit_result(&edit, &format!("Removed step {index}"))
    }

    pub async fn add_attention_comment(&self, Parameters(params): Parameters<Text>) -> McpResult {
        debug!("add_attention_comment: {params:?}");

        let workspace = self.workspace.lock().await;
        let edit = handlers::handle_add_attention_comment(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add attention comment", &e))?;
        edit_result(&edit, "Added attention comment")
    }

    pub async fn render_diagram(&self, Parameters(params): Parameters<Diagram>) -> McpResult {
        debug!("render_diagram: {params:?}");

        let workspace = self.workspace.lock().await;
        let output = handlers::handle_render_diagram(&workspace, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to render diagram", &e))?;
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    pub async fn archive_template(&self) -> McpResult {
        debug!("archive_template");

        let workspace = self.workspace.lock().await;
        let edit = handlers::handle_archive_template(&workspace)
            .await
            .map_err(|e| to_mcp_error("Failed to archive template", &e))?;
        if !edit.applied {
            return Ok(CallToolResult::error(vec![Content::text(
                OperationStatus::failure("Nothing to archive: the template is empty").to_string(),
            )]));
        }
        edit_result(
            &edit,
            &format!(
                "Archived template; the archive now holds {} templates",
                edit.model.archived.len()
            ),
        )
    }
}
