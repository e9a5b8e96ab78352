//! MCP server implementation for Quire
//!
//! Exposes the template editor to AI assistants over the Model Context
//! Protocol. Every tool edits or renders the same live template the CLI
//! works on.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use quire_core::Workspace;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddStep, Diagram, EditStep, LinkCriteria, McpResult, MoveEntry, Position, Render, SetFields,
    Text,
};

/// MCP server for Quire
#[derive(Clone)]
pub struct QuireMcpServer {
    workspace: Arc<Mutex<Workspace>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl QuireMcpServer {
    /// Create a new Quire MCP server
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(workspace)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.workspace.clone())
    }

    #[tool(
        name = "show_template",
        description = "Render the current test-report template as Markdown, exactly as it would be pasted into a ticket. Set preview=true to add a separator after the title. Sections with no content are omitted."
    )]
    async fn show_template(&self, params: Parameters<Render>) -> McpResult {
        self.handlers().show_template(params).await
    }

    #[tool(
        name = "show_outline",
        description = "List every section of the template with the 0-based positions used by the editing tools: criteria, steps (with critical flag and linked criteria), preparations, code blocks, comments, links and environment. Call this before editing by position."
    )]
    async fn show_outline(&self) -> McpResult {
        self.handlers().show_outline().await
    }

    #[tool(
        name = "set_fields",
        description = "Update the scalar fields of the template: task_name (report title), scope, impact (one bullet per line) and make_diagram_available (embed a hosted flowchart link). Only the fields provided are changed."
    )]
    async fn set_fields(&self, params: Parameters<SetFields>) -> McpResult {
        self.handlers().set_fields(params).await
    }

    #[tool(
        name = "add_criterion",
        description = "Append an acceptance criterion. Blank text is rejected. Returns the 0-based position of the new criterion for use with link_criteria."
    )]
    async fn add_criterion(&self, params: Parameters<Text>) -> McpResult {
        self.handlers().add_criterion(params).await
    }

    #[tool(
        name = "remove_criterion",
        description = "Remove the acceptance criterion at a 0-based position. Steps linked to it lose that link, and links to later criteria are renumbered so they keep pointing at the same text."
    )]
    async fn remove_criterion(&self, params: Parameters<Position>) -> McpResult {
        self.handlers().remove_criterion(params).await
    }

    #[tool(
        name = "add_step",
        description = "Append a test step. Provide the instruction text, optionally critical=true, and optionally the 0-based criteria positions the step verifies. The step is rejected if any criterion does not exist."
    )]
    async fn add_step(&self, params: Parameters<AddStep>) -> McpResult {
        self.handlers().add_step(params).await
    }

    #[tool(
        name = "add_divider",
        description = "Append a stage divider to the test steps. Dividers split the procedure into numbered stages (1ª Etapa, 2ª Etapa, ...) and are not counted as steps."
    )]
    async fn add_divider(&self) -> McpResult {
        self.handlers().add_divider().await
    }

    #[tool(
        name = "edit_step",
        description = "Change the text and/or critical flag of the step at a 0-based position. Omitted fields keep their current value. Dividers cannot be edited."
    )]
    async fn edit_step(&self, params: Parameters<EditStep>) -> McpResult {
        self.handlers().edit_step(params).await
    }

    #[tool(
        name = "link_criteria",
        description = "Replace the set of acceptance criteria linked to a step. Positions are 0-based; an empty list clears the links. Steps linked to two or more criteria are highlighted in the flowchart."
    )]
    async fn link_criteria(&self, params: Parameters<LinkCriteria>) -> McpResult {
        self.handlers().link_criteria(params).await
    }

    #[tool(
        name = "move_step",
        description = "Move the step at 0-based position `from` so that it ends up at position `to`. Links to criteria move with the step."
    )]
    async fn move_step(&self, params: Parameters<MoveEntry>) -> McpResult {
        self.handlers().move_step(params).await
    }

    #[tool(
        name = "remove_step",
        description = "Remove the step or divider at a 0-based position."
    )]
    async fn remove_step(&self, params: Parameters<Position>) -> McpResult {
        self.handlers().remove_step(params).await
    }

    #[tool(
        name = "add_attention_comment",
        description = "Append a warning rendered as a block quote near the top of the report. Blank text is rejected."
    )]
    async fn add_attention_comment(&self, params: Parameters<Text>) -> McpResult {
        self.handlers().add_attention_comment(params).await
    }

    #[tool(
        name = "render_diagram",
        description = "Render the test steps as a Mermaid flowchart. Set link=true to get the hosted SVG URL instead of the Mermaid source."
    )]
    async fn render_diagram(&self, params: Parameters<Diagram>) -> McpResult {
        self.handlers().render_diagram(params).await
    }

    #[tool(
        name = "archive_template",
        description = "Move the current template into the archive and start a blank one. Empty templates are not archived. Archived templates can be restored from the CLI."
    )]
    async fn archive_template(&self) -> McpResult {
        self.handlers().archive_template().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for QuireMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "quire".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"Quire edits a single QA test-report template and renders it as Markdown for a ticket.

## Core Concepts
- **Criteria**: Acceptance criteria, addressed by 0-based position
- **Steps**: The test procedure. Steps may be critical and may link to criteria; dividers split steps into stages
- **Archive**: Completed templates moved out of the editor

## Workflow
1. Call `show_outline` to see positions
2. Set the title and scope with `set_fields`
3. Add criteria with `add_criterion`, then steps with `add_step` (link criteria by position)
4. Review the result with `show_template`
5. Archive the finished report with `archive_template`

## Notes
- Positions shift after removals; call `show_outline` again before editing by position
- Removing a criterion renumbers step links automatically
- Rejected edits (out-of-range positions, blank text) change nothing and return an error result"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: QuireMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Quire MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
