//! Core handler functions shared by the CLI and the MCP server.
//!
//! Each handler wraps one complete workflow (validate parameters, run the
//! edit against the workspace, return the result) so that both interfaces
//! behave identically:
//!
//! ```text
//! Interface → Handler → Workspace → Editor/Renderer → Models
//! ```
//!
//! ## Handler Patterns
//!
//! ### Query Handlers
//! Return rendered text or the loaded document:
//! ```text
//! pub async fn handle_show_template(workspace: &Workspace, params: &Render) -> Result<String>
//! ```
//!
//! ### Edit Handlers
//! Return the [`Edit`] so the interface can report whether it applied:
//! ```text
//! pub async fn handle_add_criterion(workspace: &Workspace, params: &Text) -> Result<Edit<Document>>
//! ```
//!
//! Validation failures (unknown language, unknown environment, empty field
//! update) are errors; rejected edits are not.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use quire_core::{handlers::handle_add_criterion, params::Text, WorkspaceBuilder, OperationStatus};
//! # async {
//! let workspace = WorkspaceBuilder::new().build().await?;
//! let params = Text { text: "Report is saved".to_string() };
//! let edit = handle_add_criterion(&workspace, &params).await?;
//! println!("{}", OperationStatus::for_edit(edit.applied, "Added criterion"));
//! # Result::<(), quire_core::QuireError>::Ok(())
//! # };
//! ```

use crate::{
    Result,
    error::QuireError,
    models::Document,
    params::{
        AddLink, AddStep, CodeBlockParams, Diagram, EditStep, EditText, Environment,
        LinkCriteria, MoveEntry, Position, Render, SetFields, Text,
    },
    render::{diagram_url, render_diagram, render_document},
    workspace::{Edit, Workspace},
};

/// Handle rendering the live template as Markdown.
pub async fn handle_show_template(workspace: &Workspace, params: &Render) -> Result<String> {
    let document = workspace.load_document().await?;
    Ok(render_document(&document, params.preview))
}

/// Handle loading the live template for an outline.
pub async fn handle_show_outline(workspace: &Workspace) -> Result<Document> {
    workspace.load_document().await
}

/// Handle updating scalar template fields.
///
/// # Errors
///
/// * `QuireError::InvalidInput` - When no field was provided
pub async fn handle_set_fields(workspace: &Workspace, params: &SetFields) -> Result<Edit<Document>> {
    if params.is_empty() {
        return Err(QuireError::invalid_input("fields")
            .with_reason("Provide at least one of task_name, scope, impact or make_diagram_available"));
    }
    let params = params.clone();
    workspace
        .edit_document(move |doc| params.apply(doc))
        .await
}

pub async fn handle_add_criterion(workspace: &Workspace, params: &Text) -> Result<Edit<Document>> {
    let text = params.text.clone();
    workspace
        .edit_document(move |doc| doc.add_criterion(&text))
        .await
}

pub async fn handle_edit_criterion(
    workspace: &Workspace,
    params: &EditText,
) -> Result<Edit<Document>> {
    let EditText { index, text } = params.clone();
    workspace
        .edit_document(move |doc| doc.update_criterion(index, &text))
        .await
}

/// Handle removing a criterion.
///
/// Step links pointing past the removed criterion shift down by one; links
/// to the removed criterion are dropped.
pub async fn handle_remove_criterion(
    workspace: &Workspace,
    params: &Position,
) -> Result<Edit<Document>> {
    let index = params.index;
    workspace
        .edit_document(move |doc| doc.remove_criterion_and_relink(index))
        .await
}

pub async fn handle_move_criterion(
    workspace: &Workspace,
    params: &MoveEntry,
) -> Result<Edit<Document>> {
    let MoveEntry { from, to } = *params;
    workspace
        .edit_document(move |doc| doc.move_criterion(from, to))
        .await
}

pub async fn handle_add_step(workspace: &Workspace, params: &AddStep) -> Result<Edit<Document>> {
    let params = params.clone();
    workspace.edit_document(move |doc| params.apply(doc)).await
}

pub async fn handle_add_divider(workspace: &Workspace) -> Result<Edit<Document>> {
    workspace.edit_document(|doc| doc.add_divider()).await
}

pub async fn handle_edit_step(workspace: &Workspace, params: &EditStep) -> Result<Edit<Document>> {
    let params = params.clone();
    workspace.edit_document(move |doc| params.apply(doc)).await
}

pub async fn handle_link_criteria(
    workspace: &Workspace,
    params: &LinkCriteria,
) -> Result<Edit<Document>> {
    let LinkCriteria { index, criteria } = params.clone();
    workspace
        .edit_document(move |doc| doc.link_criteria(index, criteria))
        .await
}

pub async fn handle_move_step(workspace: &Workspace, params: &MoveEntry) -> Result<Edit<Document>> {
    let MoveEntry { from, to } = *params;
    workspace
        .edit_document(move |doc| doc.move_step(from, to))
        .await
}

pub async fn handle_remove_step(
    workspace: &Workspace,
    params: &Position,
) -> Result<Edit<Document>> {
    let index = params.index;
    workspace
        .edit_document(move |doc| doc.remove_step(index))
        .await
}

pub async fn handle_add_attention_comment(
    workspace: &Workspace,
    params: &Text,
) -> Result<Edit<Document>> {
    let text = params.text.clone();
    workspace
        .edit_document(move |doc| doc.add_attention_comment(&text))
        .await
}

pub async fn handle_remove_attention_comment(
    workspace: &Workspace,
    params: &Position,
) -> Result<Edit<Document>> {
    let index = params.index;
    workspace
        .edit_document(move |doc| doc.remove_attention_comment(index))
        .await
}

/// Handle appending a code block.
///
/// # Errors
///
/// * `QuireError::InvalidInput` - When the language is not recognized
pub async fn handle_add_code_block(
    workspace: &Workspace,
    params: &CodeBlockParams,
) -> Result<Edit<Document>> {
    let language = params.validate()?;
    let CodeBlockParams { title, code, .. } = params.clone();
    workspace
        .edit_document(move |doc| doc.add_code_block(&title, language, &code))
        .await
}

pub async fn handle_add_external_link(
    workspace: &Workspace,
    params: &AddLink,
) -> Result<Edit<Document>> {
    let AddLink { title, url } = params.clone();
    workspace
        .edit_document(move |doc| doc.add_external_link(&title, &url))
        .await
}

/// Handle ticking or unticking a browser or database checkbox.
///
/// # Errors
///
/// * `QuireError::InvalidInput` - When the target name is unknown
pub async fn handle_set_environment(
    workspace: &Workspace,
    params: &Environment,
) -> Result<Edit<Document>> {
    let target = params.validate()?;
    let params = params.clone();
    workspace
        .edit_document(move |doc| params.apply(target, doc))
        .await
}

/// Handle rendering the step flowchart.
///
/// Returns the Mermaid source, or the hosted diagram URL when
/// `params.link` is set.
///
/// # Errors
///
/// * `QuireError::Configuration` - When the diagram cannot be encoded for
///   the hosted link
pub async fn handle_render_diagram(workspace: &Workspace, params: &Diagram) -> Result<String> {
    let document = workspace.load_document().await?;
    let diagram = render_diagram(&document);
    if !params.link {
        return Ok(diagram);
    }
    diagram_url(&diagram).ok_or_else(|| QuireError::Configuration {
        message: "Failed to encode diagram link".to_string(),
    })
}

/// Handle archiving the live template.
///
/// A blank template is not archived.
pub async fn handle_archive_template(workspace: &Workspace) -> Result<Edit<Document>> {
    workspace.edit_document(|doc| doc.archive_current()).await
}

pub async fn handle_restore_archived(
    workspace: &Workspace,
    params: &Position,
) -> Result<Edit<Document>> {
    let index = params.index;
    workspace
        .edit_document(move |doc| doc.restore_archived(index))
        .await
}

pub async fn handle_remove_archived(
    workspace: &Workspace,
    params: &Position,
) -> Result<Edit<Document>> {
    let index = params.index;
    workspace
        .edit_document(move |doc| doc.remove_archived(index))
        .await
}
