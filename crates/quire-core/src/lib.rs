//! Core library for the Quire test-report template editor.
//!
//! This crate holds everything that is not a user interface: the template
//! document model, its editing operations, the Markdown, Mermaid and Kanban
//! renderers, versioned JSON persistence and the SQLite-backed workspace.
//!
//! # Architecture
//!
//! - **Domain Models** ([`models`]): The template [`Document`], the Kanban
//!   card and the custom block library
//! - **Editing** ([`editor`]): Pure, positional edits returning whether they
//!   applied, including criterion removal with link renumbering
//! - **Renderers** ([`render`]): Pure functions from a document to text
//! - **Persistence** ([`schema`], [`db`], [`workspace`]): Versioned JSON
//!   payloads stored in named slots, with legacy migration on read
//! - **Display Wrappers** ([`display`]): Outlines, listings and status lines
//!   for the CLI and MCP server
//!
//! Edits and renders never fail; only persistence and import/export return
//! errors.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use quire_core::{WorkspaceBuilder, render::render_document};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = WorkspaceBuilder::new()
//!     .with_database_path(Some("quire.db"))
//!     .build()
//!     .await?;
//!
//! workspace
//!     .edit_document(|doc| doc.set_task_name("ACT-1234"))
//!     .await?;
//! workspace
//!     .edit_document(|doc| doc.add_criterion("Report is saved"))
//!     .await?;
//!
//! let document = workspace.load_document().await?;
//! println!("{}", render_document(&document, false));
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod models;
pub mod params;
pub mod render;
pub mod schema;
pub mod store;
pub mod transfer;
pub mod workspace;

// Re-export commonly used types
pub use db::{Database, Slot};
pub use display::{ArchivedTemplates, BlockList, LocalDateTime, OperationStatus, Outline};
pub use error::{QuireError, Result};
pub use models::{BlockLibrary, CustomBlock, Document, KanbanDocument, Step};
pub use render::{render_diagram, render_document, render_markdown};
pub use store::DocumentStore;
pub use workspace::{Edit, Workspace, WorkspaceBuilder};
