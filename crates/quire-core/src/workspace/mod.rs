//! Async workspace API over the persisted slots.
//!
//! The [`Workspace`] is the entry point used by the CLI and the MCP server.
//! Every call opens the SQLite database on tokio's blocking pool, performs
//! its work and returns; nothing is cached between calls.
//!
//! Edits follow the same path regardless of the model being edited:
//!
//! ```text
//! load slot ──▶ DocumentStore ──▶ operation ──▶ subscriber saves slot
//! ```
//!
//! The persisting subscriber only fires when the operation reports a
//! change, so rejected edits never touch the database.
//!
//! # Examples
//!
//! ```rust,no_run
//! use quire_core::WorkspaceBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = WorkspaceBuilder::new()
//!     .with_database_path(Some("quire.db"))
//!     .build()
//!     .await?;
//!
//! let edit = workspace
//!     .edit_document(|doc| doc.add_criterion("Login works"))
//!     .await?;
//! assert!(edit.applied);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod builder;
pub mod document_ops;
pub mod slot_ops;

pub use builder::WorkspaceBuilder;
pub use slot_ops::Edit;

/// Handle to a quire database file.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub(crate) db_path: PathBuf,
}

impl Workspace {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the backing database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }
}
