//! Data models for templates, Kanban cards and reusable blocks.
//!
//! This module contains the domain types edited by [`crate::editor`] and
//! consumed by [`crate::render`]. All models serialize with camelCase field
//! names and default every missing field, so partially written payloads
//! still decode. Versioning and the legacy key layout are handled separately
//! by [`crate::schema`].
//!
//! # Cross-references
//!
//! Steps reference acceptance criteria by **position** in
//! [`Document::criteria`]. Positions stay valid until the criteria list is
//! mutated; removal goes through [`crate::editor::relink`], which rewrites
//! every step in the same update. Reordering criteria does not remap links.
//!
//! # Examples
//!
//! ```rust
//! use quire_core::models::{Document, Step};
//!
//! let mut document = Document::default().with_task_name("ACT-1");
//! document.criteria = vec!["A".to_string(), "B".to_string()];
//! document.steps.push(Step::new("do X").with_links([1]));
//!
//! assert_eq!(document.step_count(), 1);
//! ```

pub mod block;
pub mod document;
pub mod environment;
pub mod id;
pub mod kanban;
pub(crate) mod lenient;
pub mod sections;
pub mod step;


pub use block::{BlockLibrary, BlockStep, CustomBlock};
pub use document::Document;
pub use environment::{Browser, BrowsersTested, DatabaseTarget, DatabasesTested, Encoding};
pub use id::ItemId;
pub use kanban::{KanbanDocument, KanbanField, KanbanStep};
pub use sections::{CodeBlock, CodeLanguage, ExternalLink, PreparationGroup, PreparationStep};
pub use step::{DIVIDER_LABEL, Step};
