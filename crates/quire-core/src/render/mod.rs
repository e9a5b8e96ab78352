//! Pure renderers: Markdown report, Mermaid flowchart and Kanban text.
//!
//! Renderers never fail and never mutate their input. The Markdown renderer
//! receives the diagram description as an input instead of generating it, so
//! callers decide whether a diagram is needed:
//!
//! ```rust
//! use quire_core::{models::Document, render::{render_diagram, render_markdown}};
//!
//! let document = Document::default().with_task_name("ACT-1");
//! let diagram = render_diagram(&document);
//! let markdown = render_markdown(&document, false, Some(&diagram));
//! assert_eq!(markdown, "# ACT-1");
//! ```

pub mod diagram;
pub mod kanban;
pub mod link;
pub mod markdown;
pub mod text;

pub use diagram::{Flowchart, render_diagram};
pub use kanban::KanbanReport;
pub use link::diagram_url;
pub use markdown::{MarkdownReport, render_document, render_markdown};
