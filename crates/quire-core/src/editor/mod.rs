//! Editing operations over the document model.
//!
//! Every operation is a method on the model it edits and returns `true`
//! when it changed the model, `false` when it was rejected. Rejections
//! cover out-of-range positions, blank text where text is required, and
//! edits that would break a model invariant (for example linking a divider
//! to a criterion). Rejected operations leave the model exactly as it was.
//!
//! Operations are meant to run inside [`DocumentStore::update`], which turns
//! one applied operation into exactly one whole-document replacement:
//!
//! ```rust
//! use quire_core::{models::Document, store::DocumentStore};
//!
//! let mut store = DocumentStore::new(Document::default());
//! assert!(store.update(|doc| doc.add_criterion("Login works")));
//! assert!(!store.update(|doc| doc.remove_step(3)));
//! assert_eq!(store.document().criteria.len(), 1);
//! ```
//!
//! [`DocumentStore::update`]: crate::store::DocumentStore::update

mod archive;
mod criteria;
mod fields;
mod kanban;
pub mod list;
mod preparations;
pub mod relink;
mod sections;
mod steps;
