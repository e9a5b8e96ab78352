//! Display wrappers for terminal and MCP output.
//!
//! The renderers in [`crate::render`] produce the report itself. This module
//! formats everything around it: the positional outline used to address
//! entries, archive and block listings, and operation status lines.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Display Wrappers│    │   Formatted     │
//! │ (Document, ...) │───▶│ (Outline, ...)  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`outline`]: Positional outline of a template (Outline)
//! - [`collections`]: Archive and block listings (ArchivedTemplates, BlockList)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for model enums
//!
//! ## Usage Examples
//!
//! ```rust
//! use quire_core::display::OperationStatus;
//!
//! let applied = OperationStatus::for_edit(true, "Added criterion");
//! assert_eq!(applied.to_string(), "Success: Added criterion\n");
//!
//! let rejected = OperationStatus::for_edit(false, "Added criterion");
//! assert!(rejected.to_string().starts_with("Error:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod outline;
pub mod status;

pub use collections::{ArchivedTemplates, BlockList};
pub use datetime::LocalDateTime;
pub use outline::Outline;
pub use status::OperationStatus;
