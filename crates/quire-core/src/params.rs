//! Parameter structures for quire operations
//!
//! Shared parameter structures used by every interface (CLI, MCP) without
//! framework-specific derives. Interface layers wrap these types, add their
//! own derives and convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schema generation is behind the `schema` feature so that only the
//! MCP server pays for it.
//!
//! Positions are always 0-based here; the rendered report numbers criteria
//! from 1.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{QuireError, Result},
    models::{Browser, CodeLanguage, DatabaseTarget, Document, KanbanField},
};

/// Generic parameters for operations addressing a single entry.
///
/// Used for removals, archive restores and similar calls.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Position {
    /// 0-based position of the entry
    pub index: usize,
}

/// Parameters for reordering entries within one collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveEntry {
    /// Current 0-based position
    pub from: usize,
    /// Target 0-based position; the entry ends up exactly there
    pub to: usize,
}

/// Parameters carrying a single line of text (criteria, comments).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Text {
    /// Text to store; surrounding whitespace is trimmed and blank text is
    /// rejected
    pub text: String,
}

/// Parameters for replacing the text at a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditText {
    /// 0-based position of the entry
    pub index: usize,
    /// Replacement text
    pub text: String,
}

/// Parameters for updating the scalar template fields.
///
/// Only the fields provided are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetFields {
    /// Task identifier, used as the report title
    pub task_name: Option<String>,
    /// What is being tested
    pub scope: Option<String>,
    /// Expected impact; one bullet per line
    pub impact: Option<String>,
    /// Whether the report embeds a hosted flowchart link
    pub make_diagram_available: Option<bool>,
}

impl SetFields {
    /// Whether no field was provided.
    pub fn is_empty(&self) -> bool {
        self.task_name.is_none()
            && self.scope.is_none()
            && self.impact.is_none()
            && self.make_diagram_available.is_none()
    }

    /// Applies the provided fields to `document`.
    ///
    /// Returns whether at least one field was provided.
    pub fn apply(&self, document: &mut Document) -> bool {
        if let Some(task_name) = &self.task_name {
            document.set_task_name(task_name);
        }
        if let Some(scope) = &self.scope {
            document.set_scope(scope);
        }
        if let Some(impact) = &self.impact {
            document.set_impact(impact);
        }
        if let Some(enabled) = self.make_diagram_available {
            document.set_make_diagram_available(enabled);
        }
        !self.is_empty()
    }
}

/// Parameters for appending a test step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddStep {
    /// Instruction text of the step
    pub text: String,
    /// Mark the step as critical
    #[serde(default)]
    pub critical: bool,
    /// 0-based criteria positions the step verifies
    #[serde(default)]
    pub criteria: Vec<usize>,
}

impl AddStep {
    /// Appends the step and links its criteria in one edit.
    ///
    /// The step is not added when any linked criterion does not exist.
    pub fn apply(&self, document: &mut Document) -> bool {
        if self.criteria.iter().any(|&c| c >= document.criteria.len()) {
            return false;
        }
        if !document.add_step(&self.text, self.critical) {
            return false;
        }
        let index = document.steps.len() - 1;
        document.link_criteria(index, self.criteria.iter().copied())
    }
}

/// Parameters for editing an existing test step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditStep {
    /// 0-based position of the step
    pub index: usize,
    /// Replacement text; keeps the current text when omitted
    pub text: Option<String>,
    /// New critical flag; keeps the current flag when omitted
    pub critical: Option<bool>,
}

impl EditStep {
    pub fn apply(&self, document: &mut Document) -> bool {
        let Some(step) = document.steps.get(self.index) else {
            return false;
        };
        let text = self.text.clone().unwrap_or_else(|| step.text.clone());
        let critical = self.critical.unwrap_or(step.is_critical);
        document.edit_step(self.index, &text, critical)
    }
}

/// Parameters for replacing the criteria linked to a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LinkCriteria {
    /// 0-based position of the step
    pub index: usize,
    /// 0-based criteria positions; an empty list clears the links
    #[serde(default)]
    pub criteria: Vec<usize>,
}

/// Parameters for adding or editing a code block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CodeBlockParams {
    /// Bold caption above the block; may be empty
    #[serde(default)]
    pub title: String,
    /// Fence language (sql, javascript, typescript, json, ...)
    #[serde(default)]
    pub language: Option<String>,
    /// Code content; blank code is rejected
    pub code: String,
}

impl CodeBlockParams {
    /// Parses the fence language, defaulting to plain text.
    ///
    /// # Errors
    ///
    /// * `QuireError::InvalidInput` - When the language is not recognized
    pub fn validate(&self) -> Result<CodeLanguage> {
        match &self.language {
            None => Ok(CodeLanguage::default()),
            Some(language) => CodeLanguage::from_str(language)
                .map_err(|reason| QuireError::invalid_input("language").with_reason(reason)),
        }
    }
}

/// Parameters for adding an auxiliary link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddLink {
    /// Link text; falls back to the URL when blank
    #[serde(default)]
    pub title: String,
    /// Link target
    pub url: String,
}

/// Which environment checkbox an [`Environment`] update addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentTarget {
    Browser(Browser),
    Database(DatabaseTarget),
}

/// Parameters for ticking or unticking an environment checkbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Environment {
    /// Browser (chrome, edge) or database (sqlserver, oracle-iso, postgres,
    /// oracle-utf)
    pub target: String,
    /// Whether the target was tested
    #[serde(default = "default_tested")]
    pub tested: bool,
}

fn default_tested() -> bool {
    true
}

impl Environment {
    /// Resolves the target name to a browser or database.
    ///
    /// # Errors
    ///
    /// * `QuireError::InvalidInput` - When the name matches neither
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quire_core::{models::Browser, params::{Environment, EnvironmentTarget}};
    ///
    /// let params = Environment { target: "Chrome".to_string(), tested: true };
    /// assert_eq!(params.validate()?, EnvironmentTarget::Browser(Browser::Chrome));
    ///
    /// let params = Environment { target: "mysql".to_string(), tested: true };
    /// assert!(params.validate().is_err());
    /// # Result::<(), quire_core::QuireError>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<EnvironmentTarget> {
        if let Ok(browser) = Browser::from_str(&self.target) {
            return Ok(EnvironmentTarget::Browser(browser));
        }
        DatabaseTarget::from_str(&self.target)
            .map(EnvironmentTarget::Database)
            .map_err(|_| {
                QuireError::invalid_input("target").with_reason(format!(
                    "Unknown environment '{}'. Expected chrome, edge, sqlserver, oracle-iso, postgres or oracle-utf",
                    self.target
                ))
            })
    }

    pub fn apply(&self, target: EnvironmentTarget, document: &mut Document) -> bool {
        match target {
            EnvironmentTarget::Browser(browser) => document.set_browser(browser, self.tested),
            EnvironmentTarget::Database(database) => document.set_database(database, self.tested),
        }
    }
}

/// Parameters for rendering the Markdown report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Render {
    /// Add a separator after the title, as in the on-screen preview
    #[serde(default)]
    pub preview: bool,
}

/// Parameters for rendering the step flowchart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Diagram {
    /// Return the hosted diagram URL instead of the Mermaid source
    #[serde(default)]
    pub link: bool,
}

/// Parameters for updating a Kanban text field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct KanbanText {
    /// Field name (problem, expected, actual, analysis, implementation,
    /// details)
    pub field: String,
    /// New content of the field
    #[serde(default)]
    pub text: String,
}

impl KanbanText {
    /// # Errors
    ///
    /// * `QuireError::InvalidInput` - When the field name is unknown
    pub fn validate(&self) -> Result<KanbanField> {
        KanbanField::from_str(&self.field)
            .map_err(|reason| QuireError::invalid_input("field").with_reason(reason))
    }
}
