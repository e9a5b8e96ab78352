//! Step model definition and related functionality.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ItemId, lenient};

/// Label stored on divider steps.
pub const DIVIDER_LABEL: &str = "── Divisória ──";

/// One execution instruction in the main procedure, or a stage divider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique identifier for the step
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ItemId,

    /// Instruction text (dividers carry [`DIVIDER_LABEL`])
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,

    /// Whether the tester flagged this step as critical
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_critical: bool,

    /// Whether this entry is a stage separator instead of a step
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_divider: bool,

    /// Positions into `Document::criteria` at the time of linking
    #[serde(
        default,
        deserialize_with = "lenient::positions",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub linked_criteria: BTreeSet<usize>,
}

impl Step {
    /// Create a normal step with a fresh identifier.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            text: text.into(),
            is_critical: false,
            is_divider: false,
            linked_criteria: BTreeSet::new(),
        }
    }

    /// Create a divider with a fresh identifier.
    pub fn divider() -> Self {
        Self {
            id: ItemId::generate(),
            text: DIVIDER_LABEL.to_string(),
            is_critical: false,
            is_divider: true,
            linked_criteria: BTreeSet::new(),
        }
    }

    /// Builder-style helper linking criteria positions.
    pub fn with_links(mut self, links: impl IntoIterator<Item = usize>) -> Self {
        self.linked_criteria = links.into_iter().collect();
        self
    }

    /// Builder-style helper marking the step as critical.
    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Linked criteria as seen by renderers: always empty for dividers.
    pub fn effective_links(&self) -> impl Iterator<Item = usize> + '_ {
        self.linked_criteria
            .iter()
            .copied()
            .filter(move |_| !self.is_divider)
    }
}
