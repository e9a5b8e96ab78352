//! Template document: the root aggregate edited and rendered by quire.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{
    BrowsersTested, CodeBlock, DatabasesTested, ExternalLink, PreparationGroup, Step, lenient,
};

/// Represents a complete test-report template.
///
/// All collections are ordered; their order is the render order. Every
/// field defaults when absent so that partially written payloads still
/// decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    /// Task identifier; empty means "unset"
    #[serde(deserialize_with = "lenient::string")]
    pub task_name: String,

    /// What is being tested
    #[serde(deserialize_with = "lenient::string")]
    pub scope: String,

    /// Expected impact, one bullet per non-empty line
    #[serde(deserialize_with = "lenient::string")]
    pub impact: String,

    /// Acceptance criteria, referenced by position from steps
    #[serde(deserialize_with = "lenient::strings")]
    pub criteria: Vec<String>,

    /// Main test procedure
    #[serde(deserialize_with = "lenient::items")]
    pub steps: Vec<Step>,

    /// Setup groups rendered before the procedure
    #[serde(deserialize_with = "lenient::items")]
    pub preparations: Vec<PreparationGroup>,

    /// Snippets rendered as fenced code
    #[serde(deserialize_with = "lenient::items")]
    pub code_blocks: Vec<CodeBlock>,

    /// Warnings rendered as block quotes
    #[serde(deserialize_with = "lenient::strings")]
    pub attention_comments: Vec<String>,

    /// Auxiliary reference links
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::items")]
    pub external_links: Vec<ExternalLink>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub browsers_tested: BrowsersTested,

    #[serde(deserialize_with = "lenient::or_default")]
    pub databases_tested: DatabasesTested,

    /// Whether the rendered Markdown embeds a hosted flowchart link
    #[serde(deserialize_with = "lenient::flag")]
    pub make_diagram_available: bool,

    /// Snapshots of previously completed templates (one level deep)
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::items")]
    pub archived: Vec<Document>,

    /// When this document was archived; only set on snapshots
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub archived_at: Option<Timestamp>,
}

impl Document {
    /// Builder-style helper used by callers assembling documents in code.
    pub fn with_task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = task_name.into();
        self
    }

    /// Number of non-divider steps.
    pub fn step_count(&self) -> usize {
        self.steps.iter().filter(|step| !step.is_divider).count()
    }

    /// Number of divider steps.
    pub fn divider_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_divider).count()
    }

    /// Whether the document carries no content at all (archive ignored).
    pub fn is_blank(&self) -> bool {
        let mut probe = self.clone();
        probe.archived.clear();
        probe.archived_at = None;
        probe == Document::default()
    }
}
