//! Kanban card variant of a template.

use serde::{Deserialize, Serialize};

use super::{DIVIDER_LABEL, ItemId, lenient};

/// A reproduction step on a Kanban card, or a stage divider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KanbanStep {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_divider: bool,
}

impl KanbanStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            text: text.into(),
            is_divider: false,
        }
    }

    pub fn divider() -> Self {
        Self {
            id: ItemId::generate(),
            text: DIVIDER_LABEL.to_string(),
            is_divider: true,
        }
    }
}

/// Free-text card describing either a bug report or an implementation.
///
/// Persisted in its own slot, independent from the main [`Document`].
///
/// [`Document`]: super::Document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct KanbanDocument {
    #[serde(deserialize_with = "lenient::string")]
    pub problem_description: String,
    #[serde(deserialize_with = "lenient::items")]
    pub steps: Vec<KanbanStep>,
    #[serde(deserialize_with = "lenient::string")]
    pub expected_result: String,
    #[serde(deserialize_with = "lenient::string")]
    pub actual_result: String,
    #[serde(deserialize_with = "lenient::string")]
    pub extra_analysis: String,
    #[serde(deserialize_with = "lenient::string")]
    pub implementation: String,
    #[serde(deserialize_with = "lenient::string")]
    pub details: String,
}

/// Named text fields of a [`KanbanDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanbanField {
    ProblemDescription,
    ExpectedResult,
    ActualResult,
    ExtraAnalysis,
    Implementation,
    Details,
}

impl KanbanField {
    pub const ALL: [KanbanField; 6] = [
        KanbanField::ProblemDescription,
        KanbanField::ExpectedResult,
        KanbanField::ActualResult,
        KanbanField::ExtraAnalysis,
        KanbanField::Implementation,
        KanbanField::Details,
    ];

    /// Section heading used by the Kanban renderer.
    pub fn heading(&self) -> &'static str {
        match self {
            KanbanField::ProblemDescription => "Descrição do problema",
            KanbanField::ExpectedResult => "Resultado esperado",
            KanbanField::ActualResult => "Resultado obtido",
            KanbanField::ExtraAnalysis => "Análise extra",
            KanbanField::Implementation => "Implementação",
            KanbanField::Details => "Detalhamento",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KanbanField::ProblemDescription => "problem",
            KanbanField::ExpectedResult => "expected",
            KanbanField::ActualResult => "actual",
            KanbanField::ExtraAnalysis => "analysis",
            KanbanField::Implementation => "implementation",
            KanbanField::Details => "details",
        }
    }
}

impl std::str::FromStr for KanbanField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KanbanField::ALL
            .into_iter()
            .find(|field| field.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid kanban field: {s}"))
    }
}

impl KanbanDocument {
    pub fn field(&self, field: KanbanField) -> &str {
        match field {
            KanbanField::ProblemDescription => &self.problem_description,
            KanbanField::ExpectedResult => &self.expected_result,
            KanbanField::ActualResult => &self.actual_result,
            KanbanField::ExtraAnalysis => &self.extra_analysis,
            KanbanField::Implementation => &self.implementation,
            KanbanField::Details => &self.details,
        }
    }

    pub fn field_mut(&mut self, field: KanbanField) -> &mut String {
        match field {
            KanbanField::ProblemDescription => &mut self.problem_description,
            KanbanField::ExpectedResult => &mut self.expected_result,
            KanbanField::ActualResult => &mut self.actual_result,
            KanbanField::ExtraAnalysis => &mut self.extra_analysis,
            KanbanField::Implementation => &mut self.implementation,
            KanbanField::Details => &mut self.details,
        }
    }
}
