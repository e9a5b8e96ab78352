//! Plain-text rendering of Kanban cards.

use std::fmt::{self, Display, Formatter, Write};

use super::text::stage_label;
use crate::models::{KanbanDocument, KanbanField};

/// Text pasted into a Kanban card.
///
/// Bug cards carry the problem, reproduction steps and results; other cards
/// carry the implementation notes. Empty sections are omitted.
pub struct KanbanReport<'a> {
    kanban: &'a KanbanDocument,
    is_bug: bool,
}

impl<'a> KanbanReport<'a> {
    pub fn new(kanban: &'a KanbanDocument, is_bug: bool) -> Self {
        Self { kanban, is_bug }
    }

    fn write_field(&self, out: &mut String, field: KanbanField) -> fmt::Result {
        let text = self.kanban.field(field).trim();
        if text.is_empty() {
            return Ok(());
        }
        writeln!(out, "{}:\n{text}\n", field.heading())
    }

    fn write_steps(&self, out: &mut String) -> fmt::Result {
        if self.kanban.steps.is_empty() {
            return Ok(());
        }
        writeln!(out, "Passos para reproduzir:")?;
        let mut number = 0;
        let mut stage = 0;
        for step in &self.kanban.steps {
            if step.is_divider {
                stage += 1;
                writeln!(out, "--- {} ---", stage_label(stage))?;
            } else {
                number += 1;
                writeln!(out, "{number}. {}", step.text.trim())?;
            }
        }
        writeln!(out)
    }
}

impl Display for KanbanReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if self.is_bug {
            self.write_field(&mut out, KanbanField::ProblemDescription)?;
            self.write_steps(&mut out)?;
            self.write_field(&mut out, KanbanField::ExpectedResult)?;
            self.write_field(&mut out, KanbanField::ActualResult)?;
            self.write_field(&mut out, KanbanField::ExtraAnalysis)?;
        } else {
            self.write_field(&mut out, KanbanField::Implementation)?;
            self.write_field(&mut out, KanbanField::Details)?;
        }
        f.write_str(out.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KanbanDocument {
        let mut kanban = KanbanDocument::default();
        kanban.set_field(KanbanField::ProblemDescription, "falha ao salvar");
        kanban.add_step("abrir");
        kanban.add_divider();
        kanban.add_step("salvar");
        kanban.set_field(KanbanField::ActualResult, "erro 500");
        kanban.set_field(KanbanField::Implementation, "ajuste no endpoint");
        kanban
    }

    #[test]
    fn test_bug_card() {
        let text = KanbanReport::new(&sample(), true).to_string();
        assert_eq!(
            text,
            "Descrição do problema:\nfalha ao salvar\n\n\
             Passos para reproduzir:\n1. abrir\n--- 1ª Etapa ---\n2. salvar\n\n\
             Resultado obtido:\nerro 500"
        );
    }

    #[test]
    fn test_implementation_card() {
        let text = KanbanReport::new(&sample(), false).to_string();
        assert_eq!(text, "Implementação:\najuste no endpoint");
    }

    #[test]
    fn test_empty_card() {
        assert_eq!(KanbanReport::new(&KanbanDocument::default(), true).to_string(), "");
    }
}
