//! Mermaid flowchart generation for the step procedure.

use std::fmt::{self, Display, Formatter};

use super::text::stage_label;
use crate::models::Document;

/// Style classes appended to every flowchart.
const CLASS_DEFS: &str = "    classDef stage fill:#e3f2fd,stroke:#1565c0,color:#0d47a1,font-weight:bold
    classDef critical fill:#ffebee,stroke:#c62828,stroke-width:2px
    classDef criterion fill:#f1f8e9,stroke:#558b2f,color:#33691e";

/// Left-to-right flowchart of the steps of a [`Document`].
///
/// The chain starts at the task node, passes the `Passos de Teste` anchor
/// and then every divider (as a stage node) and every step with text, in
/// order. Steps linked to two or more criteria are tagged `critical`; each
/// linked criterion hangs off its step as a satellite node.
pub struct Flowchart<'a> {
    document: &'a Document,
}

impl<'a> Flowchart<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    fn criterion_label(&self, index: usize) -> String {
        self.document
            .criteria
            .get(index)
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Critério {}", index + 1))
    }
}

/// Mermaid-safe node label.
fn label(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "#quot;")
}

impl Display for Flowchart<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let task_name = self.document.task_name.trim();
        let root = if task_name.is_empty() {
            "(sem nome)"
        } else {
            task_name
        };

        writeln!(f, "flowchart LR")?;
        writeln!(f, "    T[\"{}\"]", label(root))?;
        writeln!(f, "    P[\"Passos de Teste\"]")?;
        writeln!(f, "    T --> P")?;

        let mut previous = "P".to_string();
        let mut number = 0;
        let mut stage = 0;

        for step in &self.document.steps {
            if step.is_divider {
                stage += 1;
                let node = format!("E{stage}");
                writeln!(f, "    {node}[\"{}\"]:::stage", stage_label(stage))?;
                writeln!(f, "    {previous} --> {node}")?;
                previous = node;
                continue;
            }

            let text = step.text.trim();
            if text.is_empty() {
                continue;
            }

            number += 1;
            let node = format!("S{number}");
            let class = if step.linked_criteria.len() >= 2 {
                ":::critical"
            } else {
                ""
            };
            writeln!(f, "    {node}[\"{number}. {}\"]{class}", label(text))?;
            writeln!(f, "    {previous} --> {node}")?;

            for criterion in step.effective_links() {
                let satellite = format!("{node}C{criterion}");
                writeln!(
                    f,
                    "    {satellite}([\"{}\"]):::criterion",
                    label(&self.criterion_label(criterion))
                )?;
                writeln!(f, "    {node} -.-> {satellite}")?;
            }

            previous = node;
        }

        write!(f, "{CLASS_DEFS}")
    }
}

/// Renders the step flowchart of `document` as Mermaid source.
pub fn render_diagram(document: &Document) -> String {
    Flowchart::new(document).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;

    fn sample() -> Document {
        let mut document = Document::default().with_task_name("ACT-1");
        document.criteria = vec!["A".to_string(), "B \"quoted\"".to_string()];
        document.steps = vec![
            Step::divider(),
            Step::new("open app"),
            Step::new("   "),
            Step::new("save").with_links([0, 1, 4]),
        ];
        document
    }

    #[test]
    fn test_chain_skips_empty_steps() {
        let diagram = render_diagram(&sample());
        assert!(diagram.starts_with("flowchart LR\n"));
        assert!(diagram.contains("    T[\"ACT-1\"]\n"));
        assert!(diagram.contains("    P --> E1\n"));
        assert!(diagram.contains("    E1[\"1ª Etapa\"]:::stage\n"));
        assert!(diagram.contains("    E1 --> S1\n"));
        assert!(diagram.contains("    S1 --> S2\n"));
        assert!(diagram.contains("    S2[\"2. save\"]:::critical\n"));
        assert!(!diagram.contains("S3"));
    }

    #[test]
    fn test_satellites_label_criteria() {
        let diagram = render_diagram(&sample());
        assert!(diagram.contains("    S2C0([\"A\"]):::criterion\n"));
        assert!(diagram.contains("    S2C1([\"B #quot;quoted#quot;\"]):::criterion\n"));
        assert!(diagram.contains("    S2C4([\"Critério 5\"]):::criterion\n"));
        assert!(diagram.contains("    S2 -.-> S2C4\n"));
    }

    #[test]
    fn test_unnamed_task_and_class_defs() {
        let diagram = render_diagram(&Document::default());
        assert!(diagram.contains("T[\"(sem nome)\"]"));
        assert!(diagram.ends_with(CLASS_DEFS));
        assert_eq!(diagram, render_diagram(&Document::default()));
    }

    #[test]
    fn test_single_link_is_not_critical() {
        let mut document = Document::default();
        document.criteria = vec!["A".to_string()];
        document.steps = vec![Step::new("x").with_links([0])];
        let diagram = render_diagram(&document);
        assert!(diagram.contains("    S1[\"1. x\"]\n"));
    }
}
