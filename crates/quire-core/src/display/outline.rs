//! Positional outline of a template.

use std::fmt::{self, Display, Formatter};

use crate::models::{Browser, DatabaseTarget, Document};

/// Compact listing of every collection in a [`Document`] with the 0-based
/// positions used to address entries from the CLI and MCP tools.
///
/// # Examples
///
/// ```rust
/// use quire_core::{display::Outline, models::{Document, Step}};
///
/// let mut document = Document::default().with_task_name("ACT-1");
/// document.criteria.push("Saves".to_string());
/// document.steps.push(Step::new("Open form").with_links([0]));
///
/// let outline = Outline(&document).to_string();
/// assert!(outline.contains("[0] Open form -> criteria 0"));
/// ```
pub struct Outline<'a>(pub &'a Document);

impl Outline<'_> {
    fn heading(f: &mut Formatter<'_>, title: &str, count: usize) -> fmt::Result {
        writeln!(f, "\n## {title} ({count})\n")
    }
}

impl Display for Outline<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        let name = if doc.task_name.is_empty() {
            "(sem nome)"
        } else {
            doc.task_name.as_str()
        };
        writeln!(f, "# {name}")?;
        if !doc.scope.is_empty() {
            writeln!(f, "\n**Scope:** {}", doc.scope)?;
        }
        if !doc.impact.is_empty() {
            writeln!(f, "\n**Impact:**\n{}", doc.impact)?;
        }

        Self::heading(f, "Criteria", doc.criteria.len())?;
        for (index, criterion) in doc.criteria.iter().enumerate() {
            writeln!(f, "- [{index}] {criterion}")?;
        }

        Self::heading(f, "Steps", doc.steps.len())?;
        for (index, step) in doc.steps.iter().enumerate() {
            if step.is_divider {
                writeln!(f, "- [{index}] {}", step.text)?;
                continue;
            }
            write!(f, "- [{index}] {}", step.text)?;
            if step.is_critical {
                write!(f, " (critical)")?;
            }
            if !step.linked_criteria.is_empty() {
                let links: Vec<String> = step
                    .linked_criteria
                    .iter()
                    .map(|link| link.to_string())
                    .collect();
                write!(f, " -> criteria {}", links.join(", "))?;
            }
            writeln!(f)?;
        }

        Self::heading(f, "Preparations", doc.preparations.len())?;
        for (index, group) in doc.preparations.iter().enumerate() {
            writeln!(f, "- [{index}] {}", group.title)?;
            for (step_index, step) in group.steps.iter().enumerate() {
                writeln!(f, "  - [{step_index}] {}", step.text)?;
            }
        }

        Self::heading(f, "Code Blocks", doc.code_blocks.len())?;
        for (index, block) in doc.code_blocks.iter().enumerate() {
            let lines = block.code.lines().count();
            writeln!(
                f,
                "- [{index}] {} ({}, {lines} lines)",
                block.title, block.language
            )?;
        }

        Self::heading(f, "Attention Comments", doc.attention_comments.len())?;
        for (index, comment) in doc.attention_comments.iter().enumerate() {
            writeln!(f, "- [{index}] {comment}")?;
        }

        Self::heading(f, "Links", doc.external_links.len())?;
        for (index, link) in doc.external_links.iter().enumerate() {
            writeln!(f, "- [{index}] {} <{}>", link.title, link.url)?;
        }

        writeln!(f, "\n## Environment\n")?;
        let browsers: Vec<&str> = Browser::ALL
            .iter()
            .filter(|browser| doc.browsers_tested.get(**browser))
            .map(|browser| browser.label())
            .collect();
        let databases: Vec<&str> = DatabaseTarget::ALL
            .iter()
            .filter(|target| doc.databases_tested.get(**target))
            .map(|target| target.label())
            .collect();
        writeln!(f, "- Browsers: {}", or_none(&browsers))?;
        writeln!(f, "- Databases: {}", or_none(&databases))?;
        writeln!(
            f,
            "- Diagram link: {}",
            if doc.make_diagram_available { "yes" } else { "no" }
        )?;

        write!(f, "\n**Archived templates:** {}", doc.archived.len())
    }
}

fn or_none(labels: &[&str]) -> String {
    if labels.is_empty() {
        "none".to_string()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeBlock, CodeLanguage, PreparationGroup, PreparationStep, Step};

    #[test]
    fn test_outline_lists_positions() {
        let mut document = Document::default();
        document.criteria = vec!["A".to_string(), "B".to_string()];
        document.steps.push(Step::new("first").critical());
        document.steps.push(Step::divider());
        document.steps.push(Step::new("second").with_links([0, 1]));
        let mut group = PreparationGroup::new("Setup");
        group.steps.push(PreparationStep::new("seed data"));
        document.preparations.push(group);
        document
            .code_blocks
            .push(CodeBlock::new("Query", CodeLanguage::Sql, "SELECT 1;\nSELECT 2;"));
        document.browsers_tested.chrome = true;

        let outline = Outline(&document).to_string();
        assert!(outline.starts_with("# (sem nome)"));
        assert!(outline.contains("## Criteria (2)"));
        assert!(outline.contains("- [1] B"));
        assert!(outline.contains("- [0] first (critical)\n"));
        assert!(outline.contains("- [1] ── Divisória ──\n"));
        assert!(outline.contains("- [2] second -> criteria 0, 1\n"));
        assert!(outline.contains("  - [0] seed data"));
        assert!(outline.contains("- [0] Query (sql, 2 lines)"));
        assert!(outline.contains("- Browsers: Chrome"));
        assert!(outline.contains("- Databases: none"));
        assert!(outline.ends_with("**Archived templates:** 0"));
    }
}
