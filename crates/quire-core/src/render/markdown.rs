//! Markdown rendering of a template.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    diagram::render_diagram,
    link::diagram_url,
    text::{
        bold_parentheses, code_fence, escape_markdown, impact_bullets, single_line, stage_label,
    },
};
use crate::models::{Browser, DatabaseTarget, Document, Encoding};

const RULE: &str = "---";

/// Markdown report for a [`Document`].
///
/// Sections are written in a fixed order and omitted when their source data
/// is empty. The diagram link is only embedded when a diagram description is
/// supplied, the document opted in, and the task has a name.
///
/// # Examples
///
/// ```rust
/// use quire_core::{models::{Document, Step}, render::MarkdownReport};
///
/// let mut document = Document::default().with_task_name("ACT-1");
/// document.criteria = vec!["A".to_string(), "B".to_string()];
/// document.steps.push(Step::new("do X").with_links([1]));
///
/// let markdown = MarkdownReport::new(&document).to_string();
/// assert!(markdown.contains("1. do X ⚠️ (2)"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkdownReport<'a> {
    document: &'a Document,
    preview: bool,
    diagram: Option<&'a str>,
}

impl<'a> MarkdownReport<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            preview: false,
            diagram: None,
        }
    }

    /// Adds a separator after the title; content is otherwise identical.
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Supplies the pre-computed diagram description for the link line.
    pub fn with_diagram(mut self, diagram: Option<&'a str>) -> Self {
        self.diagram = diagram;
        self
    }

    fn write_title(&self, out: &mut String) -> fmt::Result {
        let task_name = single_line(&self.document.task_name);
        if task_name.is_empty() {
            return Ok(());
        }
        writeln!(out, "# {}\n", escape_markdown(&task_name))?;
        if self.preview {
            writeln!(out, "{RULE}\n")?;
        }
        Ok(())
    }

    fn write_scope(&self, out: &mut String) -> fmt::Result {
        let scope = single_line(&self.document.scope);
        if scope.is_empty() {
            return Ok(());
        }
        writeln!(out, "1. *{}*\n", escape_markdown(&scope))
    }

    fn write_attention_comments(&self, out: &mut String) -> fmt::Result {
        let comments = &self.document.attention_comments;
        if comments.is_empty() {
            return Ok(());
        }
        for comment in comments {
            for line in comment.trim().lines() {
                writeln!(out, "> {}", escape_markdown(line))?;
            }
        }
        writeln!(out, "\n{RULE}\n")
    }

    fn write_code_blocks(&self, out: &mut String) -> fmt::Result {
        for block in &self.document.code_blocks {
            let title = single_line(&block.title);
            if !title.is_empty() {
                writeln!(out, "**{}**", escape_markdown(&title))?;
            }
            let fence = code_fence(&block.code);
            writeln!(out, "{fence}{}", block.language.as_str())?;
            writeln!(out, "{}", block.code)?;
            writeln!(out, "{fence}\n")?;
        }
        Ok(())
    }

    fn write_external_links(&self, out: &mut String) -> fmt::Result {
        let links = &self.document.external_links;
        if links.is_empty() {
            return Ok(());
        }
        writeln!(out, "**Links auxiliares**")?;
        for link in links {
            writeln!(
                out,
                "- [{}]({})",
                escape_markdown(&single_line(&link.title)),
                link.url.trim()
            )?;
        }
        writeln!(out)
    }

    fn write_preparations(&self, out: &mut String) -> fmt::Result {
        for group in &self.document.preparations {
            if group.steps.is_empty() {
                continue;
            }
            let title = single_line(&group.title);
            if !title.is_empty() {
                writeln!(out, "## {}", escape_markdown(&title))?;
            }
            for (position, step) in group.steps.iter().enumerate() {
                writeln!(
                    out,
                    "{}. {}",
                    position + 1,
                    bold_parentheses(&escape_markdown(&single_line(&step.text)))
                )?;
            }
            writeln!(out, "\n{RULE}\n")?;
        }
        Ok(())
    }

    fn diagram_link(&self) -> Option<String> {
        let diagram = self.diagram.map(str::trim).filter(|d| !d.is_empty())?;
        if !self.document.make_diagram_available || self.document.task_name.trim().is_empty() {
            return None;
        }
        diagram_url(diagram)
    }

    fn write_steps(&self, out: &mut String) -> fmt::Result {
        let steps = &self.document.steps;
        if steps.is_empty() {
            return Ok(());
        }
        writeln!(out, "## Passos de Teste")?;

        let mut number = 0;
        let mut stage = 0;
        for step in steps {
            if step.is_divider {
                stage += 1;
                writeln!(out, "--- {} ---", stage_label(stage))?;
                continue;
            }

            number += 1;
            write!(
                out,
                "{number}. {}",
                bold_parentheses(&escape_markdown(&single_line(&step.text)))
            )?;
            let links: Vec<String> = step
                .effective_links()
                .map(|index| (index + 1).to_string())
                .collect();
            if !links.is_empty() {
                write!(out, " ⚠️ ({})", links.join(","))?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        if let Some(url) = self.diagram_link() {
            writeln!(out, "[📊 Fluxograma dos passos]({url})\n")?;
        }
        writeln!(out, "{RULE}\n")
    }

    fn write_criteria(&self, out: &mut String) -> fmt::Result {
        let criteria = &self.document.criteria;
        if criteria.is_empty() {
            return Ok(());
        }
        writeln!(out, "## Critérios de Aceitação")?;
        for (position, criterion) in criteria.iter().enumerate() {
            writeln!(out, "{}. {}", position + 1, escape_markdown(&single_line(criterion)))?;
        }
        writeln!(out, "\n{RULE}\n")
    }

    fn write_impact(&self, out: &mut String) -> fmt::Result {
        let mut bullets = impact_bullets(&self.document.impact).peekable();
        if bullets.peek().is_none() {
            return Ok(());
        }
        writeln!(out, "## Impacto")?;
        for bullet in bullets {
            writeln!(out, "- {}", escape_markdown(bullet))?;
        }
        writeln!(out, "\n{RULE}\n")
    }

    fn write_browsers(&self, out: &mut String) -> fmt::Result {
        let browsers = &self.document.browsers_tested;
        if !browsers.any() {
            return Ok(());
        }
        writeln!(out, "## Navegadores testados")?;
        for browser in Browser::ALL {
            writeln!(out, "- {} {}", checkbox(browsers.get(browser)), browser.label())?;
        }
        writeln!(out, "\n{RULE}\n")
    }

    fn write_databases(&self, out: &mut String) -> fmt::Result {
        let databases = &self.document.databases_tested;
        if !databases.any() {
            return Ok(());
        }
        writeln!(out, "## Bancos de dados testados")?;
        for encoding in [Encoding::Iso88591, Encoding::Utf8] {
            writeln!(out, "### {}", encoding.heading())?;
            for target in DatabaseTarget::ALL
                .into_iter()
                .filter(|target| target.encoding() == encoding)
            {
                writeln!(out, "- {} {}", checkbox(databases.get(target)), target.label())?;
            }
        }
        Ok(())
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[X]" } else { "[ ]" }
}

impl Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_title(&mut out)?;
        self.write_scope(&mut out)?;
        self.write_attention_comments(&mut out)?;
        self.write_code_blocks(&mut out)?;
        self.write_external_links(&mut out)?;
        self.write_preparations(&mut out)?;
        self.write_steps(&mut out)?;
        self.write_criteria(&mut out)?;
        self.write_impact(&mut out)?;
        self.write_browsers(&mut out)?;
        self.write_databases(&mut out)?;
        f.write_str(out.trim_end())
    }
}

/// Renders `document` with an optional pre-computed diagram description.
pub fn render_markdown(document: &Document, preview: bool, diagram: Option<&str>) -> String {
    MarkdownReport::new(document)
        .preview(preview)
        .with_diagram(diagram)
        .to_string()
}

/// Renders `document`, generating the diagram when the document opted in.
pub fn render_document(document: &Document, preview: bool) -> String {
    let diagram = document
        .make_diagram_available
        .then(|| render_diagram(document));
    render_markdown(document, preview, diagram.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeLanguage, Step};

    fn lines(markdown: &str) -> Vec<&str> {
        markdown.lines().collect()
    }

    #[test]
    fn test_empty_document_renders_empty_string() {
        assert_eq!(render_markdown(&Document::default(), false, None), "");
        assert_eq!(render_markdown(&Document::default(), true, Some("flowchart LR")), "");
    }

    #[test]
    fn test_linked_step_and_criteria() {
        let mut document = Document::default().with_task_name("ACT-1");
        document.criteria = vec!["A".to_string(), "B".to_string()];
        document.steps.push(Step::new("do X").with_links([1]));

        let markdown = render_markdown(&document, false, None);
        let lines = lines(&markdown);
        assert!(lines.contains(&"1. do X ⚠️ (2)"));
        let criteria = lines
            .iter()
            .position(|line| *line == "## Critérios de Aceitação")
            .unwrap();
        assert_eq!(lines[criteria + 1], "1. A");
        assert_eq!(lines[criteria + 2], "2. B");
    }

    #[test]
    fn test_dividers_and_numbering() {
        let mut document = Document::default();
        document.steps = vec![
            Step::divider(),
            Step::new("a"),
            Step::new("b"),
            Step::divider(),
            Step::new("c"),
        ];

        let markdown = render_markdown(&document, false, None);
        assert_eq!(
            lines(&markdown)[..6],
            [
                "## Passos de Teste",
                "--- 1ª Etapa ---",
                "1. a",
                "2. b",
                "--- 2ª Etapa ---",
                "3. c"
            ]
        );
        assert_eq!(markdown.matches("Etapa").count(), 2);
    }

    #[test]
    fn test_links_are_sorted_one_based() {
        let mut document = Document::default();
        document.criteria = ["A", "B", "C"].map(String::from).to_vec();
        document.steps.push(Step::new("x").with_links([2, 0]));
        document.steps.push(Step::divider().with_links([1]));

        let markdown = render_markdown(&document, false, None);
        assert!(markdown.contains("1. x ⚠️ (1,3)\n"));
        assert!(markdown.contains("--- 1ª Etapa ---\n"));
        assert!(!markdown.contains("(2)"));
    }

    #[test]
    fn test_underscores_are_escaped_everywhere() {
        let mut document = Document::default().with_task_name("ACT_1");
        document.scope = "user_scope".to_string();
        document.criteria = vec!["snake_case".to_string()];
        document.steps.push(Step::new("open my_page"));
        document.impact = "some_impact".to_string();
        document.attention_comments = vec!["mind_this".to_string()];

        let markdown = render_markdown(&document, false, None);
        assert!(markdown.contains("# ACT\\_1"));
        assert!(markdown.contains("1. *user\\_scope*"));
        assert!(markdown.contains("> mind\\_this"));
        assert!(markdown.contains("1. open my\\_page"));
        assert!(markdown.contains("1. snake\\_case"));
        assert!(markdown.contains("- some\\_impact"));
        assert_eq!(markdown.matches('_').count(), markdown.matches("\\_").count());
        assert_eq!(document.task_name, "ACT_1");
    }

    #[test]
    fn test_preview_only_adds_separator() {
        let mut document = Document::default().with_task_name("ACT-1");
        document.scope = "login".to_string();

        let normal = render_markdown(&document, false, None);
        let preview = render_markdown(&document, true, None);
        assert_eq!(normal, "# ACT-1\n\n1. *login*");
        assert_eq!(preview, "# ACT-1\n\n---\n\n1. *login*");
    }

    #[test]
    fn test_code_blocks_and_preparations() {
        let mut document = Document::default();
        document.add_code_block("Query", CodeLanguage::Sql, "select 1");
        document.add_code_block("", CodeLanguage::Bash, "ls");
        document.add_preparation("Setup");
        document.add_preparation_step(0, "create user (admin)");

        let markdown = render_markdown(&document, false, None);
        assert!(markdown.starts_with("**Query**\n```sql\nselect 1\n```\n\n```bash\nls\n```"));
        assert!(markdown.contains("## Setup\n1. create user (**admin**)\n\n---"));
    }

    #[test]
    fn test_environment_checklists() {
        let mut document = Document::default();
        document.browsers_tested.edge = true;
        document.databases_tested.oracle_utf = true;

        let markdown = render_markdown(&document, false, None);
        assert!(markdown.contains(
            "## Navegadores testados\n- [ ] Google Chrome\n- [X] Microsoft Edge\n\n---"
        ));
        assert!(markdown.ends_with(
            "## Bancos de dados testados\n### ISO 8859-1\n- [ ] SQL Server\n- [ ] Oracle\n### UTF8\n- [ ] PostgreSQL\n- [X] Oracle"
        ));
    }

    #[test]
    fn test_diagram_link_requires_flag_and_task_name() {
        let mut document = Document::default();
        document.steps.push(Step::new("a"));
        let diagram = render_diagram(&document);

        document.make_diagram_available = true;
        assert!(!render_markdown(&document, false, Some(&diagram)).contains("Fluxograma"));

        document.task_name = "ACT-1".to_string();
        assert!(!render_markdown(&document, false, None).contains("Fluxograma"));
        assert!(!render_markdown(&document, false, Some("  ")).contains("Fluxograma"));

        let markdown = render_markdown(&document, false, Some(&diagram));
        assert!(markdown.contains("[📊 Fluxograma dos passos](https://kroki.io/mermaid/svg/"));

        document.make_diagram_available = false;
        assert!(!render_markdown(&document, false, Some(&diagram)).contains("Fluxograma"));
    }

    #[test]
    fn test_render_document_is_idempotent() {
        let mut document = Document::default().with_task_name("ACT-1");
        document.make_diagram_available = true;
        document.steps.push(Step::new("a"));
        document.impact = "- faster".to_string();

        let first = render_document(&document, true);
        assert_eq!(first, render_document(&document, true));
        assert!(first.contains("Fluxograma"));
    }

    #[test]
    fn test_line_breaks_never_add_numbered_lines() {
        let mut document = Document::default();
        document.add_step("do x\n2. injected", false);
        document.steps.push(Step::new("stored\n3. raw"));
        document.criteria.push("first\nsecond".to_string());
        document.add_preparation("Setup");
        document.preparations[0]
            .steps
            .push(crate::models::PreparationStep::new("seed\n2. data"));

        let markdown = render_markdown(&document, false, None);
        assert!(markdown.contains("## Passos de Teste\n1. do x 2. injected\n2. stored 3. raw\n\n"));
        assert!(markdown.contains("## Critérios de Aceitação\n1. first second\n"));
        assert!(markdown.contains("## Setup\n1. seed 2. data\n\n"));
        let numbered = lines(&markdown)
            .iter()
            .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
            .count();
        assert_eq!(numbered, 4);
    }

    #[test]
    fn test_preparation_without_steps_is_omitted() {
        let mut document = Document::default();
        document.add_preparation("Empty");
        assert_eq!(render_markdown(&document, false, None), "");

        document.add_preparation("Setup");
        document.add_preparation_step(1, "seed");
        let markdown = render_markdown(&document, false, None);
        assert!(!markdown.contains("Empty"));
        assert_eq!(markdown.matches("---").count(), 1);
    }

    #[test]
    fn test_code_with_fences_gets_longer_fence() {
        let mut document = Document::default();
        document.add_code_block("Readme", CodeLanguage::Text, "```\ninner\n```");

        let markdown = render_markdown(&document, false, None);
        assert_eq!(markdown, "**Readme**\n````text\n```\ninner\n```\n````");
    }
}
