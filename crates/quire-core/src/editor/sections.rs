//! Attention comments, code blocks and external links.

use super::list::{clean_paragraph, clean_text, move_item, remove_at};
use crate::models::{CodeBlock, CodeLanguage, Document, ExternalLink};

/// Drops surrounding blank lines and trailing whitespace, keeping the
/// indentation of the first code line.
fn clean_code(code: &str) -> Option<String> {
    let trimmed = code.trim_end();
    let start = trimmed
        .split_inclusive('\n')
        .take_while(|line| line.trim().is_empty())
        .map(str::len)
        .sum::<usize>();
    let cleaned = &trimmed[start..];
    (!cleaned.trim().is_empty()).then(|| cleaned.to_string())
}

impl Document {
    /// Appends a warning. Comments may span several lines.
    pub fn add_attention_comment(&mut self, text: &str) -> bool {
        match clean_paragraph(text) {
            Some(text) => {
                self.attention_comments.push(text);
                true
            }
            None => false,
        }
    }

    pub fn edit_attention_comment(&mut self, index: usize, text: &str) -> bool {
        match (self.attention_comments.get_mut(index), clean_paragraph(text)) {
            (Some(comment), Some(text)) => {
                *comment = text;
                true
            }
            _ => false,
        }
    }

    pub fn remove_attention_comment(&mut self, index: usize) -> bool {
        remove_at(&mut self.attention_comments, index).is_some()
    }

    pub fn move_attention_comment(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.attention_comments, from, to)
    }

    /// Appends a code block. The code must not be blank; the title may be.
    pub fn add_code_block(&mut self, title: &str, language: CodeLanguage, code: &str) -> bool {
        let Some(code) = clean_code(code) else {
            return false;
        };
        self.code_blocks.push(CodeBlock::new(title.trim(), language, code));
        true
    }

    pub fn edit_code_block(
        &mut self,
        index: usize,
        title: &str,
        language: CodeLanguage,
        code: &str,
    ) -> bool {
        match (self.code_blocks.get_mut(index), clean_code(code)) {
            (Some(block), Some(code)) => {
                block.title = title.trim().to_string();
                block.language = language;
                block.code = code;
                true
            }
            _ => false,
        }
    }

    pub fn remove_code_block(&mut self, index: usize) -> bool {
        remove_at(&mut self.code_blocks, index).is_some()
    }

    pub fn move_code_block(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.code_blocks, from, to)
    }

    /// Appends a reference link. A blank title falls back to the URL.
    pub fn add_external_link(&mut self, title: &str, url: &str) -> bool {
        let Some(url) = clean_text(url) else {
            return false;
        };
        let title = clean_text(title).unwrap_or_else(|| url.clone());
        self.external_links.push(ExternalLink { title, url });
        true
    }

    pub fn remove_external_link(&mut self, index: usize) -> bool {
        remove_at(&mut self.external_links, index).is_some()
    }

    pub fn move_external_link(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.external_links, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_code_strips_blank_edges() {
        assert_eq!(
            clean_code("\n  \n    select 1\n  from dual  \n\n"),
            Some("    select 1\n  from dual".to_string())
        );
        assert_eq!(clean_code(" \n\t\n"), None);
    }

    #[test]
    fn test_code_block_operations() {
        let mut document = Document::default();
        assert!(document.add_code_block(" Query ", CodeLanguage::Sql, "select 1"));
        assert!(document.add_code_block("", CodeLanguage::Bash, "ls"));
        assert!(!document.add_code_block("Empty", CodeLanguage::Text, "   "));
        assert_eq!(document.code_blocks[0].title, "Query");

        assert!(document.edit_code_block(1, "List", CodeLanguage::Bash, "ls -la"));
        assert!(!document.edit_code_block(1, "List", CodeLanguage::Bash, ""));
        assert!(document.move_code_block(1, 0));
        assert_eq!(document.code_blocks[0].code, "ls -la");
        assert!(document.remove_code_block(0));
        assert_eq!(document.code_blocks.len(), 1);
    }

    #[test]
    fn test_attention_comment_operations() {
        let mut document = Document::default();
        assert!(document.add_attention_comment(" cuidado "));
        assert!(!document.add_attention_comment(""));
        assert!(document.add_attention_comment("segundo"));
        assert!(document.edit_attention_comment(0, "atenção"));
        assert!(document.move_attention_comment(0, 1));
        assert_eq!(document.attention_comments, vec!["segundo", "atenção"]);
        assert!(document.remove_attention_comment(1));
        assert!(!document.remove_attention_comment(1));
    }

    #[test]
    fn test_external_link_title_falls_back_to_url() {
        let mut document = Document::default();
        assert!(!document.add_external_link("Docs", "  "));
        assert!(document.add_external_link("", "https://example.com"));
        assert_eq!(document.external_links[0].title, "https://example.com");
        assert!(document.remove_external_link(0));
    }
}
