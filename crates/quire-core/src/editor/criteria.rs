//! Acceptance criteria operations.

use super::list::{move_item, push_text, replace_text};
use crate::models::Document;

impl Document {
    /// Appends a criterion. New criteria go last, so existing links stay valid.
    pub fn add_criterion(&mut self, text: &str) -> bool {
        push_text(&mut self.criteria, text)
    }

    /// Rewrites a criterion's text without touching step links.
    pub fn update_criterion(&mut self, index: usize, text: &str) -> bool {
        replace_text(&mut self.criteria, index, text)
    }

    /// Reorders criteria. Step links are positional and are not remapped.
    pub fn move_criterion(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.criteria, from, to)
    }
}
