//! Preparation group operations, including importing saved blocks.

use super::list::{clean_text, move_item, remove_at};
use crate::models::{CustomBlock, Document, PreparationGroup, PreparationStep};

impl Document {
    fn default_preparation_title(&self) -> String {
        format!("Preparativo {}", self.preparations.len() + 1)
    }

    /// Appends an empty group. A blank title falls back to `Preparativo N`.
    pub fn add_preparation(&mut self, title: &str) -> bool {
        let title = clean_text(title).unwrap_or_else(|| self.default_preparation_title());
        self.preparations.push(PreparationGroup::new(title));
        true
    }

    /// Renames a group. Blank titles are rejected.
    pub fn rename_preparation(&mut self, index: usize, title: &str) -> bool {
        match (self.preparations.get_mut(index), clean_text(title)) {
            (Some(group), Some(title)) => {
                group.title = title;
                true
            }
            _ => false,
        }
    }

    pub fn remove_preparation(&mut self, index: usize) -> bool {
        remove_at(&mut self.preparations, index).is_some()
    }

    pub fn move_preparation(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.preparations, from, to)
    }

    pub fn add_preparation_step(&mut self, group: usize, text: &str) -> bool {
        match (self.preparations.get_mut(group), clean_text(text)) {
            (Some(group), Some(text)) => {
                group.steps.push(PreparationStep::new(text));
                true
            }
            _ => false,
        }
    }

    pub fn edit_preparation_step(&mut self, group: usize, index: usize, text: &str) -> bool {
        let step = self
            .preparations
            .get_mut(group)
            .and_then(|group| group.steps.get_mut(index));
        match (step, clean_text(text)) {
            (Some(step), Some(text)) => {
                step.text = text;
                true
            }
            _ => false,
        }
    }

    pub fn remove_preparation_step(&mut self, group: usize, index: usize) -> bool {
        self.preparations
            .get_mut(group)
            .and_then(|group| remove_at(&mut group.steps, index))
            .is_some()
    }

    pub fn move_preparation_step(&mut self, group: usize, from: usize, to: usize) -> bool {
        self.preparations
            .get_mut(group)
            .is_some_and(|group| move_item(&mut group.steps, from, to))
    }

    /// Appends a new group copied from a saved block.
    ///
    /// The group and its steps receive fresh identifiers; blank block steps
    /// are skipped.
    pub fn import_block(&mut self, block: &CustomBlock) -> bool {
        let title = clean_text(&block.title).unwrap_or_else(|| self.default_preparation_title());
        let mut group = PreparationGroup::new(title);
        group.steps = block
            .steps
            .iter()
            .filter_map(|step| clean_text(&step.text))
            .map(PreparationStep::new)
            .collect();
        self.preparations.push(group);
        true
    }
}
