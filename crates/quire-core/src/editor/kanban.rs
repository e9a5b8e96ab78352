//! Kanban card and saved block operations.

use super::list::{clean_text, move_item, remove_at};
use crate::models::{
    BlockLibrary, BlockStep, CustomBlock, KanbanDocument, KanbanField, KanbanStep,
};

impl KanbanDocument {
    /// Overwrites one free-text field; surrounding whitespace is dropped.
    pub fn set_field(&mut self, field: KanbanField, text: &str) -> bool {
        *self.field_mut(field) = text.trim().to_string();
        true
    }

    pub fn add_step(&mut self, text: &str) -> bool {
        match clean_text(text) {
            Some(text) => {
                self.steps.push(KanbanStep::new(text));
                true
            }
            None => false,
        }
    }

    pub fn add_divider(&mut self) -> bool {
        self.steps.push(KanbanStep::divider());
        true
    }

    /// Rewrites a reproduction step. Dividers cannot be edited.
    pub fn edit_step(&mut self, index: usize, text: &str) -> bool {
        match (self.steps.get_mut(index), clean_text(text)) {
            (Some(step), Some(text)) if !step.is_divider => {
                step.text = text;
                true
            }
            _ => false,
        }
    }

    pub fn remove_step(&mut self, index: usize) -> bool {
        remove_at(&mut self.steps, index).is_some()
    }

    pub fn move_step(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.steps, from, to)
    }
}

fn block_steps<I, S>(steps: I) -> Vec<BlockStep>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    steps
        .into_iter()
        .filter_map(|text| clean_text(text.as_ref()))
        .map(|text| BlockStep { text })
        .collect()
}

impl BlockLibrary {
    /// Saves a new block. The title is required; blank steps are dropped.
    pub fn add_block<I, S>(&mut self, title: &str, steps: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(title) = clean_text(title) else {
            return false;
        };
        let mut block = CustomBlock::new(title, Vec::new());
        block.steps = block_steps(steps);
        self.blocks.push(block);
        true
    }

    /// Replaces the title and steps of the block at `index`.
    pub fn edit_block<I, S>(&mut self, index: usize, title: &str, steps: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match (self.blocks.get_mut(index), clean_text(title)) {
            (Some(block), Some(title)) => {
                block.title = title;
                block.steps = block_steps(steps);
                true
            }
            _ => false,
        }
    }

    pub fn remove_block(&mut self, index: usize) -> bool {
        remove_at(&mut self.blocks, index).is_some()
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.blocks, from, to)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{BlockLibrary, KanbanDocument, KanbanField};

    #[test]
    fn test_kanban_step_operations() {
        let mut kanban = KanbanDocument::default();
        assert!(kanban.add_step(" abrir "));
        assert!(kanban.add_divider());
        assert!(kanban.add_step("salvar"));
        assert!(!kanban.add_step(""));

        assert!(!kanban.edit_step(1, "renamed"));
        assert!(kanban.edit_step(2, "salvar registro"));
        assert!(kanban.move_step(2, 0));
        assert_eq!(kanban.steps[0].text, "salvar registro");
        assert!(kanban.remove_step(1));
        assert_eq!(kanban.steps.len(), 2);
    }

    #[test]
    fn test_kanban_set_field() {
        let mut kanban = KanbanDocument::default();
        assert!(kanban.set_field(KanbanField::ProblemDescription, " erro ao salvar "));
        assert_eq!(kanban.problem_description, "erro ao salvar");
    }

    #[test]
    fn test_block_library_operations() {
        let mut library = BlockLibrary::default();
        assert!(!library.add_block("  ", ["a"]));
        assert!(library.add_block("Login", ["abrir", " ", "entrar"]));
        assert!(library.add_block("Logout", ["sair"]));
        assert_eq!(library.blocks[0].steps.len(), 2);

        assert!(library.edit_block(1, "Sair", ["clicar em sair"]));
        assert!(!library.edit_block(1, "", ["x"]));
        assert!(library.move_block(1, 0));
        assert_eq!(library.blocks[0].title, "Sair");
        assert!(library.remove_block(0));
        assert!(!library.remove_block(3));
        assert_eq!(library.blocks.len(), 1);
    }
}
