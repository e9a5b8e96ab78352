//! Main procedure operations: steps, dividers and criterion links.

use std::collections::BTreeSet;

use log::debug;

use super::list::{clean_text, move_item, remove_at};
use crate::models::{Document, Step};

impl Document {
    /// Appends a normal step with the trimmed `text`.
    pub fn add_step(&mut self, text: &str, critical: bool) -> bool {
        let Some(text) = clean_text(text) else {
            return false;
        };
        let mut step = Step::new(text);
        step.is_critical = critical;
        self.steps.push(step);
        true
    }

    /// Appends a stage divider.
    pub fn add_divider(&mut self) -> bool {
        self.steps.push(Step::divider());
        true
    }

    /// Rewrites a normal step's text and critical flag.
    ///
    /// Dividers cannot be edited; their label is fixed.
    pub fn edit_step(&mut self, index: usize, text: &str, critical: bool) -> bool {
        let Some(text) = clean_text(text) else {
            return false;
        };
        match self.steps.get_mut(index) {
            Some(step) if !step.is_divider => {
                step.text = text;
                step.is_critical = critical;
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

    /// Replaces the set of criteria linked to the step at `index`.
    ///
    /// Rejected for dividers and for positions that do not name an existing
    /// criterion. An empty set clears the links.
    pub fn link_criteria(
        &mut self,
        index: usize,
        criteria: impl IntoIterator<Item = usize>,
    ) -> bool {
        let criteria: BTreeSet<usize> = criteria.into_iter().collect();
        if let Some(dangling) = criteria.iter().find(|&&c| c >= self.criteria.len()) {
            debug!("Rejecting link to missing criterion {dangling}");
            return false;
        }
        match self.steps.get_mut(index) {
            Some(step) if !step.is_divider => {
                step.linked_criteria = criteria;
                true
            }
            _ => false,
        }
    }

    /// Links or unlinks a single criterion on the step at `index`.
    pub fn toggle_criterion_link(&mut self, index: usize, criterion: usize) -> bool {
        if criterion >= self.criteria.len() {
            return false;
        }
        match self.steps.get_mut(index) {
            Some(step) if !step.is_divider => {
                if !step.linked_criteria.remove(&criterion) {
                    step.linked_criteria.insert(criterion);
                }
                true
            }
            _ => false,
        }
    }
}
