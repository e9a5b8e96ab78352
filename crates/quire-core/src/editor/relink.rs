//! Criteria removal paired with step link correction.

use std::collections::BTreeSet;

use super::list::remove_at;
use crate::models::{Document, Step};

impl Document {
    /// Removes the criterion at `position` and rewrites every step's links
    /// in the same update.
    ///
    /// Links equal to `position` are dropped, links above it are shifted
    /// down by one and links below it are untouched. Out-of-range positions
    /// leave the document unchanged.
    pub fn remove_criterion_and_relink(&mut self, position: usize) -> bool {
        if remove_at(&mut self.criteria, position).is_none() {
            return false;
        }
        for step in &mut self.steps {
            relink_step(step, position);
        }
        true
    }
}

fn relink_step(step: &mut Step, removed: usize) {
    step.linked_criteria = step
        .linked_criteria
        .iter()
        .filter(|&&index| index != removed)
        .map(|&index| if index > removed { index - 1 } else { index })
        .collect::<BTreeSet<_>>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(step: &Step) -> Vec<usize> {
        step.linked_criteria.iter().copied().collect()
    }

    #[test]
    fn test_remove_first_criterion_shifts_links() {
        let mut document = Document::default();
        document.criteria = vec!["A".to_string(), "B".to_string()];
        document.steps.push(Step::new("do X").with_links([1]));

        assert!(document.remove_criterion_and_relink(0));
        assert_eq!(document.criteria, vec!["B"]);
        assert_eq!(links(&document.steps[0]), vec![0]);
    }

    #[test]
    fn test_relink_drops_equal_and_keeps_lower() {
        let mut document = Document::default();
        document.criteria = ["A", "B", "C", "D"].map(String::from).to_vec();
        document.steps = vec![
            Step::new("one").with_links([0, 1, 3]),
            Step::new("two").with_links([1]),
            Step::new("three").with_links([0, 2]),
        ];

        assert!(document.remove_criterion_and_relink(1));
        assert_eq!(document.criteria, vec!["A", "C", "D"]);
        assert_eq!(links(&document.steps[0]), vec![0, 2]);
        assert!(links(&document.steps[1]).is_empty());
        assert_eq!(links(&document.steps[2]), vec![0, 1]);
    }

    #[test]
    fn test_relink_keeps_dangling_links_consistent() {
        let mut document = Document::default();
        document.criteria = vec!["A".to_string()];
        document.steps.push(Step::new("x").with_links([5]));

        assert!(document.remove_criterion_and_relink(0));
        assert_eq!(links(&document.steps[0]), vec![4]);
    }

    #[test]
    fn test_out_of_range_removal_is_noop() {
        let mut document = Document::default();
        document.criteria = vec!["A".to_string()];
        document.steps.push(Step::new("x").with_links([0]));
        let before = document.clone();

        assert!(!document.remove_criterion_and_relink(1));
        assert_eq!(document, before);
    }
}
