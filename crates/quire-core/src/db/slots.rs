//! Typed slot access with versioned payloads.

use std::fmt;

use log::{debug, warn};

use crate::{
    error::Result,
    models::{BlockLibrary, Document, KanbanDocument},
    schema::{self, Versioned},
};

/// Keyed storage locations, one per persisted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Template,
    Kanban,
    CustomBlocks,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Template, Slot::Kanban, Slot::CustomBlocks];

    pub fn key(&self) -> &'static str {
        match self {
            Slot::Template => "template",
            Slot::Kanban => "template-kanban",
            Slot::CustomBlocks => "custom-blocks",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A model persisted in a fixed [`Slot`].
pub trait Slotted: Versioned + Default {
    const SLOT: Slot;
}

impl Slotted for Document {
    const SLOT: Slot = Slot::Template;
}

impl Slotted for KanbanDocument {
    const SLOT: Slot = Slot::Kanban;
}

impl Slotted for BlockLibrary {
    const SLOT: Slot = Slot::CustomBlocks;
}

impl super::Database {
    /// Loads the model stored in its slot.
    ///
    /// Absent slots yield the empty model. Payloads that fail to decode are
    /// logged and also yield the empty model; storage errors propagate.
    pub fn load<T: Slotted>(&self) -> Result<T> {
        let Some(payload) = self.read_slot(T::SLOT)? else {
            debug!("Slot '{}' is empty, starting from a blank {}", T::SLOT, T::KIND);
            return Ok(T::default());
        };
        match schema::decode(&payload) {
            Ok(model) => Ok(model),
            Err(e) => {
                warn!("Ignoring unreadable slot '{}': {e}", T::SLOT);
                Ok(T::default())
            }
        }
    }

    /// Saves `model` into its slot as versioned JSON.
    pub fn save<T: Slotted>(&self, model: &T) -> Result<()> {
        let payload = schema::encode(model)?;
        self.write_slot(T::SLOT, &payload)
    }

    /// Removes the model's slot so the next load starts blank.
    pub fn clear<T: Slotted>(&self) -> Result<bool> {
        self.delete_slot(T::SLOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::Database, models::Step};

    #[test]
    fn test_missing_slot_loads_blank_model() {
        let db = Database::in_memory().unwrap();
        let document: Document = db.load().unwrap();
        assert_eq!(document, Document::default());
    }

    #[test]
    fn test_save_then_load() {
        let db = Database::in_memory().unwrap();
        let mut document = Document::default().with_task_name("ACT-1");
        document.steps.push(Step::new("a").with_links([0]));
        document.criteria.push("A".to_string());

        db.save(&document).unwrap();
        let loaded: Document = db.load().unwrap();
        assert_eq!(loaded, document);
        assert!(db.slot_updated_at(Slot::Template).unwrap().is_some());
    }

    #[test]
    fn test_unreadable_slot_falls_back_to_blank() {
        let db = Database::in_memory().unwrap();
        db.write_slot(Slot::Kanban, "{ not json").unwrap();
        let kanban: KanbanDocument = db.load().unwrap();
        assert_eq!(kanban, KanbanDocument::default());
    }

    #[test]
    fn test_legacy_payload_is_migrated_on_load() {
        let db = Database::in_memory().unwrap();
        db.write_slot(Slot::Template, r#"{"nomeTarefa":"ACT-7","criterios":null}"#)
            .unwrap();
        let document: Document = db.load().unwrap();
        assert_eq!(document.task_name, "ACT-7");
        assert!(document.criteria.is_empty());
    }

    #[test]
    fn test_current_payload_with_null_and_mistyped_fields_keeps_content() {
        let db = Database::in_memory().unwrap();
        db.write_slot(
            Slot::Template,
            r#"{"schemaVersion":2,"taskName":"ACT-8","scope":5,"criteria":null,"steps":[{"text":"open","linkedCriteria":null}]}"#,
        )
        .unwrap();

        let document: Document = db.load().unwrap();
        assert_eq!(document.task_name, "ACT-8");
        assert_eq!(document.scope, "");
        assert!(document.criteria.is_empty());
        assert_eq!(document.steps.len(), 1);
        assert_eq!(document.steps[0].text, "open");
    }

    #[test]
    fn test_slots_are_independent() {
        let mut db = Database::in_memory().unwrap();
        db.save(&Document::default().with_task_name("ACT-1")).unwrap();
        let mut kanban = KanbanDocument::default();
        kanban.details = "notes".to_string();
        db.save(&kanban).unwrap();

        assert!(db.clear::<KanbanDocument>().unwrap());
        assert!(!db.clear::<KanbanDocument>().unwrap());
        assert_eq!(db.load::<Document>().unwrap().task_name, "ACT-1");

        db.delete_all_slots().unwrap();
        assert!(db.read_slot(Slot::Template).unwrap().is_none());
    }
}
