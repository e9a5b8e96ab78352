//! Archive lifecycle: snapshot, restore, reset and clear.

use jiff::Timestamp;
use log::debug;

use super::list::remove_at;
use crate::models::Document;

impl Document {
    /// Moves the live content into the archive and starts a blank document.
    ///
    /// The snapshot is stamped with the current time and carries no archive
    /// of its own. Blank documents are not archived.
    pub fn archive_current(&mut self) -> bool {
        if self.is_blank() {
            debug!("Refusing to archive a blank template");
            return false;
        }
        let archived = std::mem::take(&mut self.archived);
        let mut snapshot = std::mem::take(self);
        snapshot.archived_at = Some(Timestamp::now());
        self.archived = archived;
        self.archived.push(snapshot);
        true
    }

    /// Makes the snapshot at `index` the live document.
    ///
    /// The previous live document, without its archive, is pushed to the
    /// front of the archive.
    pub fn restore_archived(&mut self, index: usize) -> bool {
        let Some(mut restored) = remove_at(&mut self.archived, index) else {
            return false;
        };
        let mut archived = std::mem::take(&mut self.archived);
        let previous = std::mem::take(self);
        if !previous.is_blank() {
            archived.insert(0, previous);
        }
        restored.archived = archived;
        restored.archived_at = None;
        *self = restored;
        true
    }

    pub fn remove_archived(&mut self, index: usize) -> bool {
        remove_at(&mut self.archived, index).is_some()
    }

    /// Clears the editor while keeping the archive.
    pub fn reset(&mut self) -> bool {
        let archived = std::mem::take(&mut self.archived);
        *self = Document {
            archived,
            ..Document::default()
        };
        true
    }

    /// Clears everything, including the archive.
    pub fn clear_all(&mut self) -> bool {
        *self = Document::default();
        true
    }
}
