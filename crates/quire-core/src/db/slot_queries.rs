//! Raw slot reads and writes.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, params, types::Type};

use super::Slot;
use crate::error::{DatabaseResultExt, QuireError, Result};

const SELECT_SLOT_SQL: &str = "SELECT value FROM slots WHERE key = ?1";
const SELECT_SLOT_UPDATED_AT_SQL: &str = "SELECT updated_at FROM slots WHERE key = ?1";
const UPSERT_SLOT_SQL: &str = "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_SLOT_SQL: &str = "DELETE FROM slots WHERE key = ?1";

impl super::Database {
    /// Reads the raw payload stored in `slot`, if any.
    pub fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SLOT_SQL, params![slot.key()], |row| row.get(0))
            .optional()
            .db_context("Failed to read slot")
    }

    /// When `slot` was last written.
    pub fn slot_updated_at(&self, slot: Slot) -> Result<Option<Timestamp>> {
        self.connection
            .query_row(SELECT_SLOT_UPDATED_AT_SQL, params![slot.key()], |row| {
                row.get::<_, String>(0)?
                    .parse::<Timestamp>()
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
            })
            .optional()
            .db_context("Failed to read slot timestamp")
    }

    /// Stores `value` in `slot`, replacing any previous payload.
    pub fn write_slot(&self, slot: Slot, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_SLOT_SQL, params![slot.key(), value, now])
            .map_err(|e| QuireError::database("Failed to write slot").with_source(e))?;
        Ok(())
    }

    /// Deletes `slot`. Returns whether a payload was present.
    pub fn delete_slot(&self, slot: Slot) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_SLOT_SQL, params![slot.key()])
            .db_context("Failed to delete slot")?;
        Ok(deleted > 0)
    }

    /// Deletes every slot in one transaction.
    pub fn delete_all_slots(&mut self) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        for slot in Slot::ALL {
            tx.execute(DELETE_SLOT_SQL, params![slot.key()])
                .db_context("Failed to delete slot")?;
        }
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
