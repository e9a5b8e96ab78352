//! Database schema initialization and migrations.

use log::info;
use rusqlite::params;

use super::Slot;
use crate::error::{DatabaseResultExt, Result};

/// Slot keys written by earlier releases.
const LEGACY_SLOT_KEYS: [(&str, Slot); 1] = [("blocos_personalizados", Slot::CustomBlocks)];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Renames slots written under legacy keys, unless the current key is
    /// already taken.
    fn apply_migrations(&self) -> Result<()> {
        for (legacy_key, slot) in LEGACY_SLOT_KEYS {
            let renamed = self
                .connection
                .execute(
                    "UPDATE slots SET key = ?1 WHERE key = ?2 \
                     AND NOT EXISTS (SELECT 1 FROM slots WHERE key = ?1)",
                    params![slot.key(), legacy_key],
                )
                .db_context("Failed to migrate legacy slot key")?;
            if renamed > 0 {
                info!("Migrated legacy slot '{legacy_key}' to '{}'", slot.key());
            }
        }
        Ok(())
    }
}
