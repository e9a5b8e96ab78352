//! Generic slot operations for the Workspace.

use std::sync::mpsc;

use log::debug;
use tokio::task;

use super::Workspace;
use crate::{
    db::{Database, Slotted},
    error::{QuireError, Result},
    store::DocumentStore,
};

/// Result of running an editing operation against a persisted model.
#[derive(Debug, Clone)]
pub struct Edit<T> {
    /// Whether the operation changed (and saved) the model
    pub applied: bool,
    /// The model after the operation
    pub model: T,
}

impl Workspace {
    /// Runs `work` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_database<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            work(&mut db)
        })
        .await
        .map_err(QuireError::join)?
    }

    /// Loads the model stored in `T`'s slot.
    pub async fn load<T>(&self) -> Result<T>
    where
        T: Slotted + Send + 'static,
    {
        self.with_database(|db| db.load::<T>()).await
    }

    /// Applies `operation` to the stored model and saves it when applied.
    ///
    /// Persistence is a [`DocumentStore`] subscriber; save failures are
    /// returned to the caller.
    pub async fn edit<T, F>(&self, operation: F) -> Result<Edit<T>>
    where
        T: Slotted + Clone + Send + 'static,
        F: FnOnce(&mut T) -> bool + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let mut store = DocumentStore::new(db.load::<T>()?);

            let (saved_tx, saved_rx) = mpsc::channel();
            store.subscribe(move |model: &T| {
                let _ = saved_tx.send(db.save(model));
            });

            let applied = store.update(operation);
            if !applied {
                debug!("Rejected {} edit", T::KIND);
            }
            saved_rx.try_iter().collect::<Result<Vec<()>>>()?;

            Ok(Edit {
                applied,
                model: store.into_document(),
            })
        })
        .await
        .map_err(QuireError::join)?
    }

    /// Replaces the stored model wholesale.
    pub async fn replace<T>(&self, model: T) -> Result<T>
    where
        T: Slotted + Clone + Send + 'static,
    {
        let edit = self
            .edit(move |current: &mut T| {
                *current = model;
                true
            })
            .await?;
        Ok(edit.model)
    }

    /// Deletes `T`'s slot so the next load starts blank.
    pub async fn clear<T>(&self) -> Result<bool>
    where
        T: Slotted + Send + 'static,
    {
        self.with_database(|db| db.clear::<T>()).await
    }
}
