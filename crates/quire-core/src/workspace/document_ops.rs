//! Template, Kanban and block operations for the Workspace.

use std::path::{Path, PathBuf};

use log::info;

use super::{Edit, Workspace};
use crate::{
    error::{QuireError, Result},
    models::{BlockLibrary, Document, KanbanDocument},
    transfer,
};

impl Workspace {
    /// Loads the live template (blank when nothing was saved yet).
    pub async fn load_document(&self) -> Result<Document> {
        self.load::<Document>().await
    }

    /// Applies an editing operation to the live template.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use quire_core::WorkspaceBuilder;
    /// # async {
    /// let workspace = WorkspaceBuilder::new().build().await?;
    /// let edit = workspace
    ///     .edit_document(|doc| doc.remove_criterion_and_relink(0))
    ///     .await?;
    /// println!("applied: {}", edit.applied);
    /// # Result::<(), quire_core::QuireError>::Ok(())
    /// # };
    /// ```
    pub async fn edit_document<F>(&self, operation: F) -> Result<Edit<Document>>
    where
        F: FnOnce(&mut Document) -> bool + Send + 'static,
    {
        self.edit(operation).await
    }

    /// Replaces the live template, archive included.
    pub async fn replace_document(&self, document: Document) -> Result<Document> {
        self.replace(document).await
    }

    pub async fn load_kanban(&self) -> Result<KanbanDocument> {
        self.load::<KanbanDocument>().await
    }

    pub async fn edit_kanban<F>(&self, operation: F) -> Result<Edit<KanbanDocument>>
    where
        F: FnOnce(&mut KanbanDocument) -> bool + Send + 'static,
    {
        self.edit(operation).await
    }

    /// Forgets the Kanban card. The template is untouched.
    pub async fn clear_kanban(&self) -> Result<bool> {
        self.clear::<KanbanDocument>().await
    }

    pub async fn load_blocks(&self) -> Result<BlockLibrary> {
        self.load::<BlockLibrary>().await
    }

    pub async fn edit_blocks<F>(&self, operation: F) -> Result<Edit<BlockLibrary>>
    where
        F: FnOnce(&mut BlockLibrary) -> bool + Send + 'static,
    {
        self.edit(operation).await
    }

    /// Deletes every slot: template, archive, Kanban card and saved blocks.
    pub async fn clear_all(&self) -> Result<()> {
        self.with_database(|db| db.delete_all_slots()).await?;
        info!("Cleared every slot in {}", self.db_path.display());
        Ok(())
    }

    /// Reads an exported template from `path` and makes it the live one.
    ///
    /// The file is fully parsed before anything is written; a malformed
    /// payload leaves the stored template untouched.
    pub async fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| QuireError::file_system(path, e))?;
        let document = transfer::import_json(&text)?;
        info!("Importing template from {}", path.display());
        self.replace_document(document).await
    }

    /// Writes the live template to `target` as pretty-printed JSON.
    ///
    /// When `target` is a directory, the file name is derived from the task
    /// name. Returns the path written.
    pub async fn export_file<P: AsRef<Path>>(&self, target: P) -> Result<PathBuf> {
        let document = self.load_document().await?;
        let target = target.as_ref();
        let path = if tokio::fs::metadata(target)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            target.join(transfer::export_file_name(&document))
        } else {
            target.to_path_buf()
        };

        let json = transfer::export_json(&document)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| QuireError::file_system(&path, e))?;
        info!("Exported template to {}", path.display());
        Ok(path)
    }
}
