//! Builder for creating and configuring Workspace instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Workspace;
use crate::{
    db::Database,
    error::{QuireError, Result},
};

/// Builder for creating and configuring Workspace instances.
#[derive(Debug, Clone)]
pub struct WorkspaceBuilder {
    database_path: Option<PathBuf>,
}

impl WorkspaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/quire/quire.db` or `~/.local/share/quire/quire.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured workspace.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::FileSystem` if the database directory cannot be created
    /// Returns `QuireError::Database` if database initialization fails
    pub async fn build(self) -> Result<Workspace> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| QuireError::file_system(parent, e))?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), QuireError>(())
        })
        .await
        .map_err(QuireError::join)??;

        Ok(Workspace::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("quire")
            .place_data_file("quire.db")
            .map_err(|e| QuireError::XdgDirectory(e.to_string()))
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
