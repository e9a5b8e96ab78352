use std::path::PathBuf;

use quire_core::{Workspace, WorkspaceBuilder};
use tempfile::TempDir;

/// Helper function to create a workspace backed by a temporary database
pub async fn create_test_workspace() -> (TempDir, Workspace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workspace = WorkspaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workspace");
    (temp_dir, workspace)
}

/// Helper function to create a temporary directory and database path
#[allow(dead_code)]
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    (temp_dir, db_path)
}
