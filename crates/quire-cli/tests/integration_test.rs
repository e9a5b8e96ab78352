//! Integration tests comparing CLI output with the core renderers
//!
//! The CLI and the MCP server both print through the core `Display` types
//! and render functions; these tests check that what the binary writes is
//! exactly what the library produces for the same stored template.

use std::{path::Path, process::Command};

use quire_core::{Outline, Workspace, WorkspaceBuilder, render_document};
use tempfile::TempDir;

/// Helper function to open the workspace the CLI writes to
async fn open_workspace(db_path: &Path) -> Workspace {
    WorkspaceBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to open workspace")
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &Path, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_q"));
    cmd.arg("--no-color").arg("--database-file").arg(db_path);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    assert!(
        output.status.success(),
        "q {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn build_template(db_path: &Path) {
    run_cli_command(db_path, &["set", "-t", "ACT_7", "-s", "Checkout", "-i", "Cart\nPayment"]);
    run_cli_command(db_path, &["criterion", "add", "Order is created"]);
    run_cli_command(db_path, &["criterion", "add", "Email is sent"]);
    run_cli_command(db_path, &["comment", "add", "Use the staging gateway"]);
    run_cli_command(db_path, &["step", "add", "Add an item (any)"]);
    run_cli_command(db_path, &["step", "divider"]);
    run_cli_command(db_path, &["step", "add", "Pay", "--critical", "-l", "0,1"]);
    run_cli_command(db_path, &["link", "add", "https://example.com/ACT_7", "-t", "Ticket"]);
    run_cli_command(db_path, &["env", "chrome"]);
    run_cli_command(db_path, &["env", "postgres"]);
}

/// `show --raw` prints the same Markdown the library renders
#[tokio::test]
async fn test_show_matches_render_document() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    build_template(&db_path);
    let cli_output = run_cli_command(&db_path, &["show", "--raw"]);

    let workspace = open_workspace(&db_path).await;
    let document = workspace.load_document().await.expect("Failed to load");
    let expected = render_document(&document, false);

    assert_eq!(cli_output, format!("{expected}\n"));
    assert!(expected.starts_with("# ACT\\_7\n"));
    assert!(expected.contains("## Impacto\n- Cart\n- Payment\n"));
}

/// `show --preview --raw` only adds the separator after the title
#[tokio::test]
async fn test_preview_matches_render_document() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    build_template(&db_path);
    let preview = run_cli_command(&db_path, &["show", "--preview", "--raw"]);
    let plain = run_cli_command(&db_path, &["show", "--raw"]);

    let workspace = open_workspace(&db_path).await;
    let document = workspace.load_document().await.expect("Failed to load");
    assert_eq!(preview, format!("{}\n", render_document(&document, true)));
    assert_eq!(
        preview.replacen("# ACT\\_7\n\n---\n\n", "# ACT\\_7\n\n", 1),
        plain
    );
}

/// `outline` prints the `Outline` display of the stored template
#[tokio::test]
async fn test_outline_display_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    build_template(&db_path);
    let cli_output = run_cli_command(&db_path, &["outline"]);

    let workspace = open_workspace(&db_path).await;
    let document = workspace.load_document().await.expect("Failed to load");
    let outline = Outline(&document).to_string();

    for line in outline.lines().filter(|line| !line.trim().is_empty()) {
        assert!(
            cli_output.contains(line.trim_start_matches('#').trim()),
            "missing outline line {line:?} in {cli_output:?}"
        );
    }
}

/// Edits made through the library are visible to the CLI
#[tokio::test]
async fn test_library_edits_visible_to_cli() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let workspace = open_workspace(&db_path).await;
    workspace
        .edit_document(|doc| doc.set_task_name("ACT-8") && doc.add_step("Open", false))
        .await
        .expect("Failed to edit");

    let cli_output = run_cli_command(&db_path, &["show", "--raw"]);
    assert!(cli_output.starts_with("# ACT-8\n"));
    assert!(cli_output.contains("## Passos de Teste\n1. Open\n"));
}
