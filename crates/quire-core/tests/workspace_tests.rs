mod common;

use common::{create_test_environment, create_test_workspace};
use quire_core::{
    Database, QuireError, Slot, WorkspaceBuilder,
    handlers::{
        handle_add_criterion, handle_add_step, handle_archive_template, handle_remove_criterion,
        handle_render_diagram, handle_restore_archived, handle_set_environment,
        handle_set_fields, handle_show_template,
    },
    models::{BlockLibrary, KanbanField},
    params::{AddStep, Diagram, Environment, Position, Render, SetFields, Text},
};
use rusqlite::{Connection, params};

fn text(value: &str) -> Text {
    Text {
        text: value.to_string(),
    }
}

#[tokio::test]
async fn test_edits_persist_across_workspaces() {
    let (temp_dir, workspace) = create_test_workspace().await;

    let edit = workspace
        .edit_document(|doc| doc.set_task_name("ACT-1"))
        .await
        .expect("Failed to edit");
    assert!(edit.applied);
    assert_eq!(edit.model.task_name, "ACT-1");

    let reopened = WorkspaceBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to reopen workspace");
    let document = reopened.load_document().await.expect("Failed to load");
    assert_eq!(document.task_name, "ACT-1");
}

#[tokio::test]
async fn test_rejected_edit_is_not_saved() {
    let (temp_dir, workspace) = create_test_workspace().await;

    let edit = workspace
        .edit_document(|doc| doc.remove_step(3))
        .await
        .expect("Failed to run edit");
    assert!(!edit.applied);

    let db = Database::new(temp_dir.path().join("test.db")).expect("Failed to open database");
    assert!(db.read_slot(Slot::Template).unwrap().is_none());
}

#[tokio::test]
async fn test_remove_criterion_renumbers_rendered_links() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    handle_set_fields(
        &workspace,
        &SetFields {
            task_name: Some("ACT-1".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    handle_add_criterion(&workspace, &text("A")).await.unwrap();
    handle_add_criterion(&workspace, &text("B")).await.unwrap();
    let edit = handle_add_step(
        &workspace,
        &AddStep {
            text: "Open".to_string(),
            critical: false,
            criteria: vec![1],
        },
    )
    .await
    .unwrap();
    assert!(edit.applied);

    let before = handle_show_template(&workspace, &Render::default())
        .await
        .unwrap();
    assert!(before.contains("1. Open ⚠️ (2)"));

    let edit = handle_remove_criterion(&workspace, &Position { index: 0 })
        .await
        .unwrap();
    assert!(edit.applied);
    assert_eq!(edit.model.criteria, vec!["B".to_string()]);

    let after = handle_show_template(&workspace, &Render::default())
        .await
        .unwrap();
    assert!(after.contains("1. Open ⚠️ (1)"));
    assert!(after.contains("## Critérios de Aceitação\n1. B"));
}

#[tokio::test]
async fn test_add_step_with_dangling_link_is_rejected() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    let edit = handle_add_step(
        &workspace,
        &AddStep {
            text: "Open".to_string(),
            critical: true,
            criteria: vec![0],
        },
    )
    .await
    .unwrap();
    assert!(!edit.applied);
    assert!(edit.model.steps.is_empty());
}

#[tokio::test]
async fn test_validation_errors() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    let result = handle_set_fields(&workspace, &SetFields::default()).await;
    assert!(matches!(result, Err(QuireError::InvalidInput { .. })));

    let result = handle_set_environment(
        &workspace,
        &Environment {
            target: "netscape".to_string(),
            tested: true,
        },
    )
    .await;
    assert!(matches!(result, Err(QuireError::InvalidInput { field, .. }) if field == "target"));

    let edit = handle_set_environment(
        &workspace,
        &Environment {
            target: "edge".to_string(),
            tested: true,
        },
    )
    .await
    .unwrap();
    assert!(edit.model.browsers_tested.edge);
}

#[tokio::test]
async fn test_render_diagram_source_and_link() {
    let (_temp_dir, workspace) = create_test_workspace().await;
    workspace
        .edit_document(|doc| doc.set_task_name("ACT-2") && doc.add_step("Open", false))
        .await
        .unwrap();

    let source = handle_render_diagram(&workspace, &Diagram { link: false })
        .await
        .unwrap();
    assert!(source.starts_with("flowchart LR"));
    assert!(source.contains("S1[\"1. Open\"]"));

    let link = handle_render_diagram(&workspace, &Diagram { link: true })
        .await
        .unwrap();
    assert!(link.starts_with("https://kroki.io/mermaid/svg/"));
}

#[tokio::test]
async fn test_archive_and_restore() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    let edit = handle_archive_template(&workspace).await.unwrap();
    assert!(!edit.applied, "blank templates are not archived");

    workspace
        .edit_document(|doc| doc.set_task_name("OLD"))
        .await
        .unwrap();
    let edit = handle_archive_template(&workspace).await.unwrap();
    assert!(edit.applied);
    assert!(edit.model.task_name.is_empty());
    assert_eq!(edit.model.archived.len(), 1);
    assert!(edit.model.archived[0].archived_at.is_some());

    workspace
        .edit_document(|doc| doc.set_task_name("NEW"))
        .await
        .unwrap();
    let edit = handle_restore_archived(&workspace, &Position { index: 0 })
        .await
        .unwrap();
    assert!(edit.applied);
    assert_eq!(edit.model.task_name, "OLD");
    assert!(edit.model.archived_at.is_none());
    assert_eq!(edit.model.archived.len(), 1);
    assert_eq!(edit.model.archived[0].task_name, "NEW");

    let document = workspace.load_document().await.unwrap();
    assert_eq!(document, edit.model);
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let (temp_dir, workspace) = create_test_workspace().await;
    workspace
        .edit_document(|doc| {
            doc.set_task_name("ACT/3") && doc.add_criterion("A") && doc.add_step("Open", true)
        })
        .await
        .unwrap();
    let original = workspace.load_document().await.unwrap();

    let path = workspace
        .export_file(temp_dir.path())
        .await
        .expect("Failed to export");
    assert_eq!(path, temp_dir.path().join("ACT_3.json"));

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.starts_with("{\n  \"schemaVersion\": 2,"));

    workspace.edit_document(|doc| doc.clear_all()).await.unwrap();
    let imported = workspace.import_file(&path).await.expect("Failed to import");
    assert_eq!(imported, original);
    assert_eq!(workspace.load_document().await.unwrap(), original);
}

#[tokio::test]
async fn test_malformed_import_leaves_template_untouched() {
    let (temp_dir, workspace) = create_test_workspace().await;
    workspace
        .edit_document(|doc| doc.set_task_name("KEEP"))
        .await
        .unwrap();

    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let result = workspace.import_file(&path).await;
    assert!(matches!(result, Err(QuireError::Serialization { .. })));

    let future = temp_dir.path().join("future.json");
    std::fs::write(&future, r#"{"schemaVersion": 99, "taskName": "X"}"#).unwrap();
    let result = workspace.import_file(&future).await;
    assert!(matches!(
        result,
        Err(QuireError::UnsupportedSchema { found: 99, .. })
    ));

    let missing = workspace.import_file(temp_dir.path().join("missing.json")).await;
    assert!(matches!(missing, Err(QuireError::FileSystem { .. })));

    assert_eq!(workspace.load_document().await.unwrap().task_name, "KEEP");
}

#[tokio::test]
async fn test_kanban_and_blocks_use_separate_slots() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    workspace
        .edit_kanban(|kanban| kanban.set_field(KanbanField::ProblemDescription, "Crash"))
        .await
        .unwrap();
    workspace
        .edit_blocks(|library| library.add_block("Login", ["Open", "Submit"]))
        .await
        .unwrap();

    assert!(workspace.load_document().await.unwrap().is_blank());
    assert_eq!(
        workspace.load_kanban().await.unwrap().problem_description,
        "Crash"
    );
    let library = workspace.load_blocks().await.unwrap();
    assert_eq!(library.blocks.len(), 1);
    assert_eq!(library.blocks[0].steps.len(), 2);

    assert!(workspace.clear_kanban().await.unwrap());
    assert!(workspace.load_kanban().await.unwrap().problem_description.is_empty());
    assert_eq!(workspace.load_blocks().await.unwrap().blocks.len(), 1);

    workspace.clear_all().await.unwrap();
    assert_eq!(workspace.load_blocks().await.unwrap(), BlockLibrary::default());
}

#[tokio::test]
async fn test_legacy_slots_are_migrated_on_open() {
    let (_temp_dir, db_path) = create_test_environment();
    {
        let connection = Connection::open(&db_path).unwrap();
        connection
            .execute_batch(
                "CREATE TABLE slots (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL, \
                 updated_at TEXT NOT NULL);",
            )
            .unwrap();
        connection
            .execute(
                "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![
                    "blocos_personalizados",
                    r#"[{"titulo": "Login", "passos": [{"texto": "Abrir"}]}]"#,
                    "2024-01-01T00:00:00Z"
                ],
            )
            .unwrap();
        connection
            .execute(
                "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![
                    "template",
                    r#"{"nomeTarefa": "ACT-9", "criterios": ["A"], "passos": [{"texto": "Abrir", "criteriosVinculados": [0]}]}"#,
                    "2024-01-01T00:00:00Z"
                ],
            )
            .unwrap();
    }

    let workspace = WorkspaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();

    let library = workspace.load_blocks().await.unwrap();
    assert_eq!(library.blocks.len(), 1);
    assert_eq!(library.blocks[0].title, "Login");
    assert_eq!(library.blocks[0].steps[0].text, "Abrir");

    let document = workspace.load_document().await.unwrap();
    assert_eq!(document.task_name, "ACT-9");
    assert!(document.steps[0].linked_criteria.contains(&0));
}

#[tokio::test]
async fn test_unreadable_slot_falls_back_to_blank() {
    let (_temp_dir, db_path) = create_test_environment();
    let db = Database::new(&db_path).unwrap();
    db.write_slot(Slot::Template, "definitely not json").unwrap();
    drop(db);

    let workspace = WorkspaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    assert!(workspace.load_document().await.unwrap().is_blank());

    let edit = workspace
        .edit_document(|doc| doc.add_criterion("Recovered"))
        .await
        .unwrap();
    assert!(edit.applied);
    assert_eq!(
        workspace.load_document().await.unwrap().criteria,
        vec!["Recovered".to_string()]
    );
}
