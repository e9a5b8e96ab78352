//! Command execution for the Quire CLI
//!
//! Each `handle_*` method converts its clap arguments into core parameters,
//! runs the shared handler (or the workspace operation for CLI-only
//! commands) and renders the outcome. Rejected edits are reported with an
//! error status and a non-zero exit code.

use anyhow::{Context, Result, bail};
use log::debug;
use quire_core::{
    ArchivedTemplates, BlockList, Edit, OperationStatus, Outline, Workspace,
    handlers::{
        handle_add_attention_comment, handle_add_code_block, handle_add_criterion,
        handle_add_divider, handle_add_external_link, handle_add_step, handle_archive_template,
        handle_edit_criterion, handle_edit_step, handle_link_criteria, handle_move_criterion,
        handle_move_step, handle_remove_archived, handle_remove_attention_comment,
        handle_remove_criterion, handle_remove_step, handle_render_diagram,
        handle_restore_archived, handle_set_environment, handle_set_fields, handle_show_outline,
        handle_show_template,
    },
    models::KanbanField,
    params::{CodeBlockParams, EditText, KanbanText, MoveEntry, Position, Render},
    render::KanbanReport,
};

use crate::{
    args::{
        ArchivedCommands, BlockCommands, ClearArgs, CodeCommands, CommentCommands,
        CriterionCommands, DiagramArgs, EnvArgs, ExportArgs, ImportArgs, KanbanCommands,
        LinkCommands, PrepCommands, SetArgs, ShowArgs, StepCommands,
    },
    renderer::TerminalRenderer,
};

/// Executes parsed commands against a workspace.
pub struct Cli {
    workspace: Workspace,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workspace: Workspace, renderer: TerminalRenderer) -> Self {
        Self {
            workspace,
            renderer,
        }
    }

    /// Reports the outcome of an edit; a rejected edit becomes an error.
    fn report<T>(&self, edit: &Edit<T>, action: &str) -> Result<()> {
        let status = OperationStatus::for_edit(edit.applied, action);
        if !edit.applied {
            bail!(status.message);
        }
        self.renderer.render(&status.to_string())
    }

    pub async fn show(&self, args: &ShowArgs) -> Result<()> {
        let markdown = handle_show_template(&self.workspace, &Render::from(args))
            .await
            .context("Failed to render template")?;
        if markdown.is_empty() {
            return self
                .renderer
                .render("The template is empty. Start with `q set --task-name <NAME>`.");
        }
        if args.raw {
            self.renderer.render_verbatim(&markdown)
        } else {
            self.renderer.render(&markdown)
        }
    }

    pub async fn outline(&self) -> Result<()> {
        let document = handle_show_outline(&self.workspace)
            .await
            .context("Failed to load template")?;
        self.renderer.render(&Outline(&document).to_string())
    }

    pub async fn set(&self, args: SetArgs) -> Result<()> {
        let edit = handle_set_fields(&self.workspace, &args.into())
            .await
            .context("Failed to update template fields")?;
        self.report(&edit, "Updated template fields")
    }

    pub async fn handle_criterion_command(&self, command: CriterionCommands) -> Result<()> {
        match command {
            CriterionCommands::Add(args) => {
                let edit = handle_add_criterion(&self.workspace, &args.into()).await?;
                let position = edit.model.criteria.len().saturating_sub(1);
                self.report(&edit, &format!("Added criterion {position}"))
            }
            CriterionCommands::Edit(args) => {
                let params: EditText = args.into();
                let edit = handle_edit_criterion(&self.workspace, &params).await?;
                self.report(&edit, &format!("Updated criterion {}", params.index))
            }
            CriterionCommands::Remove(args) => {
                let params: Position = args.into();
                let edit = handle_remove_criterion(&self.workspace, &params).await?;
                self.report(
                    &edit,
                    &format!("Removed criterion {} and renumbered step links", params.index),
                )
            }
            CriterionCommands::Move(args) => {
                let params: MoveEntry = args.into();
                let edit = handle_move_criterion(&self.workspace, &params).await?;
                self.report(
                    &edit,
                    &format!("Moved criterion {} to {}", params.from, params.to),
                )
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Add(args) => {
                let edit = handle_add_step(&self.workspace, &args.into()).await?;
                let position = edit.model.steps.len().saturating_sub(1);
                self.report(&edit, &format!("Added step {position}"))
            }
            StepCommands::Divider => {
                let edit = handle_add_divider(&self.workspace).await?;
                self.report(&edit, "Added divider")
            }
            StepCommands::Edit(args) => {
                let index = args.index;
                let edit = handle_edit_step(&self.workspace, &args.into()).await?;
                self.report(&edit, &format!("Updated step {index}"))
            }
            StepCommands::Link(args) => {
                let index = args.index;
                let edit = handle_link_criteria(&self.workspace, &args.into()).await?;
                self.report(&edit, &format!("Updated links of step {index}"))
            }
            StepCommands::Toggle(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.toggle_criterion_link(args.index, args.criterion))
                    .await?;
                self.report(
                    &edit,
                    &format!("Toggled criterion {} on step {}", args.criterion, args.index),
                )
            }
            StepCommands::Move(args) => {
                let params: MoveEntry = args.into();
                let edit = handle_move_step(&self.workspace, &params).await?;
                self.report(&edit, &format!("Moved step {} to {}", params.from, params.to))
            }
            StepCommands::Remove(args) => {
                let params: Position = args.into();
                let edit = handle_remove_step(&self.workspace, &params).await?;
                self.report(&edit, &format!("Removed step {}", params.index))
            }
        }
    }

    pub async fn handle_prep_command(&self, command: PrepCommands) -> Result<()> {
        let (edit, action) = match command {
            PrepCommands::Add(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.add_preparation(&args.title))
                    .await?;
                let position = edit.model.preparations.len().saturating_sub(1);
                (edit, format!("Added preparation group {position}"))
            }
            PrepCommands::Rename(args) => {
                let index = args.index;
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.rename_preparation(args.index, &args.text))
                    .await?;
                (edit, format!("Renamed preparation group {index}"))
            }
            PrepCommands::Remove(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.remove_preparation(args.index))
                    .await?;
                (edit, format!("Removed preparation group {}", args.index))
            }
            PrepCommands::Move(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.move_preparation(args.from, args.to))
                    .await?;
                (
                    edit,
                    format!("Moved preparation group {} to {}", args.from, args.to),
                )
            }
            PrepCommands::AddStep(args) => {
                let group = args.group;
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.add_preparation_step(args.group, &args.text))
                    .await?;
                (edit, format!("Added step to preparation group {group}"))
            }
            PrepCommands::EditStep(args) => {
                let (group, index) = (args.group, args.index);
                let edit = self
                    .workspace
                    .edit_document(move |doc| {
                        doc.edit_preparation_step(args.group, args.index, &args.text)
                    })
                    .await?;
                (
                    edit,
                    format!("Updated step {index} of preparation group {group}"),
                )
            }
            PrepCommands::RemoveStep(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.remove_preparation_step(args.group, args.index))
                    .await?;
                (
                    edit,
                    format!(
                        "Removed step {} of preparation group {}",
                        args.index, args.group
                    ),
                )
            }
            PrepCommands::MoveStep(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| {
                        doc.move_preparation_step(args.group, args.from, args.to)
                    })
                    .await?;
                (
                    edit,
                    format!(
                        "Moved step {} to {} in preparation group {}",
                        args.from, args.to, args.group
                    ),
                )
            }
        };
        self.report(&edit, &action)
    }

    pub async fn handle_comment_command(&self, command: CommentCommands) -> Result<()> {
        match command {
            CommentCommands::Add(args) => {
                let edit = handle_add_attention_comment(&self.workspace, &args.into()).await?;
                self.report(&edit, "Added attention comment")
            }
            CommentCommands::Edit(args) => {
                let index = args.index;
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.edit_attention_comment(args.index, &args.text))
                    .await?;
                self.report(&edit, &format!("Updated attention comment {index}"))
            }
            CommentCommands::Remove(args) => {
                let params: Position = args.into();
                let edit = handle_remove_attention_comment(&self.workspace, &params).await?;
                self.report(&edit, &format!("Removed attention comment {}", params.index))
            }
            CommentCommands::Move(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.move_attention_comment(args.from, args.to))
                    .await?;
                self.report(
                    &edit,
                    &format!("Moved attention comment {} to {}", args.from, args.to),
                )
            }
        }
    }

    pub async fn handle_code_command(&self, command: CodeCommands) -> Result<()> {
        match command {
            CodeCommands::Add(args) => {
                let edit = handle_add_code_block(&self.workspace, &args.into()).await?;
                self.report(&edit, "Added code block")
            }
            CodeCommands::Edit(args) => {
                let index = args.index;
                let params: CodeBlockParams = args.block.into();
                let language = params.validate()?;
                let edit = self
                    .workspace
                    .edit_document(move |doc| {
                        doc.edit_code_block(index, &params.title, language, &params.code)
                    })
                    .await?;
                self.report(&edit, &format!("Updated code block {index}"))
            }
            CodeCommands::Remove(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.remove_code_block(args.index))
                    .await?;
                self.report(&edit, &format!("Removed code block {}", args.index))
            }
            CodeCommands::Move(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.move_code_block(args.from, args.to))
                    .await?;
                self.report(
                    &edit,
                    &format!("Moved code block {} to {}", args.from, args.to),
                )
            }
        }
    }

    pub async fn handle_link_command(&self, command: LinkCommands) -> Result<()> {
        match command {
            LinkCommands::Add(args) => {
                let edit = handle_add_external_link(&self.workspace, &args.into()).await?;
                self.report(&edit, "Added link")
            }
            LinkCommands::Remove(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.remove_external_link(args.index))
                    .await?;
                self.report(&edit, &format!("Removed link {}", args.index))
            }
            LinkCommands::Move(args) => {
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.move_external_link(args.from, args.to))
                    .await?;
                self.report(&edit, &format!("Moved link {} to {}", args.from, args.to))
            }
        }
    }

    pub async fn env(&self, args: EnvArgs) -> Result<()> {
        let action = format!(
            "Marked {} as {}",
            args.target,
            if args.off { "not tested" } else { "tested" }
        );
        let edit = handle_set_environment(&self.workspace, &args.into()).await?;
        self.report(&edit, &action)
    }

    pub async fn diagram(&self, args: DiagramArgs) -> Result<()> {
        let output = handle_render_diagram(&self.workspace, &args.into())
            .await
            .context("Failed to render diagram")?;
        self.renderer.render_verbatim(&output)
    }

    pub async fn archive(&self) -> Result<()> {
        let edit = handle_archive_template(&self.workspace)
            .await
            .context("Failed to archive template")?;
        if !edit.applied {
            bail!("Nothing to archive: the template is empty");
        }
        self.report(
            &edit,
            &format!(
                "Archived template ({} in archive)",
                edit.model.archived.len()
            ),
        )
    }

    pub async fn handle_archived_command(&self, command: ArchivedCommands) -> Result<()> {
        match command {
            ArchivedCommands::List => {
                let document = self.workspace.load_document().await?;
                self.renderer
                    .render(&ArchivedTemplates(&document.archived).to_string())
            }
            ArchivedCommands::Restore(args) => {
                let params: Position = args.into();
                let edit = handle_restore_archived(&self.workspace, &params).await?;
                self.report(&edit, &format!("Restored archived template {}", params.index))
            }
            ArchivedCommands::Remove(args) => {
                let params: Position = args.into();
                let edit = handle_remove_archived(&self.workspace, &params).await?;
                self.report(&edit, &format!("Removed archived template {}", params.index))
            }
        }
    }

    pub async fn clear(&self, args: ClearArgs) -> Result<()> {
        if args.everything {
            self.workspace
                .clear_all()
                .await
                .context("Failed to clear stored data")?;
            return self
                .renderer
                .render(&OperationStatus::success("Cleared every stored slot").to_string());
        }

        let edit = if args.all {
            self.workspace.edit_document(|doc| doc.clear_all()).await?
        } else {
            self.workspace.edit_document(|doc| doc.reset()).await?
        };
        self.report(
            &edit,
            if args.all {
                "Cleared template and archive"
            } else {
                "Cleared template (archive kept)"
            },
        )
    }

    pub async fn export(&self, args: ExportArgs) -> Result<()> {
        let path = self
            .workspace
            .export_file(&args.path)
            .await
            .with_context(|| format!("Failed to export to {}", args.path.display()))?;
        self.renderer.render(
            &OperationStatus::success(format!("Exported template to {}", path.display()))
                .to_string(),
        )
    }

    pub async fn import(&self, args: ImportArgs) -> Result<()> {
        let document = self
            .workspace
            .import_file(&args.path)
            .await
            .with_context(|| format!("Failed to import {}", args.path.display()))?;
        self.renderer.render(
            &OperationStatus::success(format!(
                "Imported template with {} steps and {} archived templates",
                document.step_count(),
                document.archived.len()
            ))
            .to_string(),
        )
    }

    pub async fn handle_kanban_command(&self, command: KanbanCommands) -> Result<()> {
        let (edit, action) = match command {
            KanbanCommands::Show(args) => {
                let kanban = self.workspace.load_kanban().await?;
                let text = KanbanReport::new(&kanban, args.bug).to_string();
                return self.renderer.render_verbatim(&text);
            }
            KanbanCommands::Set(args) => {
                let params: KanbanText = args.into();
                let field: KanbanField = params.validate()?;
                let edit = self
                    .workspace
                    .edit_kanban(move |kanban| kanban.set_field(field, &params.text))
                    .await?;
                (edit, format!("Updated Kanban {}", field.as_str()))
            }
            KanbanCommands::AddStep(args) => {
                let edit = self
                    .workspace
                    .edit_kanban(move |kanban| kanban.add_step(&args.text))
                    .await?;
                (edit, "Added Kanban step".to_string())
            }
            KanbanCommands::AddDivider => {
                let edit = self
                    .workspace
                    .edit_kanban(|kanban| kanban.add_divider())
                    .await?;
                (edit, "Added Kanban divider".to_string())
            }
            KanbanCommands::EditStep(args) => {
                let index = args.index;
                let edit = self
                    .workspace
                    .edit_kanban(move |kanban| kanban.edit_step(args.index, &args.text))
                    .await?;
                (edit, format!("Updated Kanban step {index}"))
            }
            KanbanCommands::RemoveStep(args) => {
                let edit = self
                    .workspace
                    .edit_kanban(move |kanban| kanban.remove_step(args.index))
                    .await?;
                (edit, format!("Removed Kanban step {}", args.index))
            }
            KanbanCommands::MoveStep(args) => {
                let edit = self
                    .workspace
                    .edit_kanban(move |kanban| kanban.move_step(args.from, args.to))
                    .await?;
                (
                    edit,
                    format!("Moved Kanban step {} to {}", args.from, args.to),
                )
            }
            KanbanCommands::Clear => {
                let cleared = self.workspace.clear_kanban().await?;
                debug!("Kanban slot existed: {cleared}");
                return self
                    .renderer
                    .render(&OperationStatus::success("Cleared Kanban card").to_string());
            }
        };
        self.report(&edit, &action)
    }

    pub async fn handle_block_command(&self, command: BlockCommands) -> Result<()> {
        match command {
            BlockCommands::List => {
                let library = self.workspace.load_blocks().await?;
                self.renderer.render(&BlockList(&library.blocks).to_string())
            }
            BlockCommands::Add(args) => {
                let edit = self
                    .workspace
                    .edit_blocks(move |library| library.add_block(&args.title, &args.steps))
                    .await?;
                self.report(&edit, "Saved block")
            }
            BlockCommands::Edit(args) => {
                let index = args.index;
                let edit = self
                    .workspace
                    .edit_blocks(move |library| {
                        library.edit_block(args.index, &args.title, &args.steps)
                    })
                    .await?;
                self.report(&edit, &format!("Updated block {index}"))
            }
            BlockCommands::Remove(args) => {
                let edit = self
                    .workspace
                    .edit_blocks(move |library| library.remove_block(args.index))
                    .await?;
                self.report(&edit, &format!("Removed block {}", args.index))
            }
            BlockCommands::Move(args) => {
                let edit = self
                    .workspace
                    .edit_blocks(move |library| library.move_block(args.from, args.to))
                    .await?;
                self.report(&edit, &format!("Moved block {} to {}", args.from, args.to))
            }
            BlockCommands::Insert(args) => {
                let library = self.workspace.load_blocks().await?;
                let Some(block) = library.blocks.get(args.index).cloned() else {
                    bail!("No saved block at position {}", args.index);
                };
                let edit = self
                    .workspace
                    .edit_document(move |doc| doc.import_block(&block))
                    .await?;
                self.report(
                    &edit,
                    &format!("Inserted block {} as a preparation group", args.index),
                )
            }
        }
    }
}

