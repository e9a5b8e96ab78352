//! Command-line argument definitions using clap
//!
//! Argument structures wrap the core parameter types from
//! [`quire_core::params`]; clap-specific attributes (help text, aliases,
//! delimiters) stay here and every wrapper converts into its core type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Handlers
//! ```
//!
//! All positions are 0-based, exactly as printed by `q outline`.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use quire_core::params::{
    AddLink, AddStep, CodeBlockParams, Diagram, EditStep, EditText, Environment, KanbanText,
    LinkCriteria, MoveEntry, Position, Render, SetFields, Text,
};

/// Editor for QA test-report templates
///
/// Quire keeps one live test-report template (task name, scope, acceptance
/// criteria, test steps, preparations, code snippets, environment
/// checkboxes) and renders it as Markdown ready to paste into a ticket.
/// Completed templates can be archived and restored later. Run `q serve` to
/// expose the editor to AI assistants over MCP.
#[derive(Parser)]
#[command(version, about, name = "q")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/quire/quire.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Quire CLI
///
/// Without a command, `q` prints the rendered report.
#[derive(Subcommand)]
pub enum Commands {
    /// Render the template as Markdown
    Show(ShowArgs),
    /// List every section with the positions used by other commands
    #[command(alias = "o")]
    Outline,
    /// Set task name, scope, impact or the diagram flag
    Set(SetArgs),
    /// Manage acceptance criteria
    #[command(alias = "c")]
    Criterion {
        #[command(subcommand)]
        command: CriterionCommands,
    },
    /// Manage test steps
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage preparation groups
    #[command(alias = "p")]
    Prep {
        #[command(subcommand)]
        command: PrepCommands,
    },
    /// Manage attention comments
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Manage code blocks
    Code {
        #[command(subcommand)]
        command: CodeCommands,
    },
    /// Manage auxiliary links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Tick or untick a tested browser or database
    Env(EnvArgs),
    /// Print the Mermaid flowchart of the test steps
    Diagram(DiagramArgs),
    /// Move the current template into the archive and start a blank one
    Archive,
    /// Browse and restore archived templates
    Archived {
        #[command(subcommand)]
        command: ArchivedCommands,
    },
    /// Clear the template
    Clear(ClearArgs),
    /// Write the template (archive included) to a JSON file
    Export(ExportArgs),
    /// Replace the template with the contents of a JSON file
    Import(ImportArgs),
    /// Edit and render the Kanban card
    #[command(alias = "k")]
    Kanban {
        #[command(subcommand)]
        command: KanbanCommands,
    },
    /// Manage saved custom blocks
    #[command(alias = "b")]
    Block {
        #[command(subcommand)]
        command: BlockCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Template fields
// ============================================================================

/// Render the template as Markdown
#[derive(ClapArgs, Default)]
pub struct ShowArgs {
    /// Add a separator after the title, as in the preview pane
    #[arg(long)]
    pub preview: bool,

    /// Print the Markdown source instead of rendering it for the terminal
    #[arg(long)]
    pub raw: bool,
}

impl From<&ShowArgs> for Render {
    fn from(val: &ShowArgs) -> Self {
        Render {
            preview: val.preview,
        }
    }
}

/// Set scalar template fields
///
/// Only the options given are changed.
#[derive(ClapArgs)]
pub struct SetArgs {
    /// Task identifier used as the report title
    #[arg(short, long)]
    pub task_name: Option<String>,
    /// What is being tested
    #[arg(short, long)]
    pub scope: Option<String>,
    /// Expected impact, one bullet per line
    #[arg(short, long)]
    pub impact: Option<String>,
    /// Embed a hosted flowchart link in the report (true/false)
    #[arg(short, long)]
    pub diagram: Option<bool>,
}

impl From<SetArgs> for SetFields {
    fn from(val: SetArgs) -> Self {
        SetFields {
            task_name: val.task_name,
            scope: val.scope,
            impact: val.impact,
            make_diagram_available: val.diagram,
        }
    }
}

// ============================================================================
// Shared positional arguments
// ============================================================================

#[derive(ClapArgs)]
pub struct TextArgs {
    /// Text of the entry
    pub text: String,
}

impl From<TextArgs> for Text {
    fn from(val: TextArgs) -> Self {
        Text { text: val.text }
    }
}

#[derive(ClapArgs)]
pub struct EditTextArgs {
    #[arg(help = "0-based position of the entry")]
    pub index: usize,
    /// Replacement text
    pub text: String,
}

impl From<EditTextArgs> for EditText {
    fn from(val: EditTextArgs) -> Self {
        EditText {
            index: val.index,
            text: val.text,
        }
    }
}

#[derive(ClapArgs)]
pub struct PositionArgs {
    #[arg(help = "0-based position of the entry")]
    pub index: usize,
}

impl From<PositionArgs> for Position {
    fn from(val: PositionArgs) -> Self {
        Position { index: val.index }
    }
}

#[derive(ClapArgs)]
pub struct MoveArgs {
    #[arg(help = "Current 0-based position")]
    pub from: usize,
    #[arg(help = "Target 0-based position")]
    pub to: usize,
}

impl From<MoveArgs> for MoveEntry {
    fn from(val: MoveArgs) -> Self {
        MoveEntry {
            from: val.from,
            to: val.to,
        }
    }
}

// ============================================================================
// Criteria, steps, comments
// ============================================================================

#[derive(Subcommand)]
pub enum CriterionCommands {
    /// Append a criterion
    #[command(alias = "a")]
    Add(TextArgs),
    /// Replace the text of a criterion
    #[command(alias = "e")]
    Edit(EditTextArgs),
    /// Remove a criterion and renumber step links
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
    /// Move a criterion to another position
    #[command(alias = "mv")]
    Move(MoveArgs),
}

/// Append a test step
#[derive(ClapArgs)]
pub struct AddStepArgs {
    /// Instruction text of the step
    pub text: String,
    /// Mark the step as critical
    #[arg(short, long)]
    pub critical: bool,
    /// 0-based criteria the step verifies, comma-separated
    #[arg(short = 'l', long = "criteria", value_delimiter = ',')]
    pub criteria: Vec<usize>,
}

impl From<AddStepArgs> for AddStep {
    fn from(val: AddStepArgs) -> Self {
        AddStep {
            text: val.text,
            critical: val.critical,
            criteria: val.criteria,
        }
    }
}

/// Edit a test step
#[derive(ClapArgs)]
pub struct EditStepArgs {
    #[arg(help = "0-based position of the step")]
    pub index: usize,
    /// Replacement text
    #[arg(short, long)]
    pub text: Option<String>,
    /// Set or clear the critical flag (true/false)
    #[arg(short, long)]
    pub critical: Option<bool>,
}

impl From<EditStepArgs> for EditStep {
    fn from(val: EditStepArgs) -> Self {
        EditStep {
            index: val.index,
            text: val.text,
            critical: val.critical,
        }
    }
}

/// Replace the criteria linked to a step
#[derive(ClapArgs)]
pub struct LinkArgs {
    #[arg(help = "0-based position of the step")]
    pub index: usize,
    /// 0-based criteria, comma-separated; omit to clear the links
    #[arg(value_delimiter = ',')]
    pub criteria: Vec<usize>,
}

impl From<LinkArgs> for LinkCriteria {
    fn from(val: LinkArgs) -> Self {
        LinkCriteria {
            index: val.index,
            criteria: val.criteria,
        }
    }
}

#[derive(ClapArgs)]
pub struct ToggleArgs {
    #[arg(help = "0-based position of the step")]
    pub index: usize,
    #[arg(help = "0-based position of the criterion")]
    pub criterion: usize,
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a test step
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Append a stage divider
    #[command(alias = "d")]
    Divider,
    /// Edit the text or critical flag of a step
    #[command(alias = "e")]
    Edit(EditStepArgs),
    /// Replace the criteria linked to a step
    #[command(alias = "l")]
    Link(LinkArgs),
    /// Link or unlink a single criterion
    #[command(alias = "t")]
    Toggle(ToggleArgs),
    /// Move a step to another position
    #[command(alias = "mv")]
    Move(MoveArgs),
    /// Remove a step
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Append an attention comment
    #[command(alias = "a")]
    Add(TextArgs),
    /// Replace the text of a comment
    #[command(alias = "e")]
    Edit(EditTextArgs),
    /// Remove a comment
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
    /// Move a comment to another position
    #[command(alias = "mv")]
    Move(MoveArgs),
}

// ============================================================================
// Preparations and blocks
// ============================================================================

#[derive(ClapArgs)]
pub struct AddPrepArgs {
    /// Group title; defaults to "Preparativo N"
    #[arg(default_value = "")]
    pub title: String,
}

#[derive(ClapArgs)]
pub struct PrepStepArgs {
    #[arg(help = "0-based position of the preparation group")]
    pub group: usize,
    /// Text of the step
    pub text: String,
}

#[derive(ClapArgs)]
pub struct EditPrepStepArgs {
    #[arg(help = "0-based position of the preparation group")]
    pub group: usize,
    #[arg(help = "0-based position of the step within the group")]
    pub index: usize,
    /// Replacement text
    pub text: String,
}

#[derive(ClapArgs)]
pub struct RemovePrepStepArgs {
    #[arg(help = "0-based position of the preparation group")]
    pub group: usize,
    #[arg(help = "0-based position of the step within the group")]
    pub index: usize,
}

#[derive(ClapArgs)]
pub struct MovePrepStepArgs {
    #[arg(help = "0-based position of the preparation group")]
    pub group: usize,
    #[arg(help = "Current 0-based position")]
    pub from: usize,
    #[arg(help = "Target 0-based position")]
    pub to: usize,
}

#[derive(Subcommand)]
pub enum PrepCommands {
    /// Append a preparation group
    #[command(alias = "a")]
    Add(AddPrepArgs),
    /// Rename a preparation group
    Rename(EditTextArgs),
    /// Remove a preparation group
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
    /// Move a preparation group
    #[command(alias = "mv")]
    Move(MoveArgs),
    /// Append a step to a group
    AddStep(PrepStepArgs),
    /// Replace the text of a step in a group
    EditStep(EditPrepStepArgs),
    /// Remove a step from a group
    RemoveStep(RemovePrepStepArgs),
    /// Move a step within a group
    MoveStep(MovePrepStepArgs),
}

#[derive(ClapArgs)]
pub struct BlockArgs {
    /// Block title
    pub title: String,
    /// Block steps; repeat the flag for each step
    #[arg(short, long = "step")]
    pub steps: Vec<String>,
}

#[derive(ClapArgs)]
pub struct EditBlockArgs {
    #[arg(help = "0-based position of the block")]
    pub index: usize,
    /// Block title
    pub title: String,
    /// Block steps; repeat the flag for each step
    #[arg(short, long = "step")]
    pub steps: Vec<String>,
}

#[derive(Subcommand)]
pub enum BlockCommands {
    /// List saved blocks
    #[command(aliases = ["l", "ls"])]
    List,
    /// Save a new block
    #[command(alias = "a")]
    Add(BlockArgs),
    /// Replace the title and steps of a block
    #[command(alias = "e")]
    Edit(EditBlockArgs),
    /// Remove a saved block
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
    /// Move a saved block
    #[command(alias = "mv")]
    Move(MoveArgs),
    /// Append a block to the template as a preparation group
    #[command(alias = "i")]
    Insert(PositionArgs),
}

// ============================================================================
// Code blocks, links, environment
// ============================================================================

/// Append a code block
#[derive(ClapArgs)]
pub struct AddCodeArgs {
    /// Code content
    pub code: String,
    /// Caption shown above the block
    #[arg(short, long, default_value = "")]
    pub title: String,
    /// Fence language (sql, javascript, typescript, json, xml, html, css,
    /// bash, python, java, csharp, text)
    #[arg(short, long)]
    pub language: Option<String>,
}

impl From<AddCodeArgs> for CodeBlockParams {
    fn from(val: AddCodeArgs) -> Self {
        CodeBlockParams {
            title: val.title,
            language: val.language,
            code: val.code,
        }
    }
}

/// Replace a code block
#[derive(ClapArgs)]
pub struct EditCodeArgs {
    #[arg(help = "0-based position of the code block")]
    pub index: usize,
    #[command(flatten)]
    pub block: AddCodeArgs,
}

#[derive(Subcommand)]
pub enum CodeCommands {
    /// Append a code block
    #[command(alias = "a")]
    Add(AddCodeArgs),
    /// Replace a code block
    #[command(alias = "e")]
    Edit(EditCodeArgs),
    /// Remove a code block
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
    /// Move a code block
    #[command(alias = "mv")]
    Move(MoveArgs),
}

/// Append an auxiliary link
#[derive(ClapArgs)]
pub struct AddLinkArgs {
    /// Link target
    pub url: String,
    /// Link text; defaults to the URL
    #[arg(short, long, default_value = "")]
    pub title: String,
}

impl From<AddLinkArgs> for AddLink {
    fn from(val: AddLinkArgs) -> Self {
        AddLink {
            title: val.title,
            url: val.url,
        }
    }
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Append a link
    #[command(alias = "a")]
    Add(AddLinkArgs),
    /// Remove a link
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
    /// Move a link
    #[command(alias = "mv")]
    Move(MoveArgs),
}

/// Tick or untick a tested environment
#[derive(ClapArgs)]
pub struct EnvArgs {
    /// chrome, edge, sqlserver, oracle-iso, postgres or oracle-utf
    pub target: String,
    /// Untick instead of tick
    #[arg(long)]
    pub off: bool,
}

impl From<EnvArgs> for Environment {
    fn from(val: EnvArgs) -> Self {
        Environment {
            target: val.target,
            tested: !val.off,
        }
    }
}

#[derive(ClapArgs)]
pub struct DiagramArgs {
    /// Print the hosted diagram URL instead of the Mermaid source
    #[arg(long)]
    pub link: bool,
}

impl From<DiagramArgs> for Diagram {
    fn from(val: DiagramArgs) -> Self {
        Diagram { link: val.link }
    }
}

// ============================================================================
// Archive, clearing, transfer
// ============================================================================

#[derive(Subcommand)]
pub enum ArchivedCommands {
    /// List archived templates
    #[command(aliases = ["l", "ls"])]
    List,
    /// Make an archived template the live one
    #[command(alias = "u")]
    Restore(PositionArgs),
    /// Delete an archived template
    #[command(aliases = ["rm", "r"])]
    Remove(PositionArgs),
}

/// Clear the template
///
/// By default the live template is cleared and the archive is kept.
#[derive(ClapArgs)]
pub struct ClearArgs {
    /// Also delete the archive
    #[arg(long, conflicts_with = "everything")]
    pub all: bool,
    /// Delete every stored slot: template, archive, Kanban card and blocks
    #[arg(long)]
    pub everything: bool,
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    /// Target file or directory; a directory gets `{task name}.json`
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    /// JSON file produced by `q export` (legacy exports are migrated)
    pub path: PathBuf,
}

// ============================================================================
// Kanban
// ============================================================================

#[derive(ClapArgs)]
pub struct KanbanShowArgs {
    /// Render as a bug card (problem, reproduction steps, results)
    #[arg(long)]
    pub bug: bool,
}

#[derive(ClapArgs)]
pub struct KanbanSetArgs {
    /// problem, expected, actual, analysis, implementation or details
    pub field: String,
    /// New content; empty clears the field
    #[arg(default_value = "")]
    pub text: String,
}

impl From<KanbanSetArgs> for KanbanText {
    fn from(val: KanbanSetArgs) -> Self {
        KanbanText {
            field: val.field,
            text: val.text,
        }
    }
}

#[derive(Subcommand)]
pub enum KanbanCommands {
    /// Render the card text
    #[command(alias = "s")]
    Show(KanbanShowArgs),
    /// Set a text field
    Set(KanbanSetArgs),
    /// Append a reproduction step
    AddStep(TextArgs),
    /// Append a stage divider
    AddDivider,
    /// Replace the text of a reproduction step
    EditStep(EditTextArgs),
    /// Remove a reproduction step
    RemoveStep(PositionArgs),
    /// Move a reproduction step
    MoveStep(MoveArgs),
    /// Forget the card
    Clear,
}
