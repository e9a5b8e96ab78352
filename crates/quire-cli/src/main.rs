//! Quire CLI Application
//!
//! Command-line editor and MCP server for QA test-report templates.

mod args;
mod cli;
mod mcp;
mod renderer;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands, ShowArgs};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{QuireMcpServer, run_stdio_server};
use quire_core::WorkspaceBuilder;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let workspace = WorkspaceBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize workspace")?;

    info!("Quire started with {}", workspace.database_path().display());

    let renderer = TerminalRenderer::new(!no_color);
    match command.unwrap_or_else(|| Show(ShowArgs::default())) {
        Serve => {
            info!("Starting Quire MCP server");
            run_stdio_server(QuireMcpServer::new(workspace))
                .await
                .context("MCP server failed")
        }
        Show(args) => Cli::new(workspace, renderer).show(&args).await,
        Outline => Cli::new(workspace, renderer).outline().await,
        Set(args) => Cli::new(workspace, renderer).set(args).await,
        Criterion { command } => {
            Cli::new(workspace, renderer)
                .handle_criterion_command(command)
                .await
        }
        Step { command } => Cli::new(workspace, renderer).handle_step_command(command).await,
        Prep { command } => Cli::new(workspace, renderer).handle_prep_command(command).await,
        Comment { command } => Cli::new(workspace, renderer).handle_comment_command(command).await,
        Code { command } => Cli::new(workspace, renderer).handle_code_command(command).await,
        Link { command } => Cli::new(workspace, renderer).handle_link_command(command).await,
        Env(args) => Cli::new(workspace, renderer).env(args).await,
        Diagram(args) => Cli::new(workspace, renderer).diagram(args).await,
        Archive => Cli::new(workspace, renderer).archive().await,
        Archived { command } => {
            Cli::new(workspace, renderer)
                .handle_archived_command(command)
                .await
        }
        Clear(args) => Cli::new(workspace, renderer).clear(args).await,
        Export(args) => Cli::new(workspace, renderer).export(args).await,
        Import(args) => Cli::new(workspace, renderer).import(args).await,
        Kanban { command } => Cli::new(workspace, renderer).handle_kanban_command(command).await,
        Block { command } => Cli::new(workspace, renderer).handle_block_command(command).await,
    }
}
