//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notesgpt_client::NotesBackend;
use notesgpt_core::error::AppError;
use notesgpt_core::types::FolderId;
use notesgpt_entity::folder::Folder;
use notesgpt_service::AppSession;

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders under a parent (root by default)
    List {
        /// Parent folder ID
        #[arg(short, long)]
        parent: Option<FolderId>,
    },
    /// Create a folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<FolderId>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: FolderId,
        /// New name
        name: String,
    },
    /// Delete a folder
    Delete {
        /// Folder ID
        id: FolderId,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Ask a question about the notes in a folder
    Ask {
        /// Folder ID
        id: FolderId,
        /// Question
        question: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    /// Folder ID
    pub id: i64,
    /// Name
    pub name: String,
    /// Created at
    pub created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.get(),
            name: folder.name.clone(),
            created_at: folder
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    session: &AppSession,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::require_login(session)?;
    let library = session.library();

    match &args.command {
        FolderCommand::List { parent } => {
            let folders = session.backend().list_folders(*parent).await?;
            let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Create { name, parent } => {
            let Some(folder) = library.add_folder(name, *parent).await else {
                return Err(super::failed(
                    library.snapshot().await.error,
                    "Failed to create folder",
                ));
            };
            match format {
                OutputFormat::Json => output::print_json(&folder),
                OutputFormat::Table => output::print_success(&format!(
                    "Folder '{}' created (id: {})",
                    folder.name, folder.id
                )),
            }
        }
        FolderCommand::Rename { id, name } => {
            if !library.rename_folder(*id, name).await {
                return Err(super::failed(
                    library.snapshot().await.error,
                    "Failed to rename folder",
                ));
            }
            output::print_success(&format!("Folder {id} renamed to '{}'", name.trim()));
        }
        FolderCommand::Delete { id, yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete folder {id} and everything in it?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            if !library.remove_folder(*id).await {
                return Err(super::failed(
                    library.snapshot().await.error,
                    "Failed to delete folder",
                ));
            }
            output::print_success(&format!("Folder {id} deleted"));
        }
        FolderCommand::Ask { id, question } => {
            let answer = match library.query_folder(*id, question).await {
                Some(answer) => answer,
                None => {
                    return Err(super::failed(
                        library.snapshot().await.error,
                        "The question could not be answered",
                    ));
                }
            };
            match format {
                OutputFormat::Json => {
                    output::print_json(&serde_json::json!({ "folder_id": id, "answer": answer }))
                }
                OutputFormat::Table => println!("{answer}"),
            }
        }
    }

    Ok(())
}
