//! Note management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notesgpt_client::NotesBackend;
use notesgpt_core::config::AppConfig;
use notesgpt_core::error::AppError;
use notesgpt_core::types::{FolderId, NoteId, PageRequest};
use notesgpt_entity::note::{CreateNote, Note};
use notesgpt_service::AppSession;

use crate::output::{self, OutputFormat};

/// Arguments for note commands
#[derive(Debug, Args)]
pub struct NoteArgs {
    /// Note subcommand
    #[command(subcommand)]
    pub command: NoteCommand,
}

/// Note subcommands
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// List notes in a folder (root by default)
    List {
        /// Folder ID
        #[arg(short, long)]
        folder: Option<FolderId>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Show one note with its transcript and summary
    Show {
        /// Note ID
        id: NoteId,
    },
    /// Create a text note
    Create {
        /// Title
        title: String,
        /// Content
        content: String,
    },
    /// Move a note to another folder (root when --folder is omitted)
    Move {
        /// Note ID
        id: NoteId,
        /// Destination folder ID
        #[arg(short, long)]
        folder: Option<FolderId>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: NoteId,
    },
}

/// Note display row
#[derive(Debug, Serialize, Tabled)]
pub struct NoteRow {
    /// Note ID
    pub id: i64,
    /// Title
    pub title: String,
    /// Summary
    pub summary: String,
    /// Created at
    pub created_at: String,
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.get(),
            title: note.title.clone(),
            summary: output::excerpt(note.summary.as_deref(), 48),
            created_at: note.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute note commands
pub async fn execute(
    args: &NoteArgs,
    session: &AppSession,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::require_login(session)?;
    let backend = session.backend();
    let library = session.library();

    match &args.command {
        NoteCommand::List { folder, page } => {
            let page = PageRequest::new(*page, config.api.notes_page_size);
            let notes = backend.list_notes(page, *folder).await?;
            let rows: Vec<NoteRow> = notes.iter().map(NoteRow::from).collect();
            output::print_list(&rows, format);
        }
        NoteCommand::Show { id } => {
            let note = backend.get_note(*id).await?;
            match format {
                OutputFormat::Json => output::print_json(&note),
                OutputFormat::Table => print_note(&note),
            }
        }
        NoteCommand::Create { title, content } => {
            let request = CreateNote {
                title: title.clone(),
                content: content.clone(),
            };
            let note = backend.create_note(&request).await?;
            match format {
                OutputFormat::Json => output::print_json(&note),
                OutputFormat::Table => {
                    output::print_success(&format!("Note '{}' created (id: {})", note.title, note.id))
                }
            }
        }
        NoteCommand::Move { id, folder } => {
            if !library.move_recording(*id, *folder).await {
                return Err(super::failed(
                    library.snapshot().await.error,
                    "Failed to move note",
                ));
            }
            let destination = folder.map_or_else(|| "root".to_string(), |f| format!("folder {f}"));
            output::print_success(&format!("Note {id} moved to {destination}"));
        }
        NoteCommand::Delete { id } => {
            if !library.delete_recording(*id).await {
                return Err(super::failed(
                    library.snapshot().await.error,
                    "Failed to delete note",
                ));
            }
            output::print_success(&format!("Note {id} deleted"));
        }
    }

    Ok(())
}

fn print_note(note: &Note) {
    output::print_kv("ID", &note.id.to_string());
    output::print_kv("Title", &note.title);
    output::print_kv(
        "Folder",
        &note
            .folder_id
            .map_or_else(|| "root".to_string(), |f| f.to_string()),
    );
    output::print_kv("Audio", &note.audio_uri);
    output::print_kv(
        "Created",
        &note.created_at.format("%Y-%m-%d %H:%M").to_string(),
    );
    if let Some(summary) = &note.summary {
        println!("\nSummary:\n{summary}");
    }
    if let Some(transcript) = &note.transcript {
        println!("\nTranscript:\n{transcript}");
    }
}
