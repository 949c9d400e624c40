//! Folder-by-folder navigation command.

use clap::Args;

use notesgpt_core::error::AppError;
use notesgpt_core::types::FolderId;
use notesgpt_service::{AppSession, LibrarySnapshot, NoteSource};

use super::folder::FolderRow;
use super::note::NoteRow;
use crate::output::{self, OutputFormat};

/// Arguments for the browse command
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Folder IDs to open one after another, starting at root
    pub path: Vec<FolderId>,
}

/// Execute the browse command
pub async fn execute(
    args: &BrowseArgs,
    session: &AppSession,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::require_login(session)?;
    let library = session.library();

    library.refresh().await;
    for id in &args.path {
        library.navigate_to_folder(Some(*id), None).await?;
        if let Some(error) = library.snapshot().await.error {
            return Err(super::failed(Some(error), "Failed to open folder"));
        }
    }

    let snapshot = library.snapshot().await;
    match format {
        OutputFormat::Json => output::print_json(&snapshot),
        OutputFormat::Table => print_listing(&snapshot, format),
    }

    Ok(())
}

/// Render the breadcrumb as `/ Work / Reports /`.
pub fn breadcrumb(snapshot: &LibrarySnapshot) -> String {
    let mut line = String::from("/");
    for crumb in snapshot.navigation.path() {
        line.push(' ');
        line.push_str(&crumb.name);
        line.push_str(" /");
    }
    line
}

fn print_listing(snapshot: &LibrarySnapshot, format: OutputFormat) {
    println!("{}\n", breadcrumb(snapshot));

    println!("Folders");
    let folders: Vec<FolderRow> = snapshot.folders.iter().map(FolderRow::from).collect();
    output::print_list(&folders, format);

    println!("\nNotes");
    if snapshot.note_source == NoteSource::LocalCache {
        output::print_warning("Backend unreachable; showing the last saved listing");
    }
    let notes: Vec<NoteRow> = snapshot.notes.iter().map(NoteRow::from).collect();
    output::print_list(&notes, format);
}
