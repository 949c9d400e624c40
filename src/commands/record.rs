//! Recording upload command.

use std::path::PathBuf;

use clap::Args;

use notesgpt_client::AudioUpload;
use notesgpt_core::error::AppError;
use notesgpt_core::types::FolderId;
use notesgpt_service::AppSession;

use crate::output::{self, OutputFormat};

/// Arguments for the record command
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Audio file to upload
    pub file: PathBuf,
    /// Note title
    #[arg(short, long, default_value = "Voice Note")]
    pub title: String,
    /// Custom summarization prompt
    #[arg(short, long)]
    pub prompt: Option<String>,
    /// Transcription language
    #[arg(short, long, default_value = "english")]
    pub language: String,
    /// Destination folder ID (root when omitted)
    #[arg(short, long)]
    pub folder: Option<FolderId>,
}

/// Execute the record command
pub async fn execute(
    args: &RecordArgs,
    session: &AppSession,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::require_login(session)?;
    let library = session.library();

    let mut upload = AudioUpload::new(&args.file)
        .with_title(args.title.clone())
        .with_language(args.language.clone())
        .in_folder(args.folder);
    if let Some(prompt) = &args.prompt {
        upload = upload.with_prompt(prompt.clone());
    }

    println!("Uploading {} ...", args.file.display());
    let Some(note) = library.record(upload).await else {
        return Err(super::failed(
            library.snapshot().await.error,
            "Failed to process recording",
        ));
    };

    match format {
        OutputFormat::Json => output::print_json(&note),
        OutputFormat::Table => {
            output::print_success(&format!("Note '{}' created (id: {})", note.title, note.id));
            if let Some(summary) = &note.summary {
                println!("\n{summary}");
            }
        }
    }

    Ok(())
}
