//! CLI command definitions and dispatch.

pub mod auth;
pub mod browse;
pub mod folder;
pub mod note;
pub mod record;

use clap::{Parser, Subcommand};

use notesgpt_core::config::AppConfig;
use notesgpt_core::error::{AppError, ErrorKind};
use notesgpt_service::AppSession;

use crate::output::OutputFormat;

/// NotesGPT — voice notes, transcribed and summarized
#[derive(Debug, Parser)]
#[command(name = "notesgpt", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/notesgpt.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Account and session management
    Auth(auth::AuthArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// Note management
    Note(note::NoteArgs),
    /// Upload a recording for transcription and summarization
    Record(record::RecordArgs),
    /// Walk into nested folders and list the last one
    Browse(browse::BrowseArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let mut session = AppSession::new(&config).await?;
        session.start().await;

        let result = match &self.command {
            Commands::Auth(args) => auth::execute(args, &session, &config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &session, self.format).await,
            Commands::Note(args) => note::execute(args, &session, &config, self.format).await,
            Commands::Record(args) => record::execute(args, &session, self.format).await,
            Commands::Browse(args) => browse::execute(args, &session, self.format).await,
        };

        session.shutdown();
        result
    }
}

/// Helper: turn a failed service operation into a command error.
pub fn failed(error: Option<String>, fallback: &str) -> AppError {
    AppError::new(
        ErrorKind::RequestFailed,
        error.unwrap_or_else(|| fallback.to_string()),
    )
}

/// Helper: fail early when no session is stored.
pub fn require_login(session: &AppSession) -> Result<(), AppError> {
    if session.auth().status().is_authenticated() {
        Ok(())
    } else {
        Err(AppError::new(
            ErrorKind::Authentication,
            "Not logged in. Run `notesgpt auth login` first.",
        ))
    }
}
