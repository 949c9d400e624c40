//! Account and session CLI commands.

use clap::{Args, Subcommand};

use notesgpt_core::config::AppConfig;
use notesgpt_core::error::AppError;
use notesgpt_service::AppSession;

use crate::output::{self, OutputFormat};

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and store the session token
    Login {
        /// Account email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Account email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Activate an account with the emailed token
    Activate {
        /// Activation token
        token: String,
    },
    /// Show the session state
    Status,
}

/// Execute auth commands
pub async fn execute(
    args: &AuthArgs,
    session: &AppSession,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let auth = session.auth();

    match &args.command {
        AuthCommand::Login { email, password } => {
            let email = text_or_prompt(email.as_deref(), "Email")?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            if !auth.login(&email, &password).await {
                return Err(super::failed(auth.snapshot().await.error, "Login failed"));
            }
            output::print_success(&format!("Logged in as {email}"));
        }
        AuthCommand::Logout => {
            if auth.logout().await {
                output::print_success("Logged out");
            } else {
                output::print_warning("Logged out, but the stored token could not be removed");
            }
        }
        AuthCommand::Register {
            name,
            email,
            password,
        } => {
            let name = text_or_prompt(name.as_deref(), "Name")?;
            let email = text_or_prompt(email.as_deref(), "Email")?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            if !auth.register(&name, &email, &password).await {
                return Err(super::failed(
                    auth.snapshot().await.error,
                    "Registration failed",
                ));
            }
            output::print_success(&format!(
                "Account created for {email}. Check your inbox for the activation token."
            ));
        }
        AuthCommand::Activate { token } => {
            if !auth.activate(token.trim()).await {
                return Err(super::failed(auth.snapshot().await.error, "Activation failed"));
            }
            output::print_success("Account activated. You can log in now.");
        }
        AuthCommand::Status => {
            let snapshot = auth.snapshot().await;
            match format {
                OutputFormat::Json => output::print_json(&snapshot),
                OutputFormat::Table => {
                    output::print_kv("Backend", &config.api.base_url);
                    output::print_kv("Status", &snapshot.status.to_string());
                    if let Some(user) = &snapshot.user {
                        output::print_kv("User", &format!("{} <{}>", user.name, user.email));
                    }
                    if let Some(error) = &snapshot.error {
                        output::print_kv("Last error", error);
                    }
                }
            }
        }
    }

    Ok(())
}

fn text_or_prompt(value: Option<&str>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}
