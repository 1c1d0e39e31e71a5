//! CLI command definitions and dispatch.

pub mod node;
pub mod view;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use explorer_client::{ClientError, HttpTreeApi, TreeController};
use explorer_core::config::{AppConfig, ClientConfig};
use explorer_core::error::{AppError, ErrorKind};

use crate::output::OutputFormat;

/// File Explorer: browse and edit the folder tree from the terminal
#[derive(Debug, Parser)]
#[command(name = "explorer", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// API base URL, overriding `client.base_url` from the configuration
    #[arg(short, long)]
    pub url: Option<String>,

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
    /// Print the folder tree
    Tree,
    /// List nodes with their ids
    Ls(view::LsArgs),
    /// Create a folder
    Mkdir(node::CreateArgs),
    /// Create a file
    Touch(node::CreateArgs),
    /// Rename a folder or file
    Rename(node::RenameArgs),
    /// Delete a file, or a folder with everything inside it
    Rm(node::RmArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let controller = self.connect().await?;

        match &self.command {
            Commands::Tree => view::tree(&controller, self.format),
            Commands::Ls(args) => view::ls(&controller, args, self.format),
            Commands::Mkdir(args) => node::mkdir(&controller, args, self.format).await,
            Commands::Touch(args) => node::touch(&controller, args, self.format).await,
            Commands::Rename(args) => node::rename(&controller, args).await,
            Commands::Rm(args) => node::rm(&controller, args).await,
        }
    }

    /// Client settings from the configuration file, with the `--url` override.
    fn client_config(&self) -> Result<ClientConfig, AppError> {
        let mut client = AppConfig::load_from(&self.config)?.client;
        if let Some(url) = &self.url {
            client.base_url = url.clone();
        }
        Ok(client)
    }

    /// Build the controller and fetch the current tree.
    async fn connect(&self) -> Result<TreeController, AppError> {
        let config = self.client_config()?;
        let api = HttpTreeApi::new(&config)
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        tracing::debug!(base_url = api.base_url(), "Connecting to explorer API");

        let controller = TreeController::from_config(Arc::new(api), &config);
        controller
            .load()
            .await
            .map_err(|e| surfaced(&controller, e))?;
        Ok(controller)
    }
}

/// Turn a failed client call into the error the CLI reports, preferring
/// the notice the controller raised for it.
pub fn surfaced(controller: &TreeController, err: ClientError) -> AppError {
    let kind = match err.status().map(|s| s.as_u16()) {
        Some(400) => ErrorKind::Validation,
        Some(404) => ErrorKind::NotFound,
        Some(409) => ErrorKind::Conflict,
        Some(status) if status >= 500 => ErrorKind::Storage,
        _ => ErrorKind::Internal,
    };
    let message = controller.notice().unwrap_or_else(|| err.user_message());
    AppError::with_source(kind, message, err)
}
