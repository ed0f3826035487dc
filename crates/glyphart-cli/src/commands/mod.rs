//! Subcommand implementations

pub mod generate;
pub mod info;

use std::path::PathBuf;
use std::sync::Arc;

use glyphart::{
    error::GlyphartError,
    traits::{EventHandler, Subscription},
    CoordinatorConfig, GenerationCoordinator,
};
use thiserror::Error;

use crate::cli::{Cli, Commands};

/// Anything that can stop a CLI run
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error(transparent)]
    Generation(#[from] GlyphartError),
}

impl CliError {
    /// What to tell the person at the terminal
    pub fn user_message(&self) -> String {
        match self {
            CliError::Generation(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fonts => {
            info::fonts();
            Ok(())
        },
        Commands::Charsets => {
            info::charsets();
            Ok(())
        },
        command => {
            let coordinator = GenerationCoordinator::builder()
                .config(CoordinatorConfig::from_env())
                .build()?;
            let _subscription = cli.events.then(|| echo_events(&coordinator));

            match command {
                Commands::Text(args) => generate::text(&coordinator, args).await,
                Commands::Image(args) => generate::image(&coordinator, args).await,
                Commands::Poem(args) => generate::poem(&coordinator, args).await,
                Commands::Fonts | Commands::Charsets => Ok(()),
            }
        },
    }
}

/// Mirror every event to stderr, one JSON object per line
fn echo_events(coordinator: &GenerationCoordinator) -> Subscription {
    let handler: EventHandler = Arc::new(|event: &str, payload: &serde_json::Value| {
        eprintln!("{}", serde_json::json!({ "event": event, "payload": payload }));
    });
    coordinator.notifier().subscribe("*", handler)
}
