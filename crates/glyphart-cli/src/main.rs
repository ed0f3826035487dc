//! Glyphart CLI - character art from the command line

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err}");
            eprintln!("Error: {}", err.user_message());
            ExitCode::FAILURE
        },
    }
}
