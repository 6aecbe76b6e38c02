//! This is a command-line tool to manage a location database via [libmapping]
use crate::cli::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use libmapping::Database;
use tracing::debug;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Cli::parse();
    debug!(?args.database, "Opening database");
    let db = Database::open(&args.database)
        .await
        .with_context(|| format!("Unable to open database {:?}", args.database))?;
    commands::handle_command(args.command, &db).await
}
