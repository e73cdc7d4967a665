//! hrdesk: CRUD and bulk spreadsheet transfer for HR document store
//! collections (Departments, Payrolls).

mod api;
mod cli;
mod config;
mod entity;
mod screen;
mod transfer;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = config::Config::load()?;
    let store: Arc<dyn api::DocumentStore> = Arc::new(api::HttpStore::new(&config)?);

    match cli.command {
        Commands::Department { command } => {
            cli::commands::department::handle(command, store, &config).await
        }
        Commands::Payroll { command } => {
            cli::commands::payroll::handle(command, store, &config).await
        }
    }
}
