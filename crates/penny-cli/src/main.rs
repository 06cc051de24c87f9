//! Penny CLI - Conversational personal finance tracker
//!
//! Usage:
//!   penny init                Initialize database with sample data
//!   penny chat                Talk to the assistant ("I spent $50 on groceries")
//!   penny ask "TEXT"          Route a single utterance
//!   penny report monthly      Generate a monthly report

mod cli;
mod commands;
mod console;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Chat => commands::cmd_chat(&cli.db, &cli.reports_dir),
        Commands::Ask { text } => commands::cmd_ask(&cli.db, &cli.reports_dir, &text.join(" ")),
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Transactions { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_transactions_list(&db, limit)
        }
        Commands::Chart { kind } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_chart(&db, &cli.reports_dir, kind)
        }
        Commands::Report { kind } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_report(&db, &cli.reports_dir, kind)
        }
        Commands::Export { format } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &cli.reports_dir, &format)
        }
    }
}
