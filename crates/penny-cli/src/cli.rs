//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Penny - talk to your ledger
#[derive(Parser)]
#[command(name = "penny")]
#[command(about = "Conversational personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "data/finance.db", global = true)]
    pub db: PathBuf,

    /// Directory for generated charts, reports, and exports
    #[arg(long, default_value = "data/reports", global = true)]
    pub reports_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed sample data
    Init,

    /// Start an interactive conversation
    Chat,

    /// Route a single utterance and print the reply
    Ask {
        /// The utterance, e.g. "I spent $50 on groceries"
        text: Vec<String>,
    },

    /// Show database status
    Status,

    /// List recent transactions
    Transactions {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Render a chart into the reports directory
    Chart {
        #[command(subcommand)]
        kind: ChartKind,
    },

    /// Generate a document report
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },

    /// Export all data
    Export {
        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ChartKind {
    /// Spending by category
    Spending,
    /// Income vs expenses
    Balance,
    /// Budget vs actual spending
    Budget,
}

#[derive(Subcommand)]
pub enum ReportKind {
    /// Monthly report (defaults to the current month)
    Monthly {
        /// Report year
        #[arg(long)]
        year: Option<i32>,

        /// Report month (1-12)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Tax deduction summary (defaults to the current year)
    Tax {
        /// Summary year
        #[arg(long)]
        year: Option<i32>,
    },
}
