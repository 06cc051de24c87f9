//! Core commands (init) and shared utilities (open_db)

use std::path::Path;

use anyhow::{Context, Result};
use penny_core::Database;

/// Open the database, creating it (and parent directories) if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;
    db.seed_sample_data()?;

    println!("✅ Database initialized: {}", db_path.display());
    println!("   Sample transactions and budgets are in place.");
    println!("   Try: penny chat");
    Ok(())
}
