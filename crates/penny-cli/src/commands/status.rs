//! Status and transaction listing commands

use std::path::Path;

use anyhow::Result;
use penny_core::{Database, TransactionKind};

use super::{open_db, truncate};

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Penny Status");
    println!("   ─────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    if db_path.exists() {
        match open_db(db_path) {
            Ok(db) => {
                let income = db.sum_by_kind(TransactionKind::Income)?;
                let expenses = db.sum_by_kind(TransactionKind::Expense)?;

                println!();
                println!("   Transactions: {}", db.transaction_count()?);
                println!("   Budgets: {}", db.list_budgets()?.len());
                println!("   Balance: ${:.2}", income - expenses);
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
            }
        }
    }

    println!();
    Ok(())
}

pub fn cmd_transactions_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(limit)?;

    if transactions.is_empty() {
        println!("No transactions yet. Add one with:");
        println!("  penny ask \"I spent $50 on groceries\"");
        return Ok(());
    }

    println!();
    println!("💳 Transactions");
    println!("   ─────────────────────────────────────────────");

    for tx in transactions {
        let sign = match tx.kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        println!(
            "   {:>5}  {}  {}{:>9.2}  {:<14} {}",
            tx.id,
            tx.date,
            sign,
            tx.amount,
            tx.category,
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}
