//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `transactions` - Append-only transaction log and aggregations
//! - `budgets` - Per-category budget rows

use std::path::Path;

use chrono::{Local, NaiveDate};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;

use crate::error::Result;
use crate::models::TransactionKind;

mod budgets;
mod transactions;


pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Sample transactions inserted on first run: (amount, category, description, date, kind)
const SEED_TRANSACTIONS: &[(f64, &str, &str, &str, TransactionKind)] = &[
    (
        3000.00,
        "salary",
        "Monthly Salary",
        "2024-01-15",
        TransactionKind::Income,
    ),
    (
        1200.00,
        "rent",
        "Apartment Rent",
        "2024-01-01",
        TransactionKind::Expense,
    ),
    (
        150.00,
        "groceries",
        "Weekly Shopping",
        "2024-01-05",
        TransactionKind::Expense,
    ),
];

/// Sample budgets inserted on first run: (category, monthly_limit, current_spent)
const SEED_BUDGETS: &[(&str, f64, f64)] = &[
    ("groceries", 400.0, 150.0),
    ("entertainment", 200.0, 45.0),
    ("transport", 150.0, 120.0),
];

/// Parse a stored `YYYY-MM-DD` date, falling back to today on malformed input
pub(crate) fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| Local::now().date_naive())
}

/// Database wrapper with connection pooling
///
/// An explicitly owned handle: open on startup, pass into the components
/// that need it, dropped on shutdown. No ambient/global connection state.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.display().to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database for testing
    ///
    /// Uses a temporary file rather than `:memory:` because each pooled
    /// connection would otherwise get its own empty in-memory database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("penny_test_{}_{}.db", std::process::id(), id));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::open(path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: safe for most power-loss scenarios
            PRAGMA synchronous = NORMAL;

            -- Transactions (append-only ledger)
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL
            );

            -- Indexes for the aggregation queries
            CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);
            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);

            -- Budgets (one row per category)
            CREATE TABLE IF NOT EXISTS budget (
                category TEXT PRIMARY KEY,
                monthly_limit REAL NOT NULL,
                current_spent REAL NOT NULL DEFAULT 0
            );
            "#,
        )?;

        Ok(())
    }

    /// Insert the one-time sample data
    ///
    /// Idempotent: seed transactions are keyed by full row equality, seed
    /// budgets by category. Re-running against a populated store changes
    /// nothing.
    pub fn seed_sample_data(&self) -> Result<()> {
        let conn = self.conn()?;

        for (amount, category, description, date, kind) in SEED_TRANSACTIONS {
            conn.execute(
                r#"
                INSERT INTO transactions (amount, category, description, date, kind)
                SELECT ?1, ?2, ?3, ?4, ?5
                WHERE NOT EXISTS (
                    SELECT 1 FROM transactions
                    WHERE amount = ?1 AND category = ?2 AND description = ?3
                      AND date = ?4 AND kind = ?5
                )
                "#,
                params![amount, category, description, date, kind.as_str()],
            )?;
        }

        for (category, limit, spent) in SEED_BUDGETS {
            conn.execute(
                "INSERT OR IGNORE INTO budget (category, monthly_limit, current_spent)
                 VALUES (?1, ?2, ?3)",
                params![category, limit, spent],
            )?;
        }

        info!("Sample data seeded");
        Ok(())
    }
}
