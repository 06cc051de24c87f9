//! Transaction operations

use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rusqlite::params;

use super::{parse_date, Database};
use crate::error::{Error, Result};
use crate::models::{CategoryTotal, Transaction, TransactionKind};

/// Expense categories that count toward the tax deduction summary
const DEDUCTIBLE_CATEGORIES: &[&str] = &["charity", "medical", "education", "business"];

type RawTransaction = (i64, f64, String, String, String, String);

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTransaction> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_transaction(raw: RawTransaction) -> Result<Transaction> {
    let (id, amount, category, description, date, kind) = raw;
    Ok(Transaction {
        id,
        amount,
        category,
        description,
        date: parse_date(&date),
        kind: TransactionKind::from_str(&kind).map_err(Error::InvalidData)?,
    })
}

impl Database {
    /// Append a transaction dated today
    ///
    /// `amount` is a non-negative magnitude; direction comes from `kind`.
    /// Durable once this returns.
    pub fn record_transaction(
        &self,
        amount: f64,
        category: &str,
        description: &str,
        kind: TransactionKind,
    ) -> Result<Transaction> {
        let conn = self.conn()?;
        let date = Local::now().date_naive();

        conn.execute(
            "INSERT INTO transactions (amount, category, description, date, kind)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                amount,
                category,
                description,
                date.to_string(),
                kind.as_str()
            ],
        )?;

        Ok(Transaction {
            id: conn.last_insert_rowid(),
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
            kind,
        })
    }

    /// Total amount across all transactions of one kind. Zero when none exist.
    pub fn sum_by_kind(&self, kind: TransactionKind) -> Result<f64> {
        let conn = self.conn()?;
        let total = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE kind = ?1",
            params![kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Per-category totals for one kind, in store grouping order
    pub fn spending_by_category(&self, kind: TransactionKind) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT category, SUM(amount) FROM transactions WHERE kind = ?1 GROUP BY category",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Most recent transactions, newest first
    pub fn list_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, category, description, date, kind
             FROM transactions ORDER BY date DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], map_row)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(into_transaction)
            .collect()
    }

    /// All transactions, oldest first
    pub fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, category, description, date, kind
             FROM transactions ORDER BY date, id",
        )?;
        let rows = stmt.query_map([], map_row)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(into_transaction)
            .collect()
    }

    /// Transactions dated within `[from, to]`, oldest first
    pub fn transactions_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, category, description, date, kind
             FROM transactions WHERE date BETWEEN ?1 AND ?2 ORDER BY date, id",
        )?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], map_row)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(into_transaction)
            .collect()
    }

    /// Number of recorded transactions
    pub fn transaction_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Expense totals for the deductible categories within one year
    pub fn deductible_totals(&self, year: i32) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let placeholders = DEDUCTIBLE_CATEGORIES
            .iter()
            .map(|_| "?")
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT category, SUM(amount) FROM transactions
             WHERE kind = 'expense' AND date BETWEEN ?1 AND ?2 AND category IN ({})
             GROUP BY category",
            placeholders
        );

        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(format!("{}-01-01", year)),
            Box::new(format!("{}-12-31", year)),
        ];
        for category in DEDUCTIBLE_CATEGORIES {
            sql_params.push(Box::new(*category));
        }
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            sql_params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(param_refs.as_slice(), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
