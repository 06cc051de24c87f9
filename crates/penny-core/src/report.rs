//! Document reports and data exports
//!
//! Each report reads its aggregates from the store, writes a file into the
//! reports directory, and returns the path. `Ok(None)` means the underlying
//! aggregation was empty. No retries; partial output is not cleaned up.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, Months, NaiveDate};
use serde::Serialize;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Budget, Transaction, TransactionKind};

/// Full-data export document shape
#[derive(Debug, Serialize)]
struct FullExport {
    exported_at: String,
    income_total: f64,
    expense_total: f64,
    balance: f64,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

/// Writes text reports and data exports
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn target(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        Ok(self.out_dir.join(file_name))
    }

    /// Monthly report: totals, spending by category, five largest expenses
    pub fn monthly_report(&self, db: &Database, year: i32, month: u32) -> Result<Option<PathBuf>> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidData(format!("invalid month: {}-{}", year, month)))?;
        let to = from
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| Error::InvalidData(format!("invalid month: {}-{}", year, month)))?;

        let transactions = db.transactions_between(from, to)?;
        if transactions.is_empty() {
            return Ok(None);
        }

        let income: f64 = transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Income)
            .map(|tx| tx.amount)
            .sum();
        let expenses: f64 = transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
            .map(|tx| tx.amount)
            .sum();

        // Per-category totals in first-seen order
        let mut by_category: Vec<(String, f64)> = Vec::new();
        for tx in transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
        {
            match by_category.iter_mut().find(|(cat, _)| *cat == tx.category) {
                Some((_, total)) => *total += tx.amount,
                None => by_category.push((tx.category.clone(), tx.amount)),
            }
        }

        let mut top_expenses: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
            .collect();
        top_expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        top_expenses.truncate(5);

        let mut report = String::new();
        report.push_str(&format!("Financial Report - {}/{}\n", month, year));
        report.push_str(&format!("{}\n\n", "=".repeat(40)));
        report.push_str("Financial Summary\n");
        report.push_str(&format!("  Income: ${:.2}\n", income));
        report.push_str(&format!("  Expenses: ${:.2}\n", expenses));
        report.push_str(&format!("  Balance: ${:.2}\n\n", income - expenses));

        if !by_category.is_empty() {
            report.push_str("Spending by Category\n");
            for (category, total) in &by_category {
                report.push_str(&format!("  {}: ${:.2}\n", category, total));
            }
            report.push('\n');
        }

        if !top_expenses.is_empty() {
            report.push_str("Top Expenses\n");
            for tx in &top_expenses {
                report.push_str(&format!(
                    "  {}: ${:.2} ({})\n",
                    tx.description, tx.amount, tx.date
                ));
            }
        }

        let path = self.target(&format!("financial_report_{}_{:02}.txt", year, month))?;
        fs::write(&path, report)?;
        Ok(Some(path))
    }

    /// Tax preparation summary across the deductible categories
    pub fn tax_summary(&self, db: &Database, year: i32) -> Result<Option<PathBuf>> {
        let totals = db.deductible_totals(year)?;
        if totals.is_empty() {
            return Ok(None);
        }

        let mut summary = String::new();
        summary.push_str(&format!("Tax Summary for {}\n", year));
        summary.push_str(&format!("{}\n", "=".repeat(40)));

        let mut total_deductions = 0.0;
        for entry in &totals {
            summary.push_str(&format!("{}: ${:.2}\n", entry.category, entry.total));
            total_deductions += entry.total;
        }

        summary.push_str(&format!("{}\n", "=".repeat(40)));
        summary.push_str(&format!("Total Deductions: ${:.2}\n", total_deductions));

        let path = self.target(&format!("tax_summary_{}.txt", year))?;
        fs::write(&path, summary)?;
        Ok(Some(path))
    }

    /// All transactions as a CSV document
    pub fn export_transactions_csv(&self, db: &Database) -> Result<PathBuf> {
        let transactions = db.all_transactions()?;

        let file_name = format!(
            "financial_export_{}.csv",
            Local::now().format("%Y%m%d")
        );
        let path = self.target(&file_name)?;

        let mut writer = csv::Writer::from_path(&path)?;
        for tx in &transactions {
            writer.serialize(tx)?;
        }
        writer.flush()?;

        Ok(path)
    }

    /// Transactions, budgets, and summary totals as one JSON document
    pub fn export_full_json(&self, db: &Database) -> Result<PathBuf> {
        let income_total = db.sum_by_kind(TransactionKind::Income)?;
        let expense_total = db.sum_by_kind(TransactionKind::Expense)?;

        let export = FullExport {
            exported_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            income_total,
            expense_total,
            balance: income_total - expense_total,
            transactions: db.all_transactions()?,
            budgets: db.list_budgets()?,
        };

        let file_name = format!(
            "financial_export_{}.json",
            Local::now().format("%Y%m%d")
        );
        let path = self.target(&file_name)?;
        fs::write(&path, serde_json::to_string_pretty(&export)?)?;

        Ok(path)
    }
}
