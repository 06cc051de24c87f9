//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use penny_core::{Database, TransactionKind};

use crate::cli::{ChartKind, ReportKind};
use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_sample_data().unwrap();
    db
}

// ========== Shared Utilities ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long description here", 10), "a very ...");
}

// ========== Init / Ask ==========

#[test]
fn test_cmd_init_creates_and_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("finance.db");

    commands::cmd_init(&db_path).unwrap();
    assert!(db_path.exists());

    let db = commands::open_db(&db_path).unwrap();
    assert_eq!(db.transaction_count().unwrap(), 3);

    // Second init must not duplicate the seed
    commands::cmd_init(&db_path).unwrap();
    let db = commands::open_db(&db_path).unwrap();
    assert_eq!(db.transaction_count().unwrap(), 3);
}

#[test]
fn test_cmd_ask_records_expense() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("finance.db");
    let reports_dir = dir.path().join("reports");

    commands::cmd_ask(&db_path, &reports_dir, "I spent $25 on groceries").unwrap();

    let db = commands::open_db(&db_path).unwrap();
    // Three seed rows plus the new expense
    assert_eq!(db.transaction_count().unwrap(), 4);
    let latest = &db.list_transactions(1).unwrap()[0];
    assert_eq!(latest.amount, 25.0);
    assert_eq!(latest.category, "groceries");
    assert_eq!(latest.kind, TransactionKind::Expense);
}

// ========== Listing Commands ==========

#[test]
fn test_cmd_transactions_list() {
    let db = setup_test_db();
    let result = commands::cmd_transactions_list(&db, 20);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_transactions_list_empty() {
    let db = Database::in_memory().unwrap();
    let result = commands::cmd_transactions_list(&db, 20);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_status_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_status(&dir.path().join("missing.db"));
    assert!(result.is_ok());
}

// ========== Reporting Sink Commands ==========

#[test]
fn test_cmd_chart_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_test_db();

    commands::cmd_chart(&db, dir.path(), ChartKind::Spending).unwrap();
    assert!(dir.path().join("spending_chart.svg").exists());

    commands::cmd_chart(&db, dir.path(), ChartKind::Budget).unwrap();
    assert!(dir.path().join("budget_chart.svg").exists());
}

#[test]
fn test_cmd_chart_with_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::in_memory().unwrap();

    let result = commands::cmd_chart(&db, dir.path(), ChartKind::Balance);
    assert!(result.is_ok());
    assert!(!dir.path().join("income_expense_chart.svg").exists());
}

#[test]
fn test_cmd_report_monthly_for_seeded_month() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_test_db();

    commands::cmd_report(
        &db,
        dir.path(),
        ReportKind::Monthly {
            year: Some(2024),
            month: Some(1),
        },
    )
    .unwrap();
    assert!(dir.path().join("financial_report_2024_01.txt").exists());
}

#[test]
fn test_cmd_export_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_test_db();

    commands::cmd_export(&db, dir.path(), "csv").unwrap();
    commands::cmd_export(&db, dir.path(), "json").unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(entries.iter().any(|name| name.ends_with(".csv")));
    assert!(entries.iter().any(|name| name.ends_with(".json")));
}

#[test]
fn test_cmd_export_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_test_db();

    let result = commands::cmd_export(&db, dir.path(), "xlsx");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unknown export format"));
}
