//! Reporting sink commands (charts, documents, exports)

use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Local};
use penny_core::{ChartRenderer, Database, ReportWriter};

use crate::cli::{ChartKind, ReportKind};

pub fn cmd_chart(db: &Database, reports_dir: &Path, kind: ChartKind) -> Result<()> {
    let charts = ChartRenderer::new(reports_dir);

    let rendered = match kind {
        ChartKind::Spending => charts.spending_chart(db)?,
        ChartKind::Balance => charts.income_expense_chart(db)?,
        ChartKind::Budget => charts.budget_chart(db)?,
    };

    match rendered {
        Some(path) => println!("📈 Chart saved to {}", path.display()),
        None => println!("No data to chart yet."),
    }
    Ok(())
}

pub fn cmd_report(db: &Database, reports_dir: &Path, kind: ReportKind) -> Result<()> {
    let reports = ReportWriter::new(reports_dir);
    let today = Local::now().date_naive();

    let written = match kind {
        ReportKind::Monthly { year, month } => reports.monthly_report(
            db,
            year.unwrap_or(today.year()),
            month.unwrap_or(today.month()),
        )?,
        ReportKind::Tax { year } => reports.tax_summary(db, year.unwrap_or(today.year()))?,
    };

    match written {
        Some(path) => println!("📄 Report saved to {}", path.display()),
        None => println!("No data for that period."),
    }
    Ok(())
}

pub fn cmd_export(db: &Database, reports_dir: &Path, format: &str) -> Result<()> {
    let reports = ReportWriter::new(reports_dir);

    let path = match format.to_lowercase().as_str() {
        "csv" => reports.export_transactions_csv(db)?,
        "json" => reports.export_full_json(db)?,
        other => anyhow::bail!("Unknown export format: {} (use csv or json)", other),
    };

    println!("📦 Export saved to {}", path.display());
    Ok(())
}
