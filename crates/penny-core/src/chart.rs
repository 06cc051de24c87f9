//! Chart rendering
//!
//! Each chart reads its aggregate from the store, writes an SVG file into
//! the reports directory, and returns the path. `Ok(None)` means the
//! underlying aggregation was empty. Rendering is blocking; partial output
//! is not cleaned up.

use std::path::{Path, PathBuf};

use svg::node::element::{Line, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

use crate::db::Database;
use crate::error::Result;
use crate::models::TransactionKind;

const BAR_COLORS: &[&str] = &[
    "steelblue",
    "salmon",
    "mediumseagreen",
    "orange",
    "orchid",
    "khaki",
    "lightcoral",
];

const CHART_WIDTH: f64 = 1000.0;
const LABEL_WIDTH: f64 = 220.0;
const ROW_HEIGHT: f64 = 40.0;
const BAR_HEIGHT: f64 = 24.0;
const MARGIN: f64 = 20.0;
const TITLE_HEIGHT: f64 = 40.0;

/// Renders aggregate figures into SVG bar charts
pub struct ChartRenderer {
    out_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Per-category expense bars, largest first
    pub fn spending_chart(&self, db: &Database) -> Result<Option<PathBuf>> {
        let mut totals = db.spending_by_category(TransactionKind::Expense)?;
        if totals.is_empty() {
            return Ok(None);
        }
        totals.sort_by(|a, b| b.total.total_cmp(&a.total));

        let bars: Vec<(String, f64)> = totals
            .into_iter()
            .map(|entry| (entry.category, entry.total))
            .collect();

        let path = self.out_dir.join("spending_chart.svg");
        render_bar_chart(&path, "Spending by Category", &bars)?;
        Ok(Some(path))
    }

    /// Income total next to expense total
    pub fn income_expense_chart(&self, db: &Database) -> Result<Option<PathBuf>> {
        let income = db.sum_by_kind(TransactionKind::Income)?;
        let expenses = db.sum_by_kind(TransactionKind::Expense)?;
        if income == 0.0 && expenses == 0.0 {
            return Ok(None);
        }

        let bars = vec![
            ("income".to_string(), income),
            ("expenses".to_string(), expenses),
        ];

        let path = self.out_dir.join("income_expense_chart.svg");
        render_bar_chart(&path, "Income vs Expenses", &bars)?;
        Ok(Some(path))
    }

    /// Paired limit/spent bars per budget row (limits of zero are skipped)
    pub fn budget_chart(&self, db: &Database) -> Result<Option<PathBuf>> {
        let budgets: Vec<_> = db
            .list_budgets()?
            .into_iter()
            .filter(|budget| budget.monthly_limit > 0.0)
            .collect();
        if budgets.is_empty() {
            return Ok(None);
        }

        let mut bars = Vec::new();
        for budget in budgets {
            bars.push((format!("{} limit", budget.category), budget.monthly_limit));
            bars.push((format!("{} spent", budget.category), budget.current_spent));
        }

        let path = self.out_dir.join("budget_chart.svg");
        render_bar_chart(&path, "Budget vs Actual", &bars)?;
        Ok(Some(path))
    }
}

/// Render labeled horizontal bars scaled to the largest value
fn render_bar_chart(file: &Path, title: &str, bars: &[(String, f64)]) -> Result<()> {
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_value = bars.iter().map(|(_, value)| *value).fold(0.0, f64::max);
    let bar_span = CHART_WIDTH - LABEL_WIDTH - 120.0;
    let scale = |value: f64| {
        if max_value > 0.0 {
            value / max_value * bar_span
        } else {
            0.0
        }
    };

    let height = TITLE_HEIGHT + bars.len() as f64 * ROW_HEIGHT;

    let mut document = Document::new().set(
        "viewBox",
        (-MARGIN, -MARGIN, CHART_WIDTH + 2.0 * MARGIN, height + 2.0 * MARGIN),
    );

    document = document.add(
        Text::new()
            .set("x", 0.0)
            .set("y", 20.0)
            .set("font-size", 20.0)
            .set("font-family", "sans-serif")
            .set("font-weight", "bold")
            .add(TextNode::new(title)),
    );

    for (i, (label, value)) in bars.iter().enumerate() {
        let y = TITLE_HEIGHT + i as f64 * ROW_HEIGHT;
        let color = BAR_COLORS[i % BAR_COLORS.len()];

        document = document
            .add(
                Text::new()
                    .set("x", 0.0)
                    .set("y", y + BAR_HEIGHT - 6.0)
                    .set("font-size", 14.0)
                    .set("font-family", "sans-serif")
                    .add(TextNode::new(label.as_str())),
            )
            .add(
                Rectangle::new()
                    .set("x", LABEL_WIDTH)
                    .set("y", y)
                    .set("width", scale(*value))
                    .set("height", BAR_HEIGHT)
                    .set("fill", color),
            )
            .add(
                Text::new()
                    .set("x", LABEL_WIDTH + scale(*value) + 8.0)
                    .set("y", y + BAR_HEIGHT - 6.0)
                    .set("font-size", 14.0)
                    .set("font-family", "sans-serif")
                    .add(TextNode::new(format!("${:.2}", value))),
            );
    }

    // Baseline between labels and bars
    document = document.add(
        Line::new()
            .set("x1", LABEL_WIDTH)
            .set("x2", LABEL_WIDTH)
            .set("y1", TITLE_HEIGHT - 10.0)
            .set("y2", height)
            .set("stroke", "black")
            .set("stroke-width", 1.0),
    );

    svg::save(file, &document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charts_report_empty_aggregations_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::in_memory().unwrap();
        let charts = ChartRenderer::new(dir.path());

        assert!(charts.spending_chart(&db).unwrap().is_none());
        assert!(charts.income_expense_chart(&db).unwrap().is_none());
        assert!(charts.budget_chart(&db).unwrap().is_none());
    }

    #[test]
    fn seeded_store_renders_all_charts() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::in_memory().unwrap();
        db.seed_sample_data().unwrap();
        let charts = ChartRenderer::new(dir.path());

        let spending = charts.spending_chart(&db).unwrap().unwrap();
        assert!(spending.exists());
        assert_eq!(spending.file_name().unwrap(), "spending_chart.svg");

        let balance = charts.income_expense_chart(&db).unwrap().unwrap();
        assert!(balance.exists());

        let budget = charts.budget_chart(&db).unwrap().unwrap();
        assert!(budget.exists());
    }

    #[test]
    fn chart_files_contain_category_labels() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::in_memory().unwrap();
        db.seed_sample_data().unwrap();
        let charts = ChartRenderer::new(dir.path());

        let path = charts.spending_chart(&db).unwrap().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("rent"));
        assert!(content.contains("groceries"));
        assert!(content.contains("Spending by Category"));
    }
}
