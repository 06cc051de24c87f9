//! Utterance routing
//!
//! Classification is keyword membership against the lowercase utterance,
//! evaluated in a fixed priority order. The keyword sets overlap; position
//! in the cascade, not specificity, decides. Order is load-bearing.

use chrono::{Datelike, Local};
use tracing::debug;

use crate::chart::ChartRenderer;
use crate::db::Database;
use crate::error::Result;
use crate::extract::{extract_amount, extract_category};
use crate::models::TransactionKind;
use crate::report::ReportWriter;

const VISUALIZE_KEYWORDS: &[&str] = &["chart", "graph", "visualize", "show me"];
const REPORT_KEYWORDS: &[&str] = &["report", "export", "excel", "pdf", "tax"];
const BALANCE_KEYWORDS: &[&str] = &["balance", "how much", "money left", "income"];
const SPENDING_KEYWORDS: &[&str] = &["spending", "expenses", "how much have i spent"];
const EXPENSE_KEYWORDS: &[&str] = &["i spent", "i paid", "spent", "paid"];
const INCOME_KEYWORDS: &[&str] = &["i saved", "i earned", "saved", "earned"];
const BUDGET_KEYWORDS: &[&str] = &["budget", "limit"];
const ADVICE_KEYWORDS: &[&str] = &["advice", "tip"];

const ADVICE: &str = "Here's a tip: record every expense, even the small ones. \
    Small leaks sink big budgets. Ask for your budget status to see where you stand.";

const HELP: &str = "I can help track spending, income, balance, or budget. \
    Try 'I spent $50 on groceries' or 'What's my balance?'";

/// Handler category assigned to an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Visualize,
    Report,
    Balance,
    Spending,
    AddExpense,
    AddIncome,
    BudgetStatus,
    Advice,
    Help,
}

/// Classify a lowercase utterance into an intent
///
/// First satisfied branch wins, no fallthrough.
pub fn classify(text: &str) -> Intent {
    let cascade: &[(&[&str], Intent)] = &[
        (VISUALIZE_KEYWORDS, Intent::Visualize),
        (REPORT_KEYWORDS, Intent::Report),
        (BALANCE_KEYWORDS, Intent::Balance),
        (SPENDING_KEYWORDS, Intent::Spending),
        (EXPENSE_KEYWORDS, Intent::AddExpense),
        (INCOME_KEYWORDS, Intent::AddIncome),
        (BUDGET_KEYWORDS, Intent::BudgetStatus),
        (ADVICE_KEYWORDS, Intent::Advice),
    ];

    for (keywords, intent) in cascade {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *intent;
        }
    }
    Intent::Help
}

/// The conversational front door
///
/// Owns the store handle and the reporting sinks, and turns one utterance
/// into one response. Stateless per call: the same text always produces the
/// same routing decision.
pub struct Assistant {
    db: Database,
    charts: ChartRenderer,
    reports: ReportWriter,
}

impl Assistant {
    pub fn new(db: Database, charts: ChartRenderer, reports: ReportWriter) -> Self {
        Self {
            db,
            charts,
            reports,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Route one utterance to its handler and produce the reply
    ///
    /// Extraction misses and reporting-sink failures come back as
    /// conversational text; store failures propagate to the caller.
    pub fn respond(&self, utterance: &str) -> Result<String> {
        let text = utterance.to_lowercase();
        let intent = classify(&text);
        debug!(?intent, "routing utterance");

        match intent {
            Intent::Visualize => self.handle_visualize(&text),
            Intent::Report => self.handle_report(&text),
            Intent::Balance => self.balance_summary(),
            Intent::Spending => self.spending_summary(),
            Intent::AddExpense => self.handle_expense(&text),
            Intent::AddIncome => self.handle_income(&text),
            Intent::BudgetStatus => self.budget_status(),
            Intent::Advice => Ok(ADVICE.to_string()),
            Intent::Help => Ok(HELP.to_string()),
        }
    }

    fn handle_expense(&self, text: &str) -> Result<String> {
        let Some(amount) = extract_amount(text) else {
            return Ok(
                "How much did you spend? Please say something like 'I spent $50 on groceries'."
                    .to_string(),
            );
        };
        let category = extract_category(text);
        let tx = self.db.record_transaction(
            amount,
            category,
            "User added expense",
            TransactionKind::Expense,
        )?;
        Ok(format!(
            "Added {}: ${:.2} for {}",
            tx.kind, tx.amount, tx.category
        ))
    }

    fn handle_income(&self, text: &str) -> Result<String> {
        let Some(amount) = extract_amount(text) else {
            return Ok(
                "How much did you save? Please say something like 'I saved $100'.".to_string(),
            );
        };
        let tx = self.db.record_transaction(
            amount,
            "income",
            "User added income",
            TransactionKind::Income,
        )?;
        Ok(format!(
            "Added {}: ${:.2} for {}",
            tx.kind, tx.amount, tx.category
        ))
    }

    fn balance_summary(&self) -> Result<String> {
        let income = self.db.sum_by_kind(TransactionKind::Income)?;
        let expenses = self.db.sum_by_kind(TransactionKind::Expense)?;
        Ok(format!(
            "Your balance is ${:.2}. Income: ${:.2}, Expenses: ${:.2}",
            income - expenses,
            income,
            expenses
        ))
    }

    fn spending_summary(&self) -> Result<String> {
        let totals = self.db.spending_by_category(TransactionKind::Expense)?;
        let mut response = String::from("Your spending:");
        for entry in &totals {
            response.push_str(&format!(" {}: ${:.2}.", entry.category, entry.total));
        }
        Ok(response)
    }

    fn budget_status(&self) -> Result<String> {
        let budgets = self.db.list_budgets()?;
        let mut response = String::from("Budget status:");
        for budget in &budgets {
            response.push_str(&format!(
                " {}: ${:.2} of ${:.2}.",
                budget.category, budget.current_spent, budget.monthly_limit
            ));
        }
        Ok(response)
    }

    fn handle_visualize(&self, text: &str) -> Result<String> {
        let rendered = if text.contains("budget") {
            self.charts.budget_chart(&self.db)
        } else if text.contains("income") || text.contains("balance") {
            self.charts.income_expense_chart(&self.db)
        } else {
            self.charts.spending_chart(&self.db)
        };

        Ok(match rendered {
            Ok(Some(path)) => format!("Chart saved to {}", path.display()),
            Ok(None) => {
                "There's no data to chart yet. Record a few transactions first.".to_string()
            }
            Err(e) => format!("Sorry, I couldn't create that chart: {}", e),
        })
    }

    fn handle_report(&self, text: &str) -> Result<String> {
        let today = Local::now().date_naive();

        let written = if text.contains("tax") {
            self.reports.tax_summary(&self.db, today.year())
        } else if text.contains("excel") || text.contains("export") {
            self.reports.export_transactions_csv(&self.db).map(Some)
        } else {
            self.reports
                .monthly_report(&self.db, today.year(), today.month())
        };

        Ok(match written {
            Ok(Some(path)) => format!("Report saved to {}", path.display()),
            Ok(None) => "There's no data for that report yet.".to_string(),
            Err(e) => format!("Sorry, I couldn't generate that report: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_assistant() -> (Assistant, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::in_memory().unwrap();
        let assistant = Assistant::new(
            db,
            ChartRenderer::new(dir.path()),
            ReportWriter::new(dir.path()),
        );
        (assistant, dir)
    }

    #[test]
    fn classification_follows_priority_order() {
        assert_eq!(classify("what's my balance"), Intent::Balance);
        assert_eq!(classify("i spent 50 on food"), Intent::AddExpense);
        assert_eq!(classify("i saved 100"), Intent::AddIncome);
        assert_eq!(classify("what's my budget limit"), Intent::BudgetStatus);
        assert_eq!(classify("any advice for me"), Intent::Advice);
        assert_eq!(classify("asdkjasd"), Intent::Help);
    }

    #[test]
    fn visualization_preempts_transaction_keywords() {
        // Priority order is absolute: earlier rules win even when a later
        // rule would be the better semantic fit.
        assert_eq!(classify("show me a chart of what i spent"), Intent::Visualize);
        assert_eq!(classify("graph my expenses"), Intent::Visualize);
        assert_eq!(classify("chart please, i paid 50"), Intent::Visualize);
    }

    #[test]
    fn report_keywords_preempt_balance_keywords() {
        assert_eq!(classify("export my balance to excel"), Intent::Report);
        assert_eq!(classify("tax summary"), Intent::Report);
    }

    #[test]
    fn balance_keywords_preempt_spending_phrase() {
        // "how much have i spent" carries "how much", so the balance branch
        // claims it first.
        assert_eq!(classify("how much have i spent"), Intent::Balance);
        assert_eq!(classify("my spending this month"), Intent::Spending);
    }

    #[test]
    fn balance_on_empty_store_reports_zero() {
        let (assistant, _dir) = test_assistant();
        let response = assistant.respond("what's my balance").unwrap();
        assert_eq!(
            response,
            "Your balance is $0.00. Income: $0.00, Expenses: $0.00"
        );
    }

    #[test]
    fn balance_on_seeded_store_reports_net() {
        let (assistant, _dir) = test_assistant();
        assistant.database().seed_sample_data().unwrap();

        let response = assistant.respond("what's my balance").unwrap();
        assert_eq!(
            response,
            "Your balance is $1650.00. Income: $3000.00, Expenses: $1350.00"
        );
    }

    #[test]
    fn spending_command_records_expense() {
        let (assistant, _dir) = test_assistant();

        let response = assistant.respond("I spent 50 dollars on groceries").unwrap();
        assert_eq!(response, "Added expense: $50.00 for groceries");

        let recorded = assistant.database().list_transactions(10).unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount, 50.0);
        assert_eq!(recorded[0].category, "groceries");
        assert_eq!(recorded[0].kind, TransactionKind::Expense);
    }

    #[test]
    fn income_command_records_income() {
        let (assistant, _dir) = test_assistant();

        let response = assistant.respond("I saved 100").unwrap();
        assert_eq!(response, "Added income: $100.00 for income");

        let recorded = assistant.database().list_transactions(10).unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount, 100.0);
        assert_eq!(recorded[0].category, "income");
        assert_eq!(recorded[0].kind, TransactionKind::Income);
    }

    #[test]
    fn unroutable_text_gets_help_and_no_mutation() {
        let (assistant, _dir) = test_assistant();

        let response = assistant.respond("asdkjasd").unwrap();
        assert!(response.contains("I can help track"));
        assert_eq!(assistant.database().transaction_count().unwrap(), 0);
    }

    #[test]
    fn missing_amount_gets_rephrase_prompt_and_no_mutation() {
        let (assistant, _dir) = test_assistant();

        let response = assistant.respond("i spent on coffee").unwrap();
        assert!(response.contains("How much did you spend"));
        assert_eq!(assistant.database().transaction_count().unwrap(), 0);
    }

    #[test]
    fn spending_summary_lists_categories() {
        let (assistant, _dir) = test_assistant();
        assistant.database().seed_sample_data().unwrap();

        let response = assistant.respond("show my spending").unwrap();
        // "show my" is not "show me"; this routes to the spending reporter
        assert!(response.starts_with("Your spending:"));
        assert!(response.contains("rent: $1200.00."));
        assert!(response.contains("groceries: $150.00."));
    }

    #[test]
    fn budget_status_shows_spent_of_limit() {
        let (assistant, _dir) = test_assistant();
        assistant.database().seed_sample_data().unwrap();

        let response = assistant.respond("budget status").unwrap();
        assert!(response.starts_with("Budget status:"));
        assert!(response.contains("groceries: $150.00 of $400.00."));
        assert!(response.contains("transport: $120.00 of $150.00."));
    }

    #[test]
    fn chart_request_on_empty_store_reports_no_data() {
        let (assistant, _dir) = test_assistant();

        let response = assistant.respond("show me a chart").unwrap();
        assert!(response.contains("no data to chart"));
    }

    #[test]
    fn chart_request_on_seeded_store_returns_path() {
        let (assistant, dir) = test_assistant();
        assistant.database().seed_sample_data().unwrap();

        let response = assistant.respond("show me a spending chart").unwrap();
        assert!(response.starts_with("Chart saved to"));
        assert!(dir.path().join("spending_chart.svg").exists());
    }

    #[test]
    fn dollar_amounts_route_and_extract_together() {
        let (assistant, _dir) = test_assistant();

        let response = assistant.respond("I paid $42.50 for gas").unwrap();
        assert_eq!(response, "Added expense: $42.50 for transport");
    }
}
