//! Penny Core Library
//!
//! Shared functionality for the Penny conversational finance tracker:
//! - Database access and migrations
//! - Amount/category extraction from free-form utterances
//! - Keyword-cascade routing of utterances to handlers
//! - Balance, spending, and budget reporters
//! - SVG chart rendering
//! - Document reports and data exports

pub mod chart;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod report;
pub mod router;

pub use chart::ChartRenderer;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{Budget, CategoryTotal, Transaction, TransactionKind};
pub use report::ReportWriter;
pub use router::{classify, Assistant, Intent};
