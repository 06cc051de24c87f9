//! Budget operations
//!
//! Budget rows are created by the sample-data seed and read by the budget
//! status reporter. No command mutates them; in particular, recording an
//! expense does not increment `current_spent`.

use super::Database;
use crate::error::Result;
use crate::models::Budget;

impl Database {
    /// All budget rows
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT category, monthly_limit, current_spent FROM budget")?;
        let rows = stmt.query_map([], |row| {
            Ok(Budget {
                category: row.get(0)?,
                monthly_limit: row.get(1)?,
                current_spent: row.get(2)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
