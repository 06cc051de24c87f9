//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `chat` - Conversation commands (interactive loop, one-shot ask)
//! - `core` - Core commands (init) and shared utilities (open_db)
//! - `reports` - Reporting sink commands (charts, documents, exports)
//! - `status` - Status and transaction listing commands

pub mod chat;
pub mod core;
pub mod reports;
pub mod status;

// Re-export command functions for main.rs
pub use chat::*;
pub use core::*;
pub use reports::*;
pub use status::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
