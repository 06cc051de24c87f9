//! Conversation commands (interactive loop, one-shot ask)

use std::path::Path;

use anyhow::Result;
use penny_core::{Assistant, ChartRenderer, ReportWriter};
use tracing::info;

use crate::console::{self, Console};

use super::open_db;

/// Wire the assistant to its store and reporting sinks
///
/// Seeds the sample data so a fresh database is immediately usable, the
/// same way `init` does.
pub fn build_assistant(db_path: &Path, reports_dir: &Path) -> Result<Assistant> {
    let db = open_db(db_path)?;
    db.seed_sample_data()?;
    Ok(Assistant::new(
        db,
        ChartRenderer::new(reports_dir),
        ReportWriter::new(reports_dir),
    ))
}

pub fn cmd_chat(db_path: &Path, reports_dir: &Path) -> Result<()> {
    let assistant = build_assistant(db_path, reports_dir)?;
    let console = Console;
    info!(db = %db_path.display(), "chat session started");

    console.speak("Hello! I'm Penny, your finance assistant. Let's chat about your money.");

    loop {
        let Some(utterance) = console.listen()? else {
            break; // end of input
        };
        if console::is_exit_word(&utterance) {
            break;
        }

        let response = assistant.respond(&utterance)?;
        console.speak(&response);
        println!();
    }

    console.speak("Goodbye! Keep tracking your financial goals!");
    Ok(())
}

pub fn cmd_ask(db_path: &Path, reports_dir: &Path, text: &str) -> Result<()> {
    let assistant = build_assistant(db_path, reports_dir)?;
    let response = assistant.respond(text)?;
    println!("{}", response);
    Ok(())
}
