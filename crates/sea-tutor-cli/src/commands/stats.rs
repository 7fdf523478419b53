//! The `sea-tutor stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use sea_tutor_core::attempts::read_attempts;
use sea_tutor_core::config::load_config_from;
use sea_tutor_core::statistics::summarize_attempts;

pub fn execute(log_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = log_path.unwrap_or(config.attempt_log);
    let attempts = read_attempts(&path)?;

    if attempts.is_empty() {
        println!("No attempts recorded in {}.", path.display());
        return Ok(());
    }

    let summary = summarize_attempts(&attempts);
    println!(
        "{} attempts, {} correct ({:.1}%) across {} session(s) and {} question(s)",
        summary.total_attempts,
        summary.correct_attempts,
        summary.accuracy * 100.0,
        summary.sessions,
        summary.questions
    );
    println!(
        "First-try correct without help: {} | average time: {:.0}s",
        summary.first_try_unaided, summary.avg_time_sec
    );
    println!(
        "Help opened: hints {}, examples {}, tutor {}, show step {}, reveal solution {}",
        summary.help.hints,
        summary.help.examples,
        summary.help.tutor,
        summary.help.show_step,
        summary.help.reveal_solution
    );

    let mut table = Table::new();
    table.set_header(vec!["Skill", "Attempts", "Correct", "Accuracy", "Avg Time"]);
    for (skill, stats) in &summary.per_skill {
        table.add_row(vec![
            Cell::new(skill),
            Cell::new(stats.attempts),
            Cell::new(stats.correct),
            Cell::new(format!("{:.1}%", stats.accuracy * 100.0)),
            Cell::new(format!("{:.0}s", stats.avg_time_sec)),
        ]);
    }
    println!("\n{table}");

    Ok(())
}
