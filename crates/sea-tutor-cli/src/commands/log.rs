//! The `sea-tutor log` command.

use std::path::PathBuf;

use anyhow::Result;

use sea_tutor_core::attempts::{AttemptRecord, AttemptSink, JsonlAttemptLog};
use sea_tutor_core::checker::check_answer;
use sea_tutor_core::config::load_config_from;

/// One attempt as described on the command line.
pub struct LogArgs {
    pub session: String,
    pub question: String,
    pub input: String,
    pub answer: String,
    pub paper: Option<String>,
    pub skill: Option<String>,
    pub attempt: u32,
    pub hint_level: u32,
    pub used_example: bool,
    pub used_tutor: bool,
    pub used_show_step: bool,
    pub used_reveal_solution: bool,
    pub time_spent: u32,
}

pub fn execute(args: LogArgs, log_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let spec = super::parse_answer_spec(&args.answer)?;
    let outcome = check_answer(&args.input, &spec);

    let record = AttemptRecord {
        paper_id: args.paper,
        skill_id: args.skill,
        attempt_count: args.attempt.max(1),
        hint_level_used: args.hint_level,
        used_example: args.used_example,
        used_tutor: args.used_tutor,
        used_show_step: args.used_show_step,
        used_reveal_solution: args.used_reveal_solution,
        time_spent_sec: args.time_spent,
        ..AttemptRecord::new(args.session, args.question, args.input, outcome.is_correct)
    };

    let log = JsonlAttemptLog::new(log_path.unwrap_or(config.attempt_log));
    log.record(&record)?;
    tracing::debug!(question = %record.question_id, correct = record.is_correct, "attempt recorded");

    println!("{}", outcome.feedback);
    println!("Logged to: {}", log.path().display());
    Ok(())
}
