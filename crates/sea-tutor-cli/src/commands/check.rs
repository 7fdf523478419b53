//! The `sea-tutor check` command.

use anyhow::{Context, Result};

use sea_tutor_core::checker::check_answer;

pub fn execute(answer: String, input: String) -> Result<()> {
    let spec = super::parse_answer_spec(&answer)?;
    let outcome = check_answer(&input, &spec);
    let json = serde_json::to_string(&outcome).context("failed to serialize outcome")?;
    println!("{json}");
    Ok(())
}
