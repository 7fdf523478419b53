pub mod check;
pub mod generate;
pub mod init;
pub mod log;
pub mod paper;
pub mod skills;
pub mod stats;
pub mod validate;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sea_tutor_core::model::AnswerSpec;

/// Seeded generator when a seed is given, OS-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Parse an answer spec given as JSON on the command line.
pub fn parse_answer_spec(json: &str) -> Result<AnswerSpec> {
    serde_json::from_str(json).with_context(|| format!("invalid answer spec JSON: {json}"))
}
