//! The `sea-tutor generate` command.

use anyhow::{Context, Result};

use sea_tutor_core::generators::{standard_catalog, FALLBACK_SKILL};
use sea_tutor_core::model::GenerationContext;

pub fn execute(
    skill: String,
    section: String,
    marks: u32,
    difficulty: u8,
    seed: Option<u64>,
    count: usize,
) -> Result<()> {
    let catalog = standard_catalog();
    if !catalog.contains(&skill) {
        eprintln!("Unknown skill '{skill}', using {FALLBACK_SKILL}. Run `sea-tutor skills` for the list.");
    }

    let ctx = GenerationContext::new(section, marks, difficulty);
    let mut rng = super::make_rng(seed);
    let questions: Vec<_> = (0..count)
        .map(|_| catalog.generate(&skill, &ctx, &mut rng))
        .collect();

    let json = serde_json::to_string_pretty(&questions).context("failed to serialize questions")?;
    println!("{json}");
    Ok(())
}
