//! Paper composition and JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generators::Catalog;
use crate::model::{GenerationContext, Question, MIN_DIFFICULTY};
use crate::shape::{DifficultyWeight, PaperShape, SectionShape};

/// Skill used for a section whose pool is empty.
pub const EMPTY_POOL_SKILL: &str = "core_add_sub";

/// A composed practice paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub duration_sec: u32,
    pub total_marks: u32,
    pub questions: Vec<Question>,
}

impl Paper {
    /// Section names in the order they first appear.
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !names.contains(&q.section.as_str()) {
                names.push(&q.section);
            }
        }
        names
    }

    /// Questions belonging to one section, in paper order.
    pub fn section<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| q.section == name)
    }

    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }

    /// Save the paper as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize paper")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write paper to {}", path.display()))?;
        Ok(())
    }

    /// Load a paper from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read paper from {}", path.display()))?;
        let paper: Paper = serde_json::from_str(&content).context("failed to parse paper JSON")?;
        Ok(paper)
    }
}

/// Draw a difficulty level from the section's weights.
///
/// Weights that are not finite and positive are ignored; with none left the
/// level is [`MIN_DIFFICULTY`].
pub fn draw_difficulty(weights: &[DifficultyWeight], rng: &mut dyn RngCore) -> u8 {
    let usable: Vec<&DifficultyWeight> = weights
        .iter()
        .filter(|w| w.weight.is_finite() && w.weight > 0.0)
        .collect();
    usable
        .choose_weighted(rng, |w| w.weight)
        .map(|w| w.level)
        .unwrap_or(MIN_DIFFICULTY)
}

fn compose_section(
    section: &SectionShape,
    catalog: &Catalog,
    rng: &mut dyn RngCore,
    questions: &mut Vec<Question>,
) {
    for _ in 0..section.effective_count() {
        let skill = section
            .skills
            .choose(&mut *rng)
            .map(String::as_str)
            .unwrap_or(EMPTY_POOL_SKILL);
        let difficulty = draw_difficulty(&section.difficulty, rng);
        let ctx = GenerationContext::new(section.name.as_str(), section.effective_marks(), difficulty);
        questions.push(catalog.generate(skill, &ctx, rng));
    }
}

/// Compose a paper from a shape. Never fails.
pub fn compose_paper(shape: &PaperShape, catalog: &Catalog, rng: &mut dyn RngCore) -> Paper {
    let mut questions = Vec::with_capacity(usize::try_from(shape.question_count()).unwrap_or(0));
    for section in &shape.sections {
        compose_section(section, catalog, rng, &mut questions);
    }
    let total_marks = questions
        .iter()
        .fold(0u32, |total, q| total.saturating_add(q.marks));

    tracing::info!(
        paper = %shape.name,
        questions = questions.len(),
        total_marks,
        "composed paper"
    );

    Paper {
        paper_id: format!("paper_{}", Uuid::new_v4().simple()),
        name: shape.name.clone(),
        created_at: Utc::now(),
        duration_sec: shape.duration_sec,
        total_marks,
        questions,
    }
}
