//! Generator catalog and the helpers shared by the skill generators.
//!
//! Every generator is a plain function of the request context and an
//! injected random source. Generators are total: a draw that could produce a
//! degenerate instance goes through [`retry`] and ends in a hard-coded,
//! verified instance when the attempt bound runs out.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::seq::IndexedRandom;
use rand::RngCore;
use serde::Serialize;
use uuid::Uuid;

use crate::model::{
    AnswerSpec, ExampleHelp, GenerationContext, Question, SolutionStep, Strand, WorkedExample,
};

pub mod arithmetic;
pub mod charts;
pub mod fractions;
pub mod geometry;
pub mod measurement;

/// Attempt bound for generators that draw-and-reject.
pub const MAX_ATTEMPTS: usize = 120;

/// Attempt bound for drawing a worked example that differs from the question.
const EXAMPLE_ATTEMPTS: usize = 20;

/// Skill used when a requested skill id is not registered.
pub const FALLBACK_SKILL: &str = "core_addition";

/// Signature shared by all skill generators.
pub type GeneratorFn = fn(&GenerationContext, &mut dyn RngCore) -> Question;

/// Catalog metadata for one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillInfo {
    pub id: &'static str,
    pub strand: Strand,
    pub title: &'static str,
}

struct SkillEntry {
    info: SkillInfo,
    generate: GeneratorFn,
}

/// Registry of skill generators, fixed at construction.
pub struct Catalog {
    entries: Vec<SkillEntry>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// The standard catalog with every built-in skill.
    pub fn standard() -> Self {
        use Strand::*;

        let skills: [(&'static str, Strand, &'static str, GeneratorFn); 14] = [
            (FALLBACK_SKILL, Number, "Add two whole numbers", arithmetic::addition),
            ("core_add_sub", Number, "Add and subtract whole numbers", arithmetic::add_sub),
            ("core_multiply_2d_1d", Number, "Multiply a 2-digit number by a 1-digit number", arithmetic::multiply),
            ("core_exact_division", Number, "Divide with no remainder", arithmetic::exact_division),
            ("std4_simplify_fractions", Number, "Simplify fractions", fractions::simplify),
            ("std5_add_sub_unlike_denoms", Number, "Add and subtract fractions with unlike denominators", fractions::add_sub_unlike),
            ("std4_fraction_of_quantity", Number, "Find a fraction of a quantity", fractions::fraction_of_quantity),
            ("std5_percent_of_quantity", Number, "Find a percentage of a quantity", fractions::percent_of_quantity),
            ("std5_elapsed_time_harder", Measurement, "Elapsed time", measurement::elapsed_time),
            ("std4_rectangle_perimeter", Measurement, "Perimeter of a rectangle", measurement::rectangle_perimeter),
            ("std4_rectangle_area", Measurement, "Area of a rectangle", measurement::rectangle_area),
            ("std5_triangle_third_angle", Geometry, "Third angle of a triangle", geometry::triangle_third_angle),
            ("std4_table_read", Statistics, "Read a value from a table", charts::table_read),
            ("std4_bar_chart_read", Statistics, "Read a value from a bar chart", charts::bar_chart_read),
        ];

        let mut entries = Vec::with_capacity(skills.len());
        let mut index = HashMap::with_capacity(skills.len());
        for (id, strand, title, generate) in skills {
            index.insert(id, entries.len());
            entries.push(SkillEntry {
                info: SkillInfo { id, strand, title },
                generate,
            });
        }
        Self { entries, index }
    }

    /// Generate a question for `skill_id`.
    ///
    /// Unknown ids fall back to [`FALLBACK_SKILL`]; this never fails.
    pub fn generate(
        &self,
        skill_id: &str,
        ctx: &GenerationContext,
        rng: &mut dyn RngCore,
    ) -> Question {
        let generate = match self.index.get(skill_id) {
            Some(&i) => self.entries[i].generate,
            None => {
                tracing::warn!("unknown skill '{skill_id}', falling back to {FALLBACK_SKILL}");
                arithmetic::addition
            }
        };
        generate(ctx, rng)
    }

    /// Whether `skill_id` is registered.
    pub fn contains(&self, skill_id: &str) -> bool {
        self.index.contains_key(skill_id)
    }

    /// Registered skills in registration order.
    pub fn skills(&self) -> impl Iterator<Item = &SkillInfo> {
        self.entries.iter().map(|e| &e.info)
    }

    /// Metadata for one skill.
    pub fn skill(&self, skill_id: &str) -> Option<&SkillInfo> {
        self.index.get(skill_id).map(|&i| &self.entries[i].info)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide standard catalog.
pub fn standard_catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::standard)
}

/// Generate one question from the standard catalog. Never fails.
pub fn generate_by_skill(
    skill_id: &str,
    section: &str,
    marks: u32,
    difficulty: u8,
    rng: &mut dyn RngCore,
) -> Question {
    let ctx = GenerationContext::new(section, marks, difficulty);
    standard_catalog().generate(skill_id, &ctx, rng)
}

/// Run `attempt` up to `max_attempts` times, returning the first `Some`.
/// Falls back to `fallback()` when every attempt is rejected.
pub fn retry<T>(
    max_attempts: usize,
    mut attempt: impl FnMut() -> Option<T>,
    fallback: impl FnOnce() -> T,
) -> T {
    for _ in 0..max_attempts {
        if let Some(value) = attempt() {
            return value;
        }
    }
    tracing::debug!(max_attempts, "retry bound exhausted, using fallback instance");
    fallback()
}

/// Pick one element. `items` is a non-empty constant table in every caller.
pub(crate) fn pick<T: Copy + Default>(rng: &mut dyn RngCore, items: &[T]) -> T {
    items.choose(rng).copied().unwrap_or_default()
}

/// Draw a worked example whose answer differs from the question's answer.
///
/// `fixed` holds two hard-coded examples with different answers, so the
/// fallback can always avoid a clash.
pub(crate) fn distinct_example(
    rng: &mut dyn RngCore,
    question_answer: &str,
    mut build: impl FnMut(&mut dyn RngCore) -> WorkedExample,
    fixed: [WorkedExample; 2],
) -> WorkedExample {
    retry(
        EXAMPLE_ATTEMPTS,
        || Some(build(&mut *rng)).filter(|ex| ex.answer != question_answer),
        move || {
            let [first, second] = fixed;
            if first.answer != question_answer {
                first
            } else {
                second
            }
        },
    )
}

/// Number a list of `(title, work)` pairs from 1.
pub(crate) fn steps<const N: usize>(items: [(&str, String); N]) -> Vec<SolutionStep> {
    items
        .into_iter()
        .zip(1..)
        .map(|((title, work), step)| SolutionStep {
            step,
            title: title.to_string(),
            work,
        })
        .collect()
}

pub(crate) fn worked(prompt: String, steps: Vec<String>, answer: impl ToString) -> WorkedExample {
    WorkedExample {
        prompt,
        steps,
        answer: answer.to_string(),
    }
}

/// Everything a generator decides; [`Draft::finish`] adds the context echo
/// and a fresh id.
pub(crate) struct Draft {
    pub id_prefix: &'static str,
    pub skill_id: &'static str,
    pub prompt_text: String,
    pub correct_answer: AnswerSpec,
    pub solution_steps: Vec<SolutionStep>,
    pub rule: &'static str,
    pub example: WorkedExample,
    pub common_mistakes: &'static [&'static str],
    pub estimated_time_sec: u32,
}

impl Draft {
    pub fn finish(self, ctx: &GenerationContext) -> Question {
        Question {
            question_id: format!("{}_{}", self.id_prefix, Uuid::new_v4().simple()),
            skill_id: self.skill_id.to_string(),
            section: ctx.section.clone(),
            marks: ctx.marks,
            difficulty: ctx.difficulty,
            prompt_text: self.prompt_text,
            answer_type: self.correct_answer.answer_type().to_string(),
            correct_answer: self.correct_answer,
            solution_steps: self.solution_steps,
            example_help: ExampleHelp {
                rule: self.rule.to_string(),
                examples: vec![self.example],
            },
            common_mistakes: self.common_mistakes.iter().map(|m| m.to_string()).collect(),
            estimated_time_sec: self.estimated_time_sec,
        }
    }
}

/// Pacing hint scaled by marks.
pub(crate) fn pace(base_sec: u32, marks: u32) -> u32 {
    base_sec * marks.clamp(1, 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn catalog_dispatches_by_exact_id() {
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = GenerationContext::new("II", 2, 2);
        for info in catalog.skills() {
            let q = catalog.generate(info.id, &ctx, &mut rng);
            assert_eq!(q.skill_id, info.id);
            assert_eq!(q.section, "II");
            assert_eq!(q.marks, 2);
            assert_eq!(q.difficulty, 2);
        }
    }

    #[test]
    fn unknown_skill_falls_back_to_addition() {
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(2);
        let q = catalog.generate("std9_calculus", &GenerationContext::default(), &mut rng);
        assert_eq!(q.skill_id, FALLBACK_SKILL);
        assert!(q.prompt_text.contains('+'));
        assert!(!catalog.contains("std9_calculus"));
        assert!(catalog.contains(FALLBACK_SKILL));
    }

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = Catalog::standard();
        let ids: std::collections::HashSet<_> = catalog.skills().map(|s| s.id).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(!catalog.is_empty());
        assert_eq!(catalog.skill("std5_triangle_third_angle").unwrap().strand, Strand::Geometry);
    }

    #[test]
    fn question_ids_are_fresh() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = generate_by_skill("core_add_sub", "I", 1, 1, &mut rng);
        let mut rng = StdRng::seed_from_u64(3);
        let b = generate_by_skill("core_add_sub", "I", 1, 1, &mut rng);
        assert_eq!(a.prompt_text, b.prompt_text);
        assert_ne!(a.question_id, b.question_id);
        assert!(a.question_id.starts_with("arith_"));
    }

    #[test]
    fn retry_returns_first_success_or_fallback() {
        let mut calls = 0;
        let value = retry(
            10,
            || {
                calls += 1;
                (calls == 3).then_some(calls)
            },
            || 0,
        );
        assert_eq!(value, 3);

        let mut calls = 0;
        let value = retry(
            5,
            || {
                calls += 1;
                None::<u32>
            },
            || 99,
        );
        assert_eq!(value, 99);
        assert_eq!(calls, 5);
    }

    #[test]
    fn distinct_example_avoids_question_answer() {
        let mut rng = StdRng::seed_from_u64(4);
        let fixed = || {
            [
                worked("1 + 1".into(), vec![], 2),
                worked("1 + 2".into(), vec![], 3),
            ]
        };
        let ex = distinct_example(&mut rng, "2", |_| worked("x".into(), vec![], 2), fixed());
        assert_eq!(ex.answer, "3");
        let ex = distinct_example(&mut rng, "7", |_| worked("x".into(), vec![], 5), fixed());
        assert_eq!(ex.answer, "5");
    }

    #[test]
    fn steps_are_numbered_from_one() {
        let s = steps([("A", "a".to_string()), ("B", "b".to_string())]);
        assert_eq!(s[0].step, 1);
        assert_eq!(s[1].step, 2);
        assert_eq!(s[1].title, "B");
    }
}
