//! Core data model types for sea-tutor.
//!
//! A [`Question`] is produced once by a skill generator, serialized into a
//! paper, and never mutated afterwards. The answer checker only ever reads
//! its [`AnswerSpec`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest and highest supported difficulty ordinals.
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 4;

/// A generated practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identifier, unique per generated question.
    pub question_id: String,
    /// The catalog skill that produced this question.
    pub skill_id: String,
    /// Paper section this question was generated for.
    pub section: String,
    /// Marks awarded for a correct answer.
    pub marks: u32,
    /// Difficulty ordinal the generator scaled its numbers by.
    pub difficulty: u8,
    /// The problem statement shown to the learner.
    pub prompt_text: String,
    /// Input widget hint (`numeric`, `fraction`, `text_time`).
    pub answer_type: String,
    /// Canonical answer the checker compares against.
    pub correct_answer: AnswerSpec,
    /// Worked solution using this question's own numbers.
    pub solution_steps: Vec<SolutionStep>,
    /// An analogous worked example with different numbers.
    pub example_help: ExampleHelp,
    /// Likely learner errors for this kind of question.
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    /// Pacing hint in seconds.
    pub estimated_time_sec: u32,
}

/// Tagged answer specification.
///
/// The tag decides how the checker parses learner input. Unknown tags
/// deserialize to [`AnswerSpec::Unsupported`] so old or foreign payloads
/// never fail to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerSpec {
    Numeric {
        value: f64,
        #[serde(default)]
        tolerance: f64,
    },
    Fraction {
        numerator: i64,
        denominator: i64,
        #[serde(default = "default_true")]
        accept_equivalents: bool,
    },
    TimeHhmm {
        value: String,
    },
    #[serde(other)]
    Unsupported,
}

fn default_true() -> bool {
    true
}

impl AnswerSpec {
    /// An exact integer answer.
    pub fn integer(value: i64) -> Self {
        AnswerSpec::Numeric {
            value: value as f64,
            tolerance: 0.0,
        }
    }

    /// Label for the input widget matching this answer kind.
    pub fn answer_type(&self) -> &'static str {
        match self {
            AnswerSpec::Numeric { .. } => "numeric",
            AnswerSpec::Fraction { .. } => "fraction",
            AnswerSpec::TimeHhmm { .. } => "text_time",
            AnswerSpec::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for AnswerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerSpec::Numeric { value, .. } if value.fract() == 0.0 => {
                write!(f, "{}", *value as i64)
            }
            AnswerSpec::Numeric { value, .. } => write!(f, "{value}"),
            AnswerSpec::Fraction {
                numerator,
                denominator,
                ..
            } => write!(f, "{numerator}/{denominator}"),
            AnswerSpec::TimeHhmm { value } => write!(f, "{value}"),
            AnswerSpec::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One labelled line of a worked solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub step: u32,
    pub title: String,
    pub work: String,
}

/// Teaching help attached to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleHelp {
    /// The method in one sentence.
    pub rule: String,
    /// Worked examples illustrating the rule.
    pub examples: Vec<WorkedExample>,
}

/// A fully worked example problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub prompt: String,
    pub steps: Vec<String>,
    pub answer: String,
}

/// Curriculum strand a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Number,
    Measurement,
    Geometry,
    Statistics,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Number => write!(f, "number"),
            Strand::Measurement => write!(f, "measurement"),
            Strand::Geometry => write!(f, "geometry"),
            Strand::Statistics => write!(f, "statistics"),
        }
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "number" => Ok(Strand::Number),
            "measurement" => Ok(Strand::Measurement),
            "geometry" => Ok(Strand::Geometry),
            "statistics" | "data" => Ok(Strand::Statistics),
            other => Err(format!("unknown strand: {other}")),
        }
    }
}

/// The caller's request context, echoed into every generated question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    pub section: String,
    pub marks: u32,
    pub difficulty: u8,
}

impl GenerationContext {
    /// Build a context, clamping marks to at least 1 and difficulty into
    /// `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
    pub fn new(section: impl Into<String>, marks: u32, difficulty: u8) -> Self {
        Self {
            section: section.into(),
            marks: marks.max(1),
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
        }
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new("I", 1, MIN_DIFFICULTY)
    }
}
