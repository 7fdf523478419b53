//! sea-tutor-core — question generators, answer checker and paper composer.
//!
//! This crate defines the question model, the per-skill generators and their
//! catalog, the answer-equivalence checker, and the paper and attempt-log
//! plumbing the front ends build on.

pub mod attempts;
pub mod checker;
pub mod config;
pub mod error;
pub mod fraction;
pub mod generators;
pub mod model;
pub mod paper;
pub mod shape;
pub mod statistics;

pub use checker::{check_answer, CheckOutcome};
pub use generators::{generate_by_skill, standard_catalog, Catalog};
pub use model::{AnswerSpec, GenerationContext, Question};
pub use paper::{compose_paper, Paper};
pub use shape::PaperShape;
