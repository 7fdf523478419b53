//! Learner input error types.
//!
//! The checker never surfaces these to its caller. Each variant maps to a
//! fixed guidance message that is returned as feedback instead.

use thiserror::Error;

/// Ways a learner's raw answer text can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Not a finite real number.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// Neither `n/d` nor `w n/d`.
    #[error("not a fraction or mixed number: {0:?}")]
    NotAFraction(String),

    /// A well-formed fraction with a zero denominator.
    #[error("zero denominator in {0:?}")]
    ZeroDenominator(String),

    /// Not `H:MM` or `HH:MM`.
    #[error("not a clock time: {0:?}")]
    NotATime(String),
}

impl InputError {
    /// The guidance shown to the learner for this error.
    pub fn feedback(&self) -> &'static str {
        match self {
            InputError::NotANumber(_) => "Enter a number.",
            InputError::NotAFraction(_) | InputError::ZeroDenominator(_) => {
                "Enter a fraction like 3/4 (or a mixed number like 1 1/2)."
            }
            InputError::NotATime(_) => "Enter time like 3:05.",
        }
    }
}
