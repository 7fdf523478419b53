//! Answer-equivalence checker.
//!
//! Parses a learner's free-text answer into the domain named by the answer
//! tag (number, fraction, clock time) and compares it with the canonical
//! answer. Malformed input is never an error for the caller: it becomes an
//! incorrect outcome carrying a short guidance message.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::fraction::Fraction;
use crate::model::AnswerSpec;

const CORRECT: &str = "Correct!";
const WRONG_NUMBER: &str = "Not quite. Try again.";
const WRONG_FRACTION: &str = "Not quite. Simplify if needed and try again.";
const WRONG_TIME: &str = "Not quite. Check your carry of minutes to hours.";
const UNSUPPORTED: &str = "This question type is not supported yet.";

/// Result of checking one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub is_correct: bool,
    pub feedback: String,
}

impl CheckOutcome {
    fn new(is_correct: bool, feedback: &str) -> Self {
        Self {
            is_correct,
            feedback: feedback.to_string(),
        }
    }

    fn graded(is_correct: bool, wrong_feedback: &str) -> Self {
        Self::new(is_correct, if is_correct { CORRECT } else { wrong_feedback })
    }

    fn rejected(error: InputError) -> Self {
        tracing::debug!("rejected learner input: {error}");
        Self::new(false, error.feedback())
    }
}

/// A fraction exactly as the learner wrote it, before reduction.
///
/// Mixed numbers are converted to improper form (`1 1/2` → `3/2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnteredFraction {
    pub numerator: i64,
    pub denominator: i64,
}

/// Check a learner's answer against the canonical answer.
pub fn check_answer(user_input: &str, correct: &AnswerSpec) -> CheckOutcome {
    let input = user_input.trim();

    match correct {
        AnswerSpec::Numeric { value, tolerance } => match parse_number(input) {
            Ok(entered) => CheckOutcome::graded((entered - value).abs() <= *tolerance, WRONG_NUMBER),
            Err(e) => CheckOutcome::rejected(e),
        },
        AnswerSpec::Fraction {
            numerator,
            denominator,
            accept_equivalents,
        } => match parse_fraction(input) {
            Ok(entered) => {
                let ok = if *accept_equivalents {
                    let target = Fraction::new(*numerator, *denominator);
                    target.is_some() && Fraction::new(entered.numerator, entered.denominator) == target
                } else {
                    entered.numerator == *numerator && entered.denominator == *denominator
                };
                CheckOutcome::graded(ok, WRONG_FRACTION)
            }
            Err(e) => CheckOutcome::rejected(e),
        },
        AnswerSpec::TimeHhmm { value } => match normalize_time(input) {
            Ok(entered) => CheckOutcome::graded(entered == value.trim(), WRONG_TIME),
            Err(e) => CheckOutcome::rejected(e),
        },
        AnswerSpec::Unsupported => CheckOutcome::new(false, UNSUPPORTED),
    }
}

/// Parse a finite real number.
pub fn parse_number(input: &str) -> Result<f64, InputError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber(input.to_string()))
}

/// Parse `w n/d` (mixed number) or `n/d`.
///
/// The mixed form needs whitespace between the whole part and the fraction;
/// the simple form ignores whitespace anywhere. Only ASCII digits are
/// accepted, with an optional leading `-` on the first component.
pub fn parse_fraction(input: &str) -> Result<EnteredFraction, InputError> {
    let not_a_fraction = || InputError::NotAFraction(input.to_string());
    let parts: Vec<&str> = input.split_whitespace().collect();

    if let [whole, fraction] = parts.as_slice() {
        if let (Some(whole), Some((n, d))) = (parse_signed(whole), fraction.split_once('/')) {
            let (n, d) = (parse_digits(n), parse_digits(d));
            if let (Some(n), Some(d)) = (n, d) {
                if d == 0 {
                    return Err(InputError::ZeroDenominator(input.to_string()));
                }
                let scaled = whole.checked_mul(d).ok_or_else(not_a_fraction)?;
                let numerator = if whole >= 0 {
                    scaled.checked_add(n)
                } else {
                    scaled.checked_sub(n)
                }
                .ok_or_else(not_a_fraction)?;
                return Ok(EnteredFraction {
                    numerator,
                    denominator: d,
                });
            }
        }
    }

    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let (n, d) = compact.split_once('/').ok_or_else(not_a_fraction)?;
    let numerator = parse_signed(n).ok_or_else(not_a_fraction)?;
    let denominator = parse_digits(d).ok_or_else(not_a_fraction)?;
    if denominator == 0 {
        return Err(InputError::ZeroDenominator(input.to_string()));
    }
    Ok(EnteredFraction {
        numerator,
        denominator,
    })
}

/// Normalize `H:MM` / `HH:MM` to `"{hour}:{mm}"` with no leading zero on
/// the hour. Spaces are ignored; minutes must be exactly two digits.
pub fn normalize_time(input: &str) -> Result<String, InputError> {
    let not_a_time = || InputError::NotATime(input.to_string());
    let compact = input.replace(' ', "");
    let (hour, minutes) = compact.split_once(':').ok_or_else(not_a_time)?;

    if !(1..=2).contains(&hour.len()) || minutes.len() != 2 || !is_digits(minutes) {
        return Err(not_a_time());
    }
    let hour = parse_digits(hour).ok_or_else(not_a_time)?;
    Ok(format!("{hour}:{minutes}"))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> Option<i64> {
    if is_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_signed(s: &str) -> Option<i64> {
    match s.strip_prefix('-') {
        Some(rest) => parse_digits(rest).map(|v| -v),
        None => parse_digits(s),
    }
}
