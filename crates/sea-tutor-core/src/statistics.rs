//! Aggregate statistics over attempt logs.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::attempts::AttemptRecord;

/// Summary over a set of attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub total_attempts: usize,
    pub correct_attempts: usize,
    /// Correct / total, 0 when there are no attempts.
    pub accuracy: f64,
    pub sessions: usize,
    /// Distinct questions attempted.
    pub questions: usize,
    /// Correct on the first try without any help.
    pub first_try_unaided: usize,
    pub help: HelpUsage,
    pub avg_time_sec: f64,
    /// Per-skill figures keyed by skill id. Attempts without a skill id are
    /// grouped under `"unknown"`.
    pub per_skill: BTreeMap<String, SkillStats>,
}

/// How often each kind of help was opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpUsage {
    pub hints: usize,
    pub examples: usize,
    pub tutor: usize,
    pub show_step: usize,
    pub reveal_solution: usize,
}

/// Statistics for a single skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    pub attempts: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub avg_time_sec: f64,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Compute the summary for a slice of attempts.
pub fn summarize_attempts(attempts: &[AttemptRecord]) -> AttemptSummary {
    let total = attempts.len();
    let correct = attempts.iter().filter(|a| a.is_correct).count();
    let total_time: u64 = attempts.iter().map(|a| a.time_spent_sec as u64).sum();

    let sessions: HashSet<&str> = attempts.iter().map(|a| a.session_id.as_str()).collect();
    let questions: HashSet<&str> = attempts.iter().map(|a| a.question_id.as_str()).collect();

    let help = HelpUsage {
        hints: attempts.iter().filter(|a| a.hint_level_used > 0).count(),
        examples: attempts.iter().filter(|a| a.used_example).count(),
        tutor: attempts.iter().filter(|a| a.used_tutor).count(),
        show_step: attempts.iter().filter(|a| a.used_show_step).count(),
        reveal_solution: attempts.iter().filter(|a| a.used_reveal_solution).count(),
    };

    // (attempts, correct, total seconds) per skill
    let mut grouped: BTreeMap<String, (usize, usize, u64)> = BTreeMap::new();
    for a in attempts {
        let key = a.skill_id.clone().unwrap_or_else(|| "unknown".to_string());
        let entry = grouped.entry(key).or_default();
        entry.0 += 1;
        entry.1 += usize::from(a.is_correct);
        entry.2 += a.time_spent_sec as u64;
    }
    let per_skill = grouped
        .into_iter()
        .map(|(skill, (n, c, secs))| {
            (
                skill,
                SkillStats {
                    attempts: n,
                    correct: c,
                    accuracy: ratio(c, n),
                    avg_time_sec: if n == 0 { 0.0 } else { secs as f64 / n as f64 },
                },
            )
        })
        .collect();

    AttemptSummary {
        total_attempts: total,
        correct_attempts: correct,
        accuracy: ratio(correct, total),
        sessions: sessions.len(),
        questions: questions.len(),
        first_try_unaided: attempts
            .iter()
            .filter(|a| a.is_correct && a.attempt_count <= 1 && !a.used_help())
            .count(),
        help,
        avg_time_sec: if total == 0 {
            0.0
        } else {
            total_time as f64 / total as f64
        },
        per_skill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(session: &str, skill: Option<&str>, correct: bool, secs: u32) -> AttemptRecord {
        let mut a = AttemptRecord::new(session, format!("q_{session}_{secs}"), "7", correct);
        a.skill_id = skill.map(String::from);
        a.time_spent_sec = secs;
        a
    }

    #[test]
    fn empty_summary() {
        let s = summarize_attempts(&[]);
        assert_eq!(s.total_attempts, 0);
        assert_eq!(s.accuracy, 0.0);
        assert_eq!(s.avg_time_sec, 0.0);
        assert!(s.per_skill.is_empty());
    }

    #[test]
    fn totals_and_accuracy() {
        let mut helped = attempt("s2", Some("std4_table_read"), true, 30);
        helped.used_example = true;
        helped.hint_level_used = 2;
        let mut retried = attempt("s2", Some("core_add_sub"), true, 20);
        retried.attempt_count = 2;

        let attempts = vec![
            attempt("s1", Some("core_add_sub"), true, 10),
            attempt("s1", Some("core_add_sub"), false, 40),
            helped,
            retried,
            attempt("s3", None, false, 0),
        ];
        let s = summarize_attempts(&attempts);

        assert_eq!(s.total_attempts, 5);
        assert_eq!(s.correct_attempts, 3);
        assert!((s.accuracy - 0.6).abs() < 1e-9);
        assert_eq!(s.sessions, 3);
        assert_eq!(s.first_try_unaided, 1);
        assert_eq!(s.help.examples, 1);
        assert_eq!(s.help.hints, 1);
        assert_eq!(s.help.tutor, 0);
        assert!((s.avg_time_sec - 20.0).abs() < 1e-9);

        let add_sub = &s.per_skill["core_add_sub"];
        assert_eq!(add_sub.attempts, 3);
        assert_eq!(add_sub.correct, 2);
        assert!((add_sub.avg_time_sec - 70.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.per_skill["unknown"].correct, 0);
    }
}
