//! Whole-number arithmetic generators.

use rand::{Rng, RngCore};

use super::{distinct_example, pace, steps, worked, Draft};
use crate::model::{AnswerSpec, GenerationContext, Question, WorkedExample};

/// Largest operand for add/sub at each difficulty.
fn operand_ceiling(difficulty: u8) -> u32 {
    match difficulty {
        1 => 100,
        2 => 1000,
        _ => 9999,
    }
}

fn operand_floor(difficulty: u8) -> u32 {
    if difficulty > 1 {
        10
    } else {
        0
    }
}

fn draw_operands(ctx: &GenerationContext, rng: &mut dyn RngCore) -> (u32, u32) {
    let range = operand_floor(ctx.difficulty)..=operand_ceiling(ctx.difficulty);
    (rng.random_range(range.clone()), rng.random_range(range))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
}

impl Op {
    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
        }
    }

    /// Apply with operands ordered so a difference is never negative.
    fn apply(self, a: u32, b: u32) -> (u32, u32, u32) {
        match self {
            Op::Add => (a, b, a + b),
            Op::Sub => {
                let (a, b) = (a.max(b), a.min(b));
                (a, b, a - b)
            }
        }
    }
}

const ADD_SUB_RULE: &str =
    "Work carefully with the signs. For subtraction, you can subtract the smaller from the larger.";
const ADD_SUB_MISTAKES: &[&str] = &[
    "Mixing up addition and subtraction.",
    "Borrowing/carrying errors in column work.",
];

fn add_sub_example(op: Op, rng: &mut dyn RngCore) -> WorkedExample {
    let (a, b, ans) = op.apply(rng.random_range(0..=50), rng.random_range(0..=50));
    let s = op.symbol();
    worked(format!("{a} {s} {b} = ?"), vec![format!("{a} {s} {b} = {ans}")], ans)
}

fn add_sub_fixed(op: Op) -> [WorkedExample; 2] {
    match op {
        Op::Add => [
            worked("23 + 15 = ?".into(), vec!["23 + 15 = 38".into()], 38),
            worked("41 + 7 = ?".into(), vec!["41 + 7 = 48".into()], 48),
        ],
        Op::Sub => [
            worked("45 - 12 = ?".into(), vec!["45 - 12 = 33".into()], 33),
            worked("30 - 9 = ?".into(), vec!["30 - 9 = 21".into()], 21),
        ],
    }
}

fn two_operand(ctx: &GenerationContext, rng: &mut dyn RngCore, op: Op, skill_id: &'static str) -> Question {
    let (a, b) = draw_operands(ctx, rng);
    let (a, b, ans) = op.apply(a, b);
    let s = op.symbol();
    let answer = ans.to_string();

    Draft {
        id_prefix: "arith",
        skill_id,
        prompt_text: format!("Calculate: {a} {s} {b}"),
        correct_answer: AnswerSpec::integer(ans.into()),
        solution_steps: steps([("Compute", format!("{a} {s} {b} = {ans}"))]),
        rule: ADD_SUB_RULE,
        example: distinct_example(rng, &answer, |r| add_sub_example(op, r), add_sub_fixed(op)),
        common_mistakes: ADD_SUB_MISTAKES,
        estimated_time_sec: pace(60, ctx.marks),
    }
    .finish(ctx)
}

/// Plain two-operand addition. Also the catalog's fallback generator.
pub fn addition(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    two_operand(ctx, rng, Op::Add, super::FALLBACK_SKILL)
}

/// Addition or subtraction; differences are never negative.
pub fn add_sub(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let op = if rng.random_bool(0.5) { Op::Add } else { Op::Sub };
    two_operand(ctx, rng, op, "core_add_sub")
}

/// A 2-digit number times a 1-digit number.
pub fn multiply(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let a: u32 = rng.random_range(10..=99);
    let b: u32 = rng.random_range(2..=9);
    let (tens, ones) = (a / 10 * 10, a % 10);
    let ans = a * b;
    let answer = ans.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let a: u32 = r.random_range(11..=19);
            let b: u32 = r.random_range(2..=5);
            worked(
                format!("{a} × {b} = ?"),
                vec![
                    format!("10 × {b} = {}", 10 * b),
                    format!("{} × {b} = {}", a - 10, (a - 10) * b),
                    format!("{} + {} = {}", 10 * b, (a - 10) * b, a * b),
                ],
                a * b,
            )
        },
        [
            worked(
                "14 × 3 = ?".into(),
                vec!["10 × 3 = 30".into(), "4 × 3 = 12".into(), "30 + 12 = 42".into()],
                42,
            ),
            worked(
                "12 × 4 = ?".into(),
                vec!["10 × 4 = 40".into(), "2 × 4 = 8".into(), "40 + 8 = 48".into()],
                48,
            ),
        ],
    );

    Draft {
        id_prefix: "mul",
        skill_id: "core_multiply_2d_1d",
        prompt_text: format!("Calculate: {a} × {b}"),
        correct_answer: AnswerSpec::integer(ans.into()),
        solution_steps: steps([
            ("Split the tens and ones", format!("{a} = {tens} + {ones}")),
            ("Multiply each part", format!("{tens} × {b} = {}, {ones} × {b} = {}", tens * b, ones * b)),
            ("Add the parts", format!("{} + {} = {ans}", tens * b, ones * b)),
        ]),
        rule: "Split the larger number into tens and ones, multiply each part, then add.",
        example,
        common_mistakes: &[
            "Forgetting to carry into the tens.",
            "Multiplying only the ones digit.",
        ],
        estimated_time_sec: pace(75, ctx.marks),
    }
    .finish(ctx)
}

fn quotient_range(difficulty: u8) -> (u32, u32) {
    match difficulty {
        1 => (2, 10),
        2 => (10, 99),
        3 => (10, 250),
        _ => (100, 999),
    }
}

/// Division built as divisor × quotient, so the remainder is always zero.
pub fn exact_division(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let divisor: u32 = if ctx.difficulty <= 2 {
        rng.random_range(2..=9)
    } else {
        rng.random_range(2..=12)
    };
    let (lo, hi) = quotient_range(ctx.difficulty);
    let quotient: u32 = rng.random_range(lo..=hi);
    let dividend = divisor * quotient;
    let answer = quotient.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let d: u32 = r.random_range(2..=5);
            let q: u32 = r.random_range(2..=9);
            worked(
                format!("{} ÷ {d} = ?", d * q),
                vec![format!("{d} × {q} = {}", d * q), format!("So {} ÷ {d} = {q}", d * q)],
                q,
            )
        },
        [
            worked(
                "24 ÷ 4 = ?".into(),
                vec!["4 × 6 = 24".into(), "So 24 ÷ 4 = 6".into()],
                6,
            ),
            worked(
                "35 ÷ 5 = ?".into(),
                vec!["5 × 7 = 35".into(), "So 35 ÷ 5 = 7".into()],
                7,
            ),
        ],
    );

    Draft {
        id_prefix: "div",
        skill_id: "core_exact_division",
        prompt_text: format!("Calculate: {dividend} ÷ {divisor}"),
        correct_answer: AnswerSpec::integer(quotient.into()),
        solution_steps: steps([
            ("Think multiplication", format!("{divisor} × ? = {dividend}")),
            ("Find the missing factor", format!("{divisor} × {quotient} = {dividend}")),
            ("Answer", format!("{dividend} ÷ {divisor} = {quotient}")),
        ]),
        rule: "Division undoes multiplication: find the number that multiplies the divisor to make the dividend.",
        example,
        common_mistakes: &[
            "Swapping the dividend and the divisor.",
            "Stopping before dividing every digit.",
        ],
        estimated_time_sec: pace(75, ctx.marks),
    }
    .finish(ctx)
}
