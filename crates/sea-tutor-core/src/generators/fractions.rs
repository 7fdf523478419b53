//! Fraction and percentage generators.
//!
//! All fraction work uses [`Fraction`] so answers are exact and already in
//! lowest terms when they reach the answer spec.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use super::{distinct_example, pace, pick, retry, steps, worked, Draft, MAX_ATTEMPTS};
use crate::fraction::{gcd, lcm, Fraction};
use crate::model::{AnswerSpec, GenerationContext, Question, WorkedExample};

fn fraction_answer(f: Fraction) -> AnswerSpec {
    AnswerSpec::Fraction {
        numerator: f.numerator(),
        denominator: f.denominator(),
        accept_equivalents: true,
    }
}

// ---------------------------------------------------------------------------
// Simplify
// ---------------------------------------------------------------------------

/// Largest base denominator and largest scale factor per difficulty.
fn simplify_limits(difficulty: u8) -> (i64, i64) {
    match difficulty {
        1 => (12, 5),
        2 => (20, 6),
        3 => (30, 9),
        _ => (50, 12),
    }
}

/// Shows `(n·k)/(d·k)` and asks for the fraction in lowest terms.
pub fn simplify(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let (max_d, max_k) = simplify_limits(ctx.difficulty);
    let (shown_n, shown_d, reduced) = retry(
        MAX_ATTEMPTS,
        || {
            let d = rng.random_range(2..=max_d);
            let n = rng.random_range(1..d);
            let k = rng.random_range(2..=max_k);
            Fraction::new(n * k, d * k)
                .filter(|f| !f.is_whole())
                .map(|f| (n * k, d * k, f))
        },
        || (6, 8, Fraction::from_reduced(3, 4)),
    );
    let hcf = gcd(shown_n, shown_d);
    let answer = reduced.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let d: i64 = r.random_range(3..=6);
            let n: i64 = r.random_range(1..d);
            let k: i64 = r.random_range(2..=3);
            let (sn, sd) = (n * k, d * k);
            let h = gcd(sn, sd);
            worked(
                format!("{sn}/{sd} = ?"),
                vec![
                    format!("HCF of {sn} and {sd} is {h}"),
                    format!("{sn}÷{h} / {sd}÷{h} = {}/{}", sn / h, sd / h),
                ],
                format!("{}/{}", sn / h, sd / h),
            )
        },
        [
            worked(
                "8/12 = ?".into(),
                vec!["HCF of 8 and 12 is 4".into(), "8÷4 / 12÷4 = 2/3".into()],
                "2/3",
            ),
            worked(
                "9/12 = ?".into(),
                vec!["HCF of 9 and 12 is 3".into(), "9÷3 / 12÷3 = 3/4".into()],
                "3/4",
            ),
        ],
    );

    Draft {
        id_prefix: "frac",
        skill_id: "std4_simplify_fractions",
        prompt_text: format!("Simplify: {shown_n}/{shown_d}"),
        correct_answer: fraction_answer(reduced),
        solution_steps: steps([
            ("Find a common factor", format!("The HCF of {shown_n} and {shown_d} is {hcf}.")),
            ("Divide top and bottom", format!("{shown_n}÷{hcf} / {shown_d}÷{hcf}")),
            ("Simplify", format!("= {reduced}")),
        ]),
        rule: "To simplify a fraction, divide numerator and denominator by their highest common factor (HCF).",
        example,
        common_mistakes: &[
            "Dividing only the top or only the bottom.",
            "Not reducing fully.",
        ],
        estimated_time_sec: pace(90, ctx.marks),
    }
    .finish(ctx)
}

// ---------------------------------------------------------------------------
// Add / subtract with unlike denominators
// ---------------------------------------------------------------------------

const DENOMS_BASIC: [i64; 8] = [2, 3, 4, 5, 6, 8, 10, 12];
const DENOMS_RICH: [i64; 11] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 15];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FracOp {
    Add,
    Sub,
}

impl FracOp {
    fn symbol(self) -> char {
        match self {
            FracOp::Add => '+',
            FracOp::Sub => '-',
        }
    }
}

struct Combination {
    lhs: Fraction,
    rhs: Fraction,
    op: FracOp,
    result: Fraction,
}

/// Draw two proper fractions in lowest terms with distinct denominators.
/// Rejects results that are not positive or that are whole numbers.
fn draw_combination(denoms: &[i64], rng: &mut dyn RngCore) -> Option<Combination> {
    let picked: Vec<i64> = denoms.choose_multiple(&mut *rng, 2).copied().collect();
    let &[d1, d2] = picked.as_slice() else {
        return None;
    };
    let (n1, n2) = (rng.random_range(1..d1), rng.random_range(1..d2));
    if gcd(n1, d1) != 1 || gcd(n2, d2) != 1 {
        return None;
    }

    let (mut lhs, mut rhs) = (Fraction::new(n1, d1)?, Fraction::new(n2, d2)?);
    let op = if rng.random_bool(0.5) {
        FracOp::Add
    } else {
        FracOp::Sub
    };
    if op == FracOp::Sub && rhs > lhs {
        std::mem::swap(&mut lhs, &mut rhs);
    }
    let result = match op {
        FracOp::Add => lhs.checked_add(rhs)?,
        FracOp::Sub => lhs.checked_sub(rhs)?,
    };

    (result.is_positive() && !result.is_whole()).then_some(Combination {
        lhs,
        rhs,
        op,
        result,
    })
}

/// `1/a ± 1/b` with `a < b`, so a difference stays positive.
fn unit_fraction_example(op: FracOp, rng: &mut dyn RngCore) -> WorkedExample {
    let picked: Vec<i64> = [2, 3, 4, 6].choose_multiple(rng, 2).copied().collect();
    let (a, b) = (picked[0].min(picked[1]), picked[0].max(picked[1]));
    let (lhs, rhs) = (Fraction::from_reduced(1, a), Fraction::from_reduced(1, b));
    let l = lcm(a, b);
    let (ea, eb) = (l / a, l / b);
    let (raw, result) = match op {
        FracOp::Add => (ea + eb, lhs.checked_add(rhs)),
        FracOp::Sub => (ea - eb, lhs.checked_sub(rhs)),
    };
    let result = result.unwrap_or(Fraction::from_reduced(raw, l));
    let s = op.symbol();
    worked(
        format!("{lhs} {s} {rhs} = ?"),
        vec![
            format!("{lhs} = {ea}/{l}, {rhs} = {eb}/{l}"),
            format!("{ea}/{l} {s} {eb}/{l} = {raw}/{l}"),
            format!("{raw}/{l} = {result}"),
        ],
        result,
    )
}

fn fixed_unit_examples(op: FracOp) -> [WorkedExample; 2] {
    match op {
        FracOp::Add => [
            worked(
                "1/3 + 1/6 = ?".into(),
                vec!["1/3 = 2/6".into(), "2/6 + 1/6 = 3/6".into(), "3/6 = 1/2".into()],
                "1/2",
            ),
            worked(
                "1/2 + 1/3 = ?".into(),
                vec!["1/2 = 3/6, 1/3 = 2/6".into(), "3/6 + 2/6 = 5/6".into()],
                "5/6",
            ),
        ],
        FracOp::Sub => [
            worked(
                "1/2 - 1/3 = ?".into(),
                vec!["1/2 = 3/6, 1/3 = 2/6".into(), "3/6 - 2/6 = 1/6".into()],
                "1/6",
            ),
            worked(
                "1/2 - 1/6 = ?".into(),
                vec!["1/2 = 3/6".into(), "3/6 - 1/6 = 2/6".into(), "2/6 = 1/3".into()],
                "1/3",
            ),
        ],
    }
}

pub fn add_sub_unlike(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let denoms: &[i64] = if ctx.difficulty >= 3 {
        &DENOMS_RICH
    } else {
        &DENOMS_BASIC
    };
    let Combination {
        lhs,
        rhs,
        op,
        result,
    } = retry(
        MAX_ATTEMPTS,
        || draw_combination(denoms, &mut *rng),
        || Combination {
            lhs: Fraction::from_reduced(1, 3),
            rhs: Fraction::from_reduced(1, 4),
            op: FracOp::Add,
            result: Fraction::from_reduced(7, 12),
        },
    );

    let s = op.symbol();
    let common = lcm(lhs.denominator(), rhs.denominator());
    let eq1 = lhs.numerator() * (common / lhs.denominator());
    let eq2 = rhs.numerator() * (common / rhs.denominator());
    let raw = match op {
        FracOp::Add => eq1 + eq2,
        FracOp::Sub => eq1 - eq2,
    };
    let answer = result.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| unit_fraction_example(op, r),
        fixed_unit_examples(op),
    );

    Draft {
        id_prefix: "fracop",
        skill_id: "std5_add_sub_unlike_denoms",
        prompt_text: format!("Calculate: {lhs} {s} {rhs}"),
        correct_answer: fraction_answer(result),
        solution_steps: steps([
            (
                "Common denominator",
                format!("LCM of {} and {} is {common}.", lhs.denominator(), rhs.denominator()),
            ),
            ("Rewrite fractions", format!("{lhs} = {eq1}/{common}, {rhs} = {eq2}/{common}")),
            ("Add/Subtract", format!("{eq1} {s} {eq2} = {raw}, so {raw}/{common}")),
            ("Simplify", format!("= {result}")),
        ]),
        rule: "Make denominators the same (LCM), then add/subtract the numerators.",
        example,
        common_mistakes: &["Adding denominators.", "Forgetting to simplify."],
        estimated_time_sec: pace(150, ctx.marks),
    }
    .finish(ctx)
}

// ---------------------------------------------------------------------------
// Fraction of a quantity
// ---------------------------------------------------------------------------

const QUANTITY_DENOMS: [i64; 8] = [2, 3, 4, 5, 6, 8, 10, 12];

fn multiplier_range(difficulty: u8) -> (i64, i64) {
    match difficulty {
        1 => (1, 10),
        2 => (2, 25),
        3 => (5, 50),
        _ => (10, 100),
    }
}

/// `n/d` of a quantity that is a multiple of `d`, so the answer is whole.
pub fn fraction_of_quantity(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let denoms = if ctx.difficulty >= 3 {
        &QUANTITY_DENOMS[..]
    } else {
        &QUANTITY_DENOMS[..7]
    };
    let d = pick(rng, denoms);
    let numerators: Vec<i64> = (1..d).filter(|&n| gcd(n, d) == 1).collect();
    let n = pick(rng, &numerators);
    let (lo, hi) = multiplier_range(ctx.difficulty);
    let share = rng.random_range(lo..=hi);
    let quantity = d * share;
    let ans = share * n;
    let answer = ans.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let d: i64 = pick(r, &[2, 3, 4]);
            let m: i64 = r.random_range(2..=6);
            let n = d - 1;
            worked(
                format!("Find {n}/{d} of {}", d * m),
                vec![format!("{} ÷ {d} = {m}", d * m), format!("{m} × {n} = {}", m * n)],
                m * n,
            )
        },
        [
            worked(
                "Find 2/3 of 12".into(),
                vec!["12 ÷ 3 = 4".into(), "4 × 2 = 8".into()],
                8,
            ),
            worked(
                "Find 3/4 of 20".into(),
                vec!["20 ÷ 4 = 5".into(), "5 × 3 = 15".into()],
                15,
            ),
        ],
    );

    Draft {
        id_prefix: "fracqty",
        skill_id: "std4_fraction_of_quantity",
        prompt_text: format!("Find {n}/{d} of {quantity}."),
        correct_answer: AnswerSpec::integer(ans),
        solution_steps: steps([
            ("Divide by the denominator", format!("{quantity} ÷ {d} = {share}")),
            ("Multiply by the numerator", format!("{share} × {n} = {ans}")),
        ]),
        rule: "To find a fraction of an amount, divide by the denominator, then multiply by the numerator.",
        example,
        common_mistakes: &[
            "Dividing by the numerator instead of the denominator.",
            "Stopping after the division step.",
        ],
        estimated_time_sec: pace(90, ctx.marks),
    }
    .finish(ctx)
}

// ---------------------------------------------------------------------------
// Percent of a quantity
// ---------------------------------------------------------------------------

pub(crate) const PERCENTS: [i64; 8] = [10, 20, 25, 30, 40, 50, 60, 75];

/// Every quantity is a multiple of 20, so every percent above gives a whole
/// answer.
pub(crate) const QUANTITIES: [i64; 18] = [
    20, 40, 60, 80, 100, 120, 140, 160, 180, 200, 240, 300, 400, 500, 600, 800, 1000, 1200,
];

fn quantity_pool(difficulty: u8) -> &'static [i64] {
    match difficulty {
        1 => &QUANTITIES[..5],
        2 => &QUANTITIES[..10],
        3 => &QUANTITIES[..14],
        _ => &QUANTITIES[..],
    }
}

pub fn percent_of_quantity(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let p = pick(rng, &PERCENTS);
    let base = pick(rng, quantity_pool(ctx.difficulty));
    debug_assert_eq!(p * base % 100, 0);
    let ans = p * base / 100;
    let answer = ans.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let p: i64 = pick(r, &[10, 25, 50]);
            let q: i64 = pick(r, &[40, 80, 120, 200]);
            worked(
                format!("Find {p}% of {q}"),
                vec![format!("{p}% = {p}/100"), format!("{p}/100 × {q} = {}", p * q / 100)],
                p * q / 100,
            )
        },
        [
            worked(
                "Find 25% of 80".into(),
                vec!["25% = 25/100".into(), "25/100 × 80 = 20".into()],
                20,
            ),
            worked(
                "Find 10% of 40".into(),
                vec!["10% = 10/100".into(), "10/100 × 40 = 4".into()],
                4,
            ),
        ],
    );

    Draft {
        id_prefix: "pct",
        skill_id: "std5_percent_of_quantity",
        prompt_text: format!("Find {p}% of {base}."),
        correct_answer: AnswerSpec::integer(ans),
        solution_steps: steps([
            ("Convert percent", format!("{p}% = {p}/100")),
            ("Multiply", format!("{p}/100 × {base} = {ans}")),
        ]),
        rule: "Percent means 'out of 100'. Multiply by p/100.",
        example,
        common_mistakes: &[
            "Dividing by the percent instead of multiplying.",
            "Forgetting /100.",
        ],
        estimated_time_sec: pace(150, ctx.marks),
    }
    .finish(ctx)
}
