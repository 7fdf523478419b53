//! Measurement generators: elapsed time and rectangle perimeter/area.

use rand::{Rng, RngCore};

use super::{distinct_example, pace, pick, steps, worked, Draft};
use crate::model::{AnswerSpec, GenerationContext, Question};

// ---------------------------------------------------------------------------
// Elapsed time
// ---------------------------------------------------------------------------

const START_MINUTES: [u32; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];
const DURATIONS: [u32; 16] = [
    15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 75, 90, 105, 120, 135, 150,
];

fn duration_pool(difficulty: u8) -> &'static [u32] {
    match difficulty {
        1 => &DURATIONS[..7],
        2 => &DURATIONS[..12],
        _ => &DURATIONS[..],
    }
}

/// Minutes past 12:00 on a 12-hour clock (12:xx counts as 0:xx).
pub fn minutes_since_twelve(hour: u32, minute: u32) -> u32 {
    (hour % 12) * 60 + minute
}

/// Add `duration` minutes to a 12-hour clock time, wrapping past 12.
pub fn add_minutes(hour: u32, minute: u32, duration: u32) -> (u32, u32) {
    let total = minutes_since_twelve(hour, minute) + duration;
    let end_hour = match (total / 60) % 12 {
        0 => 12,
        h => h,
    };
    (end_hour, total % 60)
}

/// Canonical `H:MM` form.
pub fn format_hhmm(hour: u32, minute: u32) -> String {
    format!("{hour}:{minute:02}")
}

pub fn elapsed_time(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let start_h: u32 = rng.random_range(1..=12);
    let start_m = pick(rng, &START_MINUTES);
    let duration = pick(rng, duration_pool(ctx.difficulty));
    let start_total = minutes_since_twelve(start_h, start_m);
    let (end_h, end_m) = add_minutes(start_h, start_m, duration);
    let answer = format_hhmm(end_h, end_m);

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let h: u32 = r.random_range(1..=10);
            let m: u32 = r.random_range(0..=5) * 10;
            let d: u32 = pick(r, &[20, 30, 40]);
            let start = minutes_since_twelve(h, m);
            let (eh, em) = add_minutes(h, m, d);
            worked(
                format!("Starts {}, lasts {d} min", format_hhmm(h, m)),
                vec![
                    format!("{} = {start} min", format_hhmm(h, m)),
                    format!("{start} + {d} = {}", start + d),
                    format!("{} = {}", start + d, format_hhmm(eh, em)),
                ],
                format_hhmm(eh, em),
            )
        },
        [
            worked(
                "Starts 2:30, lasts 40 min".into(),
                vec!["2:30 = 150 min".into(), "150 + 40 = 190".into(), "190 = 3:10".into()],
                "3:10",
            ),
            worked(
                "Starts 4:50, lasts 20 min".into(),
                vec!["4:50 = 290 min".into(), "290 + 20 = 310".into(), "310 = 5:10".into()],
                "5:10",
            ),
        ],
    );

    Draft {
        id_prefix: "time",
        skill_id: "std5_elapsed_time_harder",
        prompt_text: format!(
            "A class starts at {}. It lasts {duration} minutes. What time does it end? (write as H:MM)",
            format_hhmm(start_h, start_m)
        ),
        correct_answer: AnswerSpec::TimeHhmm {
            value: answer.clone(),
        },
        solution_steps: steps([
            (
                "Add minutes",
                format!("Start minutes: {start_total}. Add {duration}: {}.", start_total + duration),
            ),
            ("Convert back to time", format!("End time = {answer}")),
        ]),
        rule: "Convert to minutes, add, then convert back.",
        example,
        common_mistakes: &[
            "Forgetting to carry 60 minutes to an hour.",
            "Writing minutes without two digits.",
        ],
        estimated_time_sec: pace(180, ctx.marks),
    }
    .finish(ctx)
}

// ---------------------------------------------------------------------------
// Rectangles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Perimeter,
    Area,
}

fn side_range(difficulty: u8) -> (u32, u32) {
    match difficulty {
        1 => (3, 12),
        2 => (5, 25),
        3 => (10, 60),
        _ => (20, 120),
    }
}

fn rectangle_example(measure: Measure, r: &mut dyn RngCore) -> crate::model::WorkedExample {
    let l: u32 = r.random_range(3..=6);
    let w: u32 = r.random_range(2..l);
    match measure {
        Measure::Perimeter => worked(
            format!("Perimeter of a {l} cm by {w} cm rectangle"),
            vec![format!("{l} + {w} = {}", l + w), format!("2 × {} = {}", l + w, 2 * (l + w))],
            2 * (l + w),
        ),
        Measure::Area => worked(
            format!("Area of a {l} cm by {w} cm rectangle"),
            vec![format!("{l} × {w} = {}", l * w)],
            l * w,
        ),
    }
}

fn rectangle(ctx: &GenerationContext, rng: &mut dyn RngCore, measure: Measure) -> Question {
    let (lo, hi) = side_range(ctx.difficulty);
    let length: u32 = rng.random_range(lo..=hi);
    let width: u32 = rng.random_range(2..=length);
    let (unit, square_unit) = if ctx.difficulty >= 3 {
        ("m", "square metres")
    } else {
        ("cm", "square centimetres")
    };

    let (ans, prompt, solution, fixed) = match measure {
        Measure::Perimeter => {
            let ans = 2 * (length + width);
            (
                ans,
                format!(
                    "A rectangle is {length} {unit} long and {width} {unit} wide. What is its perimeter in {unit}?"
                ),
                steps([
                    ("Add length and width", format!("{length} + {width} = {}", length + width)),
                    ("Double it", format!("2 × {} = {ans}", length + width)),
                ]),
                [
                    worked(
                        "Perimeter of a 5 cm by 3 cm rectangle".into(),
                        vec!["5 + 3 = 8".into(), "2 × 8 = 16".into()],
                        16,
                    ),
                    worked(
                        "Perimeter of a 4 cm by 2 cm rectangle".into(),
                        vec!["4 + 2 = 6".into(), "2 × 6 = 12".into()],
                        12,
                    ),
                ],
            )
        }
        Measure::Area => {
            let ans = length * width;
            (
                ans,
                format!(
                    "A rectangle is {length} {unit} long and {width} {unit} wide. What is its area in {square_unit}?"
                ),
                steps([("Multiply length by width", format!("{length} × {width} = {ans}"))]),
                [
                    worked(
                        "Area of a 5 cm by 3 cm rectangle".into(),
                        vec!["5 × 3 = 15".into()],
                        15,
                    ),
                    worked(
                        "Area of a 4 cm by 2 cm rectangle".into(),
                        vec!["4 × 2 = 8".into()],
                        8,
                    ),
                ],
            )
        }
    };
    let answer = ans.to_string();
    let example = distinct_example(rng, &answer, |r| rectangle_example(measure, r), fixed);

    let (skill_id, rule, mistakes): (_, _, &'static [&'static str]) = match measure {
        Measure::Perimeter => (
            "std4_rectangle_perimeter",
            "Perimeter is the distance all the way round: 2 × (length + width).",
            &["Multiplying instead of adding.", "Adding only two of the four sides."],
        ),
        Measure::Area => (
            "std4_rectangle_area",
            "Area is the space inside: length × width, in square units.",
            &["Adding the sides instead of multiplying.", "Using the perimeter formula."],
        ),
    };

    Draft {
        id_prefix: "rect",
        skill_id,
        prompt_text: prompt,
        correct_answer: AnswerSpec::integer(ans.into()),
        solution_steps: solution,
        rule,
        example,
        common_mistakes: mistakes,
        estimated_time_sec: pace(90, ctx.marks),
    }
    .finish(ctx)
}

pub fn rectangle_perimeter(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    rectangle(ctx, rng, Measure::Perimeter)
}

pub fn rectangle_area(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    rectangle(ctx, rng, Measure::Area)
}
