//! Geometry generators.

use rand::{Rng, RngCore};

use super::{distinct_example, pace, retry, steps, worked, Draft, MAX_ATTEMPTS};
use crate::model::{AnswerSpec, GenerationContext, Question};

/// Smallest third angle a generated triangle may have.
const MIN_THIRD_ANGLE: u32 = 20;

/// Two known angles and the missing one. Always sums to 180.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Triangle {
    a: u32,
    b: u32,
    c: u32,
}

fn draw_triangle(difficulty: u8, rng: &mut dyn RngCore) -> Option<Triangle> {
    // Lower difficulties stay on multiples of 5 so mental arithmetic is easy.
    let (lo, hi, step) = if difficulty <= 2 { (30, 90, 5) } else { (20, 130, 1) };
    let a: u32 = rng.random_range(lo / step..=hi / step) * step;
    // Clamp the second angle so the third is never below the minimum.
    let ceiling = 180u32.checked_sub(MIN_THIRD_ANGLE + a)? / step * step;
    let b = (rng.random_range(lo / step..=hi / step) * step).min(ceiling);
    if b < lo {
        return None;
    }
    Some(Triangle { a, b, c: 180 - a - b })
}

pub fn triangle_third_angle(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let Triangle { a, b, c } = retry(
        MAX_ATTEMPTS,
        || draw_triangle(ctx.difficulty, &mut *rng),
        || Triangle { a: 60, b: 70, c: 50 },
    );
    let answer = c.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let a: u32 = r.random_range(4..=9) * 10;
            let b: u32 = r.random_range(3..=6) * 10;
            let c = 180 - a - b;
            worked(
                format!("Angles {a}° and {b}°. Third angle?"),
                vec![format!("{a} + {b} = {}", a + b), format!("180 - {} = {c}", a + b)],
                c,
            )
        },
        [
            worked(
                "Angles 50° and 60°. Third angle?".into(),
                vec!["50 + 60 = 110".into(), "180 - 110 = 70".into()],
                70,
            ),
            worked(
                "Angles 90° and 45°. Third angle?".into(),
                vec!["90 + 45 = 135".into(), "180 - 135 = 45".into()],
                45,
            ),
        ],
    );

    Draft {
        id_prefix: "tri",
        skill_id: "std5_triangle_third_angle",
        prompt_text: format!(
            "Two angles of a triangle are {a}° and {b}°. What is the size of the third angle in degrees?"
        ),
        correct_answer: AnswerSpec::integer(c.into()),
        solution_steps: steps([
            ("Add the known angles", format!("{a} + {b} = {}", a + b)),
            ("Subtract from 180", format!("180 - {} = {c}", a + b)),
        ]),
        rule: "The angles in a triangle add up to 180°.",
        example,
        common_mistakes: &[
            "Subtracting from 360 instead of 180.",
            "Subtracting only one of the known angles.",
        ],
        estimated_time_sec: pace(75, ctx.marks),
    }
    .finish(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn angles(prompt: &str) -> (u32, u32) {
        let rest = prompt.strip_prefix("Two angles of a triangle are ").unwrap();
        let (a, rest) = rest.split_once("° and ").unwrap();
        let (b, _) = rest.split_once('°').unwrap();
        (a.parse().unwrap(), b.parse().unwrap())
    }

    #[test]
    fn third_angle_completes_the_triangle() {
        let mut rng = StdRng::seed_from_u64(40);
        for difficulty in 1..=4 {
            let ctx = GenerationContext::new("II", 2, difficulty);
            for _ in 0..500 {
                let q = triangle_third_angle(&ctx, &mut rng);
                let (a, b) = angles(&q.prompt_text);
                let c = 180 - a - b;
                assert!(c >= MIN_THIRD_ANGLE, "{}", q.prompt_text);
                assert_eq!(q.correct_answer, AnswerSpec::integer(c.into()));
                assert!(a >= 20 && b >= 20);
                if difficulty <= 2 {
                    assert_eq!(a % 5, 0);
                    assert_eq!(b % 5, 0);
                }
                assert_ne!(q.example_help.examples[0].answer, c.to_string());
            }
        }
    }

    #[test]
    fn second_angle_is_clamped() {
        let mut rng = StdRng::seed_from_u64(41);
        for _ in 0..1000 {
            if let Some(t) = draw_triangle(3, &mut rng) {
                assert_eq!(t.a + t.b + t.c, 180);
                assert!(t.c >= MIN_THIRD_ANGLE);
            }
        }
    }
}
