//! Data-handling generators: read a value from a table or a text bar chart.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use super::{distinct_example, pace, pick, steps, worked, Draft};
use crate::model::{AnswerSpec, GenerationContext, Question, WorkedExample};

/// Rows in every generated table or chart.
const ROWS: usize = 4;

/// Block used to draw bars.
pub const BAR_BLOCK: char = '■';

struct Topic {
    /// Sentence describing what was counted.
    caption: &'static str,
    /// Header for the label column.
    label_header: &'static str,
    /// Header for the value column.
    value_header: &'static str,
    labels: &'static [&'static str],
}

static TOPICS: [Topic; 4] = [
    Topic {
        caption: "The table shows the number of books read by pupils in one term.",
        label_header: "Pupil",
        value_header: "Books",
        labels: &["Amir", "Bree", "Chen", "Dana", "Eli", "Faye"],
    },
    Topic {
        caption: "The table shows the favourite fruit of pupils in a class.",
        label_header: "Fruit",
        value_header: "Pupils",
        labels: &["Mango", "Banana", "Orange", "Pawpaw", "Guava", "Apple"],
    },
    Topic {
        caption: "The table shows the number of cars that passed a school each day.",
        label_header: "Day",
        value_header: "Cars",
        labels: &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
    },
    Topic {
        caption: "The table shows the number of goals scored by each house.",
        label_header: "House",
        value_header: "Goals",
        labels: &["Red", "Blue", "Green", "Yellow", "Purple"],
    },
];

fn value_ceiling(difficulty: u8) -> u32 {
    match difficulty {
        1 => 10,
        2 => 20,
        3 => 50,
        _ => 99,
    }
}

/// Draw a topic and `ROWS` distinct labels with values.
fn draw_rows(
    rng: &mut dyn RngCore,
    max_value: u32,
) -> (&'static Topic, Vec<(&'static str, u32)>) {
    let topic = TOPICS.choose(&mut *rng).unwrap_or(&TOPICS[0]);
    let labels: Vec<&'static str> = topic.labels.choose_multiple(&mut *rng, ROWS).copied().collect();
    let rows = labels
        .into_iter()
        .map(|label| (label, rng.random_range(1..=max_value)))
        .collect();
    (topic, rows)
}

fn render_table(topic: &Topic, rows: &[(&str, u32)]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.len())
        .chain([topic.label_header.len()])
        .max()
        .unwrap_or(0);
    let mut out = format!("{:<width$} | {}\n", topic.label_header, topic.value_header);
    for (label, value) in rows {
        out.push_str(&format!("{label:<width$} | {value}\n"));
    }
    out
}

const READ_MISTAKES: &[&str] = &[
    "Reading the value from the wrong row.",
    "Reading the label instead of the value.",
];

fn lookup_example(r: &mut dyn RngCore) -> WorkedExample {
    let value: u32 = r.random_range(2..=9);
    let label = pick(r, &["Sam", "Tia", "Uma"]);
    worked(
        format!("Table: {label} | {value}. How many for {label}?"),
        vec![
            format!("Find the row for {label}."),
            format!("Read across: {value}."),
        ],
        value,
    )
}

fn lookup_fixed() -> [WorkedExample; 2] {
    [
        worked(
            "Table: Sam | 7. How many for Sam?".into(),
            vec!["Find the row for Sam.".into(), "Read across: 7.".into()],
            7,
        ),
        worked(
            "Table: Tia | 4. How many for Tia?".into(),
            vec!["Find the row for Tia.".into(), "Read across: 4.".into()],
            4,
        ),
    ]
}

pub fn table_read(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let (topic, rows) = draw_rows(rng, value_ceiling(ctx.difficulty));
    let (label, value) = pick_row(rng, &rows);
    let answer = value.to_string();

    Draft {
        id_prefix: "table",
        skill_id: "std4_table_read",
        prompt_text: format!(
            "{}\n\n{}\nWhat is the value for {label}?",
            topic.caption,
            render_table(topic, &rows)
        ),
        correct_answer: AnswerSpec::integer(value.into()),
        solution_steps: steps([
            ("Find the row", format!("Look down the {} column for {label}.", topic.label_header)),
            ("Read across", format!("The {} column shows {value}.", topic.value_header)),
        ]),
        rule: "Find the row for the label, then read across to the value.",
        example: distinct_example(rng, &answer, lookup_example, lookup_fixed()),
        common_mistakes: READ_MISTAKES,
        estimated_time_sec: pace(45, ctx.marks),
    }
    .finish(ctx)
}

fn pick_row(rng: &mut dyn RngCore, rows: &[(&'static str, u32)]) -> (&'static str, u32) {
    rows.choose(rng).copied().unwrap_or(("", 0))
}

fn bar(units: u32, scale: u32) -> String {
    BAR_BLOCK.to_string().repeat((units / scale) as usize)
}

/// Text bar chart: one row per label, each block worth `scale` units.
pub fn render_bar_chart(rows: &[(&str, u32)], scale: u32) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<width$} | {}\n", bar(*value, scale)));
    }
    out.push_str(&format!("Key: each {BAR_BLOCK} stands for {scale}"));
    if scale != 1 {
        out.push_str(" units");
    } else {
        out.push_str(" unit");
    }
    out
}

pub fn bar_chart_read(ctx: &GenerationContext, rng: &mut dyn RngCore) -> Question {
    let scale: u32 = if ctx.difficulty >= 2 && rng.random_bool(0.5) {
        2
    } else {
        1
    };
    let max_blocks = match ctx.difficulty {
        1 => 8,
        2 => 10,
        _ => 12,
    };
    let (topic, rows) = draw_rows(rng, max_blocks);
    let rows: Vec<(&'static str, u32)> = rows.into_iter().map(|(l, blocks)| (l, blocks * scale)).collect();
    let (label, value) = pick_row(rng, &rows);
    let blocks = value / scale;
    let answer = value.to_string();

    let example = distinct_example(
        rng,
        &answer,
        |r| {
            let n: u32 = r.random_range(2..=6);
            let s: u32 = r.random_range(1..=2);
            worked(
                format!("Bar: {}; each {BAR_BLOCK} = {s}", bar(n * s, s)),
                vec![format!("Count the blocks: {n}."), format!("{n} × {s} = {}", n * s)],
                n * s,
            )
        },
        [
            worked(
                format!("Bar: {}; each {BAR_BLOCK} = 2", bar(6, 2)),
                vec!["Count the blocks: 3.".into(), "3 × 2 = 6".into()],
                6,
            ),
            worked(
                format!("Bar: {}; each {BAR_BLOCK} = 1", bar(5, 1)),
                vec!["Count the blocks: 5.".into(), "5 × 1 = 5".into()],
                5,
            ),
        ],
    );

    Draft {
        id_prefix: "bar",
        skill_id: "std4_bar_chart_read",
        prompt_text: format!(
            "{}\n\n{}\n\nHow many for {label}?",
            topic.caption.replace("The table", "The bar chart"),
            render_bar_chart(&rows, scale)
        ),
        correct_answer: AnswerSpec::integer(value.into()),
        solution_steps: steps([
            ("Count the blocks", format!("The bar for {label} has {blocks} blocks.")),
            ("Use the key", format!("{blocks} × {scale} = {value}")),
        ]),
        rule: "Count the blocks in the bar, then multiply by the value of one block from the key.",
        example,
        common_mistakes: &[
            "Counting blocks but ignoring the key.",
            "Reading the bar next to the one asked for.",
        ],
        estimated_time_sec: pace(60, ctx.marks),
    }
    .finish(ctx)
}
