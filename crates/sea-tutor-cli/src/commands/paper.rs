//! The `sea-tutor paper` command.

use std::path::PathBuf;

use anyhow::Result;

use sea_tutor_core::config::load_config_from;
use sea_tutor_core::generators::standard_catalog;
use sea_tutor_core::paper::compose_paper;
use sea_tutor_core::shape::{parse_paper_shape, validate_paper_shape, PaperShape};
use sea_tutor_report::{write_html_paper, HtmlOptions};

pub fn execute(
    shape_path: Option<PathBuf>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    html: Option<PathBuf>,
    answer_key: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let shape = match shape_path.or(config.paper_shape) {
        Some(path) => parse_paper_shape(&path)?,
        None => PaperShape::standard(),
    };
    let catalog = standard_catalog();
    for w in validate_paper_shape(&shape, catalog) {
        let section = w.section.map(|s| format!(" [{s}]")).unwrap_or_default();
        eprintln!("WARNING{section}: {}", w.message);
    }

    let mut rng = super::make_rng(seed.or(config.seed));
    let paper = compose_paper(&shape, catalog, &mut rng);

    let json_path =
        output.unwrap_or_else(|| config.output_dir.join(format!("{}.json", paper.paper_id)));
    paper.save_json(&json_path)?;

    println!(
        "Paper: {} ({} questions, {} marks, {} minutes)",
        paper.name,
        paper.questions.len(),
        paper.total_marks,
        paper.duration_sec / 60
    );
    for name in paper.section_names() {
        let questions: Vec<_> = paper.section(name).collect();
        let marks: u32 = questions.iter().map(|q| q.marks).sum();
        println!("  Section {name}: {} questions, {marks} marks", questions.len());
    }
    println!("JSON written to: {}", json_path.display());

    if let Some(html_path) = html {
        write_html_paper(&paper, HtmlOptions { answer_key }, &html_path)?;
        println!("HTML written to: {}", html_path.display());
    }

    Ok(())
}
