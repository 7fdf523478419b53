//! The `sea-tutor validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sea_tutor_core::generators::standard_catalog;
use sea_tutor_core::shape::{parse_paper_shape, validate_paper_shape};

pub fn execute(shape_path: PathBuf) -> Result<()> {
    let shape = parse_paper_shape(&shape_path)?;
    println!(
        "Paper shape: {} ({} sections, {} questions, {} marks)",
        shape.name,
        shape.sections.len(),
        shape.question_count(),
        shape.total_marks()
    );

    let warnings = validate_paper_shape(&shape, standard_catalog());
    for w in &warnings {
        let prefix = w
            .section
            .as_ref()
            .map(|s| format!("  [{s}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Paper shape valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
