//! The `sea-tutor init` command.

use std::path::Path;

use anyhow::Result;

use sea_tutor_core::config::{sample_config, CONFIG_FILE};
use sea_tutor_core::shape::{paper_shape_to_toml, PaperShape};

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, sample_config())?;
        println!("Created {CONFIG_FILE}");
    }

    std::fs::create_dir_all("papers")?;
    let shape_path = Path::new("papers/sea.toml");
    if shape_path.exists() {
        println!("papers/sea.toml already exists, skipping.");
    } else {
        let body = paper_shape_to_toml(&PaperShape::standard())?;
        std::fs::write(shape_path, format!("{SHAPE_HEADER}{body}"))?;
        println!("Created papers/sea.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust papers/sea.toml (sections, skills, difficulty weights)");
    println!("  2. Run: sea-tutor validate --shape papers/sea.toml");
    println!("  3. Run: sea-tutor paper --html paper.html --answer-key");

    Ok(())
}

const SHAPE_HEADER: &str = "# SEA practice paper layout.
# Each section draws `count` questions worth `marks_each` from its skill pool;
# difficulty levels (1-4) are picked by weight. Run `sea-tutor skills` for ids.

";
