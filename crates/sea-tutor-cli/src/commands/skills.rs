//! The `sea-tutor skills` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use sea_tutor_core::generators::standard_catalog;

pub fn execute() -> Result<()> {
    let catalog = standard_catalog();

    let mut table = Table::new();
    table.set_header(vec!["Skill", "Strand", "Title"]);
    for skill in catalog.skills() {
        table.add_row(vec![
            Cell::new(skill.id),
            Cell::new(skill.strand),
            Cell::new(skill.title),
        ]);
    }

    println!("{table}");
    println!("{} skills", catalog.len());
    Ok(())
}
