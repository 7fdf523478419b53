//! Paper-shape TOML parser.
//!
//! A paper shape says how many questions each section has, what they are
//! worth, which skills they draw from and how difficulty is weighted.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generators::Catalog;
use crate::model::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Layout of a whole paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperShape {
    pub name: String,
    #[serde(default = "default_duration")]
    pub duration_sec: u32,
    #[serde(default)]
    pub sections: Vec<SectionShape>,
}

/// One section of a paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionShape {
    pub name: String,
    pub count: u32,
    #[serde(default = "default_marks")]
    pub marks_each: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub difficulty: Vec<DifficultyWeight>,
}

/// Relative weight of one difficulty level within a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyWeight {
    pub level: u8,
    pub weight: f64,
}

/// Most questions a single section may hold.
pub const MAX_SECTION_COUNT: u32 = 200;

/// Most marks a single question may be worth.
pub const MAX_MARKS_EACH: u32 = 20;

impl SectionShape {
    /// Questions the composer will actually draw, capped at [`MAX_SECTION_COUNT`].
    pub fn effective_count(&self) -> u32 {
        self.count.min(MAX_SECTION_COUNT)
    }

    /// Marks each question will carry, clamped into `1..=MAX_MARKS_EACH`.
    pub fn effective_marks(&self) -> u32 {
        self.marks_each.clamp(1, MAX_MARKS_EACH)
    }
}

fn default_duration() -> u32 {
    4500
}

fn default_marks() -> u32 {
    1
}

fn skills(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn weights(pairs: &[(u8, f64)]) -> Vec<DifficultyWeight> {
    pairs
        .iter()
        .map(|&(level, weight)| DifficultyWeight { level, weight })
        .collect()
}

impl PaperShape {
    /// The SEA simulator layout: 20 one-mark, 10 two-mark and 5 four-mark
    /// questions in 75 minutes.
    pub fn standard() -> Self {
        Self {
            name: "SEA simulator".into(),
            duration_sec: default_duration(),
            sections: vec![
                SectionShape {
                    name: "I".into(),
                    count: 20,
                    marks_each: 1,
                    skills: skills(&[
                        "core_add_sub",
                        "core_multiply_2d_1d",
                        "core_exact_division",
                        "std4_simplify_fractions",
                        "std4_fraction_of_quantity",
                        "std4_rectangle_perimeter",
                        "std4_table_read",
                    ]),
                    difficulty: weights(&[(1, 0.6), (2, 0.4)]),
                },
                SectionShape {
                    name: "II".into(),
                    count: 10,
                    marks_each: 2,
                    skills: skills(&[
                        "core_multiply_2d_1d",
                        "std5_add_sub_unlike_denoms",
                        "std5_percent_of_quantity",
                        "std4_rectangle_area",
                        "std5_triangle_third_angle",
                        "std5_elapsed_time_harder",
                        "std4_bar_chart_read",
                    ]),
                    difficulty: weights(&[(1, 0.25), (2, 0.55), (3, 0.2)]),
                },
                SectionShape {
                    name: "III".into(),
                    count: 5,
                    marks_each: 4,
                    skills: skills(&[
                        "std5_add_sub_unlike_denoms",
                        "std4_fraction_of_quantity",
                        "std5_percent_of_quantity",
                        "std4_rectangle_area",
                        "std5_triangle_third_angle",
                        "std5_elapsed_time_harder",
                    ]),
                    difficulty: weights(&[(2, 0.4), (3, 0.6)]),
                },
            ],
        }
    }

    /// Marks of the paper the composer would build from this shape.
    pub fn total_marks(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.effective_count()) * u64::from(s.effective_marks()))
            .sum()
    }

    pub fn question_count(&self) -> u64 {
        self.sections.iter().map(|s| u64::from(s.effective_count())).sum()
    }
}

/// Parse a paper shape from a TOML file.
pub fn parse_paper_shape(path: &Path) -> Result<PaperShape> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read paper shape: {}", path.display()))?;

    parse_paper_shape_str(&content, path)
}

/// Parse a paper shape from a TOML string (useful for testing).
pub fn parse_paper_shape_str(content: &str, source_path: &Path) -> Result<PaperShape> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Serialize a shape back to TOML.
pub fn paper_shape_to_toml(shape: &PaperShape) -> Result<String> {
    toml::to_string_pretty(shape).context("failed to serialize paper shape")
}

/// A warning from paper-shape validation.
#[derive(Debug, Clone)]
pub struct ShapeWarning {
    /// The section name (if applicable).
    pub section: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ShapeWarning {
    fn section(name: &str, message: String) -> Self {
        Self {
            section: Some(name.to_string()),
            message,
        }
    }
}

/// Check a shape for problems the composer would silently paper over.
pub fn validate_paper_shape(shape: &PaperShape, catalog: &Catalog) -> Vec<ShapeWarning> {
    let mut warnings = Vec::new();

    if shape.sections.is_empty() {
        warnings.push(ShapeWarning {
            section: None,
            message: "paper has no sections".into(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for section in &shape.sections {
        let name = section.name.as_str();
        if !seen.insert(name) {
            warnings.push(ShapeWarning::section(name, format!("duplicate section name: {name}")));
        }
        if section.count == 0 {
            warnings.push(ShapeWarning::section(name, "count is 0".into()));
        }
        if section.count > MAX_SECTION_COUNT {
            warnings.push(ShapeWarning::section(
                name,
                format!("count {} is above {MAX_SECTION_COUNT} and will be capped", section.count),
            ));
        }
        if section.marks_each == 0 {
            warnings.push(ShapeWarning::section(
                name,
                "marks_each is 0, each question will be worth 1 mark".into(),
            ));
        }
        if section.marks_each > MAX_MARKS_EACH {
            warnings.push(ShapeWarning::section(
                name,
                format!(
                    "marks_each {} is above {MAX_MARKS_EACH} and will be capped",
                    section.marks_each
                ),
            ));
        }
        if section.skills.is_empty() {
            warnings.push(ShapeWarning::section(
                name,
                "skill pool is empty, core_add_sub will be used".into(),
            ));
        }
        for skill in &section.skills {
            if !catalog.contains(skill) {
                warnings.push(ShapeWarning::section(
                    name,
                    format!("unknown skill '{skill}' will fall back to addition"),
                ));
            }
        }
        for w in &section.difficulty {
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&w.level) {
                warnings.push(ShapeWarning::section(
                    name,
                    format!(
                        "difficulty level {} is outside {MIN_DIFFICULTY}-{MAX_DIFFICULTY} and will be clamped",
                        w.level
                    ),
                ));
            }
            if !(w.weight.is_finite() && w.weight > 0.0) {
                warnings.push(ShapeWarning::section(
                    name,
                    format!("difficulty level {} has non-positive weight {}", w.level, w.weight),
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
name = "Mini paper"
duration_sec = 1200

[[sections]]
name = "I"
count = 4
marks_each = 1
skills = ["core_add_sub", "std4_table_read"]

[[sections.difficulty]]
level = 1
weight = 0.7

[[sections.difficulty]]
level = 2
weight = 0.3

[[sections]]
name = "II"
count = 2
marks_each = 3
skills = ["std5_triangle_third_angle"]
"#;

    #[test]
    fn parse_valid_toml() {
        let shape = parse_paper_shape_str(VALID_TOML, &PathBuf::from("mini.toml")).unwrap();
        assert_eq!(shape.name, "Mini paper");
        assert_eq!(shape.duration_sec, 1200);
        assert_eq!(shape.sections.len(), 2);
        assert_eq!(shape.sections[0].difficulty.len(), 2);
        assert!(shape.sections[1].difficulty.is_empty());
        assert_eq!(shape.total_marks(), 4 + 6);
        assert_eq!(shape.question_count(), 6);
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
name = "Minimal"

[[sections]]
name = "A"
count = 3
"#;
        let shape = parse_paper_shape_str(toml, &PathBuf::from("min.toml")).unwrap();
        assert_eq!(shape.duration_sec, 4500);
        assert_eq!(shape.sections[0].marks_each, 1);
        assert!(shape.sections[0].skills.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_paper_shape_str("name = [broken", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn standard_shape_is_clean() {
        let shape = PaperShape::standard();
        assert_eq!(shape.question_count(), 35);
        assert_eq!(shape.total_marks(), 20 + 20 + 20);
        assert!(validate_paper_shape(&shape, &Catalog::standard()).is_empty());
    }

    #[test]
    fn standard_shape_survives_toml() {
        let shape = PaperShape::standard();
        let text = paper_shape_to_toml(&shape).unwrap();
        let back = parse_paper_shape_str(&text, &PathBuf::from("sea.toml")).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn validate_reports_each_problem() {
        let toml = r#"
name = "Broken"

[[sections]]
name = "I"
count = 0
marks_each = 0
skills = ["std9_calculus"]

[[sections.difficulty]]
level = 7
weight = 0.0

[[sections]]
name = "I"
count = 2
"#;
        let shape = parse_paper_shape_str(toml, &PathBuf::from("broken.toml")).unwrap();
        let warnings = validate_paper_shape(&shape, &Catalog::standard());
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("count is 0"));
        assert!(has("marks_each is 0"));
        assert!(has("unknown skill 'std9_calculus'"));
        assert!(has("outside 1-4"));
        assert!(has("non-positive weight"));
        assert!(has("duplicate section name"));
        assert!(has("skill pool is empty"));
    }

    #[test]
    fn oversized_sections_are_capped() {
        let toml = r#"
name = "Huge"

[[sections]]
name = "A"
count = 3000000000
marks_each = 2

[[sections]]
name = "B"
count = 2
marks_each = 4294967295
"#;
        let shape = parse_paper_shape_str(toml, &PathBuf::from("huge.toml")).unwrap();
        assert_eq!(shape.question_count(), u64::from(MAX_SECTION_COUNT) + 2);
        assert_eq!(
            shape.total_marks(),
            u64::from(MAX_SECTION_COUNT) * 2 + 2 * u64::from(MAX_MARKS_EACH)
        );

        let warnings = validate_paper_shape(&shape, &Catalog::standard());
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("count 3000000000 is above 200"));
        assert!(has("marks_each 4294967295 is above 20"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        let shape = parse_paper_shape(&path).unwrap();
        assert_eq!(shape.sections[1].name, "II");

        let missing = parse_paper_shape(&dir.path().join("nope.toml"));
        assert!(missing.is_err());
    }
}
