//! HTML worksheet generator.
//!
//! Produces a self-contained, printable HTML file with all CSS inlined.
//! With [`HtmlOptions::answer_key`] set, an answer key with worked steps is
//! appended after the questions on a new printed page.

use anyhow::{Context, Result};
use std::path::Path;

use sea_tutor_core::model::Question;
use sea_tutor_core::paper::Paper;

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlOptions {
    /// Append canonical answers and worked solutions.
    pub answer_key: bool,
}

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Prompts with tables or bar charts keep their line layout.
fn render_prompt(prompt: &str) -> String {
    if prompt.contains('\n') {
        format!("<pre class=\"prompt\">{}</pre>", html_escape(prompt))
    } else {
        format!("<p class=\"prompt\">{}</p>", html_escape(prompt))
    }
}

fn marks_label(marks: u32) -> String {
    if marks == 1 {
        "1 mark".to_string()
    } else {
        format!("{marks} marks")
    }
}

/// Generate an HTML worksheet for a paper.
pub fn generate_html(paper: &Paper, options: HtmlOptions) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(&paper.name)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&paper.name)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} marks | {} minutes | {}</p>\n",
        paper.questions.len(),
        paper.total_marks,
        paper.duration_sec / 60,
        paper.created_at.format("%Y-%m-%d")
    ));
    html.push_str("<p class=\"meta\">Name: ____________________ &nbsp; Date: ____________</p>\n");
    html.push_str("</header>\n");

    // Section overview
    let sections = paper.section_names();
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Section</th><th>Questions</th><th>Marks</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for name in &sections {
        let (count, marks) = paper
            .section(name)
            .fold((0, 0), |(c, m), q| (c + 1, m + q.marks));
        html.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td><td>{marks}</td></tr>\n",
            html_escape(name)
        ));
    }
    html.push_str("</tbody></table>\n");

    // Questions, numbered continuously across sections
    let mut number = 0;
    for name in &sections {
        html.push_str("<section class=\"paper-section\">\n");
        html.push_str(&format!("<h2>Section {}</h2>\n", html_escape(name)));
        for q in paper.section(name) {
            number += 1;
            html.push_str(&render_question(number, q));
        }
        html.push_str("</section>\n");
    }

    if options.answer_key {
        html.push_str(&render_answer_key(paper));
    }

    html.push_str("</body>\n</html>");
    html
}

fn render_question(number: usize, q: &Question) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<div class=\"question\" id=\"{}\">\n",
        html_escape(&q.question_id)
    ));
    out.push_str(&format!(
        "<div class=\"qhead\"><span class=\"num\">{number}.</span><span class=\"marks\">[{}]</span></div>\n",
        marks_label(q.marks)
    ));
    out.push_str(&render_prompt(&q.prompt_text));
    out.push('\n');
    out.push_str("<p class=\"answer-line\">Answer: ______________</p>\n");
    out.push_str("</div>\n");
    out
}

fn render_answer_key(paper: &Paper) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"answer-key\">\n");
    out.push_str("<h2>Answer key</h2>\n");
    out.push_str("<table>\n");
    out.push_str("<thead><tr><th>#</th><th>Section</th><th>Answer</th><th>Working</th></tr></thead>\n");
    out.push_str("<tbody>\n");

    let mut number = 0;
    for name in paper.section_names() {
        for q in paper.section(name) {
            number += 1;
            let mut working = String::from("<ol>");
            for step in &q.solution_steps {
                working.push_str(&format!(
                    "<li><strong>{}:</strong> {}</li>",
                    html_escape(&step.title),
                    html_escape(&step.work)
                ));
            }
            working.push_str("</ol>");
            out.push_str(&format!(
                "<tr><td>{number}</td><td>{}</td><td class=\"answer\">{}</td><td>{working}</td></tr>\n",
                html_escape(&q.section),
                html_escape(&q.correct_answer.to_string())
            ));
        }
    }
    out.push_str("</tbody></table>\n");

    // Raw JSON
    out.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    out.push_str("<pre><code>");
    out.push_str(&html_escape(
        &serde_json::to_string_pretty(paper).unwrap_or_default(),
    ));
    out.push_str("</code></pre>\n");
    out.push_str("</details>\n</section>\n");
    out
}

/// Write an HTML worksheet to a file.
pub fn write_html_paper(paper: &Paper, options: HtmlOptions, path: &Path) -> Result<()> {
    let html = generate_html(paper, options);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write worksheet to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --fg: #1a1a1a; --border: #d1d5db; --muted: #6b7280; --key: #f3f4f6; }
body { font-family: Georgia, 'Times New Roman', serif; margin: 0 auto; padding: 2rem; max-width: 52rem; color: var(--fg); }
h1 { margin-bottom: 0.25rem; }
h2 { margin-top: 2rem; border-bottom: 2px solid var(--fg); padding-bottom: 0.25rem; }
.meta { color: var(--muted); margin: 0.25rem 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.4rem 0.8rem; text-align: left; vertical-align: top; }
th { background: var(--key); }
.question { margin: 1.25rem 0; page-break-inside: avoid; }
.qhead { display: flex; justify-content: space-between; font-weight: bold; }
.marks { color: var(--muted); font-weight: normal; }
.prompt { margin: 0.4rem 0 0.8rem 1.5rem; }
pre.prompt { font-family: 'DejaVu Sans Mono', 'Courier New', monospace; font-size: 0.95rem; white-space: pre; }
.answer-line { margin-left: 1.5rem; color: var(--muted); }
.answer-key { page-break-before: always; }
.answer { font-weight: bold; white-space: nowrap; }
pre { overflow-x: auto; padding: 1rem; background: var(--key); border-radius: 6px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.8rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
@media print { details { display: none; } body { padding: 0; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sea_tutor_core::generators::Catalog;
    use sea_tutor_core::paper::compose_paper;
    use sea_tutor_core::shape::PaperShape;

    fn make_test_paper() -> Paper {
        let mut rng = StdRng::seed_from_u64(5);
        let mut paper = compose_paper(&PaperShape::standard(), &Catalog::standard(), &mut rng);
        paper.created_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        paper
    }

    #[test]
    fn html_paper_contains_required_elements() {
        let paper = make_test_paper();
        let html = generate_html(&paper, HtmlOptions::default());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("SEA simulator"));
        assert!(html.contains("<h2>Section I</h2>"));
        assert!(html.contains("<h2>Section III</h2>"));
        assert!(html.contains("[4 marks]"));
        assert!(html.contains("35 questions | 60 marks | 75 minutes | 2026-03-14"));
        assert_eq!(html.matches("class=\"question\"").count(), 35);
        assert!(!html.contains("Answer key"));
    }

    #[test]
    fn answer_key_lists_every_answer() {
        let paper = make_test_paper();
        let html = generate_html(&paper, HtmlOptions { answer_key: true });

        assert!(html.contains("Answer key"));
        assert_eq!(html.matches("class=\"answer\"").count(), 35);
        let last = paper.questions.last().unwrap();
        assert!(html.contains(&html_escape(&last.solution_steps[0].work)));
    }

    #[test]
    fn prompts_are_escaped() {
        assert_eq!(html_escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#x27;");
        assert_eq!(render_prompt("a < b"), "<p class=\"prompt\">a &lt; b</p>");
        assert!(render_prompt("row\nrow").starts_with("<pre"));
    }

    #[test]
    fn html_paper_write_to_file() {
        let paper = make_test_paper();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("paper.html");

        write_html_paper(&paper, HtmlOptions::default(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
