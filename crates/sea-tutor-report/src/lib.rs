//! sea-tutor-report — printable output for composed papers.

pub mod html;

pub use html::{generate_html, write_html_paper, HtmlOptions};
