//! # board-parser
//!
//! Best-effort extraction of structure from generated answers.
//!
//! Answers are natural language with loosely applied markdown. Nothing here
//! fails: malformed input degrades to "everything is summary" rather than an
//! error.
//!
//! - [`sections`]: summary / action items / references, plus heading-based
//!   section splitting
//! - [`citations`]: `[n]` marker rewriting, reference-map extraction and
//!   citation-set extraction
//! - [`prose`]: paragraph splitting and short previews
//!
//! Parsing is a line scanner ([`lines`]) rather than chained regular
//! expressions: each line is classified once, then sections are assembled
//! from the classified lines.

pub mod citations;
pub mod lines;
pub mod prose;
pub mod sections;

pub use citations::{cited_numbers, extract_reference_links, linkify};
pub use sections::parse_insight;

/// Normalize `\r\n` and lone `\r` line endings to `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
