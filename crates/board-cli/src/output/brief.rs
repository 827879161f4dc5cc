//! Presentation of long-form briefs.

use board_core::entities::References;
use board_memory::StoreSnapshot;
use board_parser::citations::{
    anchor_citations, extract_reference_links, extract_references, format_sources_markdown,
    linkify, references_for,
};
use board_parser::prose::{
    break_dense_paragraph, linkify_urls, short_plain_summary, split_paragraphs, truncate_url,
};
use board_parser::sections::{split_sections, strip_leading_executive_heading};
use serde::Serialize;

/// A long-form brief split into sections with per-section citations.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BriefView {
    pub preview: String,
    pub sections: Vec<BriefSection>,
    pub references: References,
    /// `N. [label](url)` lines for every reference with a URL.
    pub sources: String,
    /// The whole document with `[n](#refn)` markers and `refN` anchors.
    pub anchored: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BriefSection {
    pub title: String,
    pub content: String,
    pub paragraphs: Vec<String>,
    pub cited: References,
}

/// A generated brief together with what was saved from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefReport {
    pub brief: BriefView,
    /// Ids of the board-pack records saved from the brief.
    pub saved: Vec<i64>,
    pub snapshot: StoreSnapshot,
}

/// Split a long-form brief into linked sections, sources and anchors.
#[must_use]
pub fn brief_view(text: &str) -> BriefView {
    let references = extract_references(text);
    let sources_block = sources_block(&references);
    let links = extract_reference_links(&sources_block);

    let mut preview = String::new();
    let mut sections = Vec::new();
    for section in split_sections(text) {
        let body = strip_leading_executive_heading(&section.content);
        if sections.is_empty() {
            preview = short_plain_summary(&body);
        }
        let content = linkify_urls(&break_dense_paragraph(&linkify(&body, &links)));
        sections.push(BriefSection {
            cited: references_for(&body, &references),
            paragraphs: split_paragraphs(&content),
            content,
            title: section.title,
        });
    }

    BriefView {
        preview,
        sections,
        sources: format_sources_markdown(&sources_block, &links),
        anchored: anchor_citations(text),
        references,
    }
}

/// A `### Sources` block rebuilt from `references`. Bare URLs get a short
/// host-and-path label.
fn sources_block(references: &References) -> String {
    let lines = references.iter().map(|(number, source)| {
        if source.starts_with("http://") || source.starts_with("https://") {
            format!("{number}. [{}]({source})", truncate_url(source))
        } else {
            format!("{number}. {source}")
        }
    });
    std::iter::once("### Sources".to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}
