//! Summary / action items / references extraction and heading-based sections.

use board_core::entities::{ParsedInsight, number_references};
use serde::Serialize;

use crate::citations::anchor_summary_citations;
use crate::lines::{
    Line, LineKind, SectionLabel, heading, join, label_of, scan, strip_bullet, strip_ordinal,
    strip_reference_marker,
};
use crate::normalize_newlines;

/// Title used by [`split_sections`] when the text has no headings.
pub const FULL_BRIEF_TITLE: &str = "Full Brief";

/// Split a generated answer into summary, action items and references.
///
/// Never fails. When no section headings are found the whole text is the
/// summary. Every `[n]` marker in the summary is rewritten into a superscript
/// anchor pointing at `#ref-n`, whether or not reference `n` exists.
#[must_use]
pub fn parse_insight(markdown: &str) -> ParsedInsight {
    if markdown.is_empty() {
        return ParsedInsight::default();
    }
    let text = normalize_newlines(markdown);
    let lines = scan(&text);

    let action_at = find_section(&lines, SectionLabel::ActionItems);
    let references_at = find_section(&lines, SectionLabel::References);

    let mut summary = match action_at.into_iter().chain(references_at).min() {
        Some(cut) => join(&lines[..cut]).trim().to_string(),
        None => text.clone(),
    };
    if let Some(executive) = executive_summary(&lines) {
        summary = executive;
    }

    let action_items = action_at
        .map(|at| action_items(&lines[at + 1..]))
        .unwrap_or_default();
    let references = references_at
        .map(|at| references(&lines[at + 1..]))
        .unwrap_or_default();

    tracing::trace!(
        action_items = action_items.len(),
        references = references.len(),
        "parsed insight"
    );

    ParsedInsight {
        summary: anchor_summary_citations(&summary),
        action_items,
        references: number_references(references),
    }
}

/// First line opening `label`, provided a newline follows it.
fn find_section(lines: &[Line<'_>], label: SectionLabel) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.terminated && line.label() == Some(label))
}

/// Heading that overrides the summary. Matched literally, unlike the other
/// section labels.
const EXECUTIVE_SUMMARY_HEADING: &str = "### Executive Summary";

/// Body of a `### Executive Summary` block, when present and non-empty.
fn executive_summary(lines: &[Line<'_>]) -> Option<String> {
    let start = lines
        .iter()
        .position(|line| line.terminated && line.raw.trim() == EXECUTIVE_SUMMARY_HEADING)?;
    let body = &lines[start + 1..];
    let end = body
        .iter()
        .position(|line| {
            matches!(line.kind, LineKind::Heading { level: 2 | 3, .. })
                || matches!(
                    line.label(),
                    Some(SectionLabel::ActionItems | SectionLabel::References)
                )
        })
        .unwrap_or(body.len());
    let raw = join(&body[..end]);
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn action_items(after: &[Line<'_>]) -> Vec<String> {
    after
        .iter()
        .take_while(|line| !line.is_heading() && line.label() != Some(SectionLabel::References))
        .filter(|line| !line.is_skippable() && line.label() != Some(SectionLabel::ActionItems))
        .map(|line| strip_ordinal(strip_bullet(line.raw.trim())).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn references(after: &[Line<'_>]) -> Vec<String> {
    after
        .iter()
        .filter(|line| {
            !matches!(line.kind, LineKind::Blank) && line.label() != Some(SectionLabel::References)
        })
        .map(|line| strip_reference_marker(line.raw.trim()).to_string())
        .filter(|source| !source.is_empty())
        .collect()
}

/// One `##`/`###` section of a long-form brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Split a brief into `##`/`###` sections.
///
/// Sections whose title starts with "references" are dropped. Text before
/// the first heading is discarded. Without any headings the whole (trimmed)
/// text comes back as a single section titled [`FULL_BRIEF_TITLE`].
#[must_use]
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let text = normalize_newlines(markdown);
    let lines = scan(&text);

    let starts: Vec<(usize, &str)> = lines
        .iter()
        .filter_map(|line| match line.kind {
            LineKind::Heading {
                level: 2 | 3,
                title,
            } => Some((line.index, title)),
            _ => None,
        })
        .collect();

    if starts.is_empty() {
        return vec![Section {
            title: FULL_BRIEF_TITLE.to_string(),
            content: text.trim().to_string(),
        }];
    }

    starts
        .iter()
        .enumerate()
        .filter(|(_, (_, title))| !title.to_ascii_lowercase().starts_with("references"))
        .map(|(position, (index, title))| {
            let end = starts
                .get(position + 1)
                .map_or(lines.len(), |(next, _)| *next);
            Section {
                title: (*title).to_string(),
                content: join(&lines[index + 1..end]).trim().to_string(),
            }
        })
        .collect()
}

/// Drop a leading `## Executive Summary` / `### Executive Summary` heading
/// line, leaving the body.
#[must_use]
pub fn strip_leading_executive_heading(text: &str) -> String {
    let normalized = normalize_newlines(text);
    let trimmed = normalized.trim_start();
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let is_executive = matches!(
        heading(first.trim()),
        Some((2 | 3, title)) if label_of(title) == Some(SectionLabel::ExecutiveSummary)
    );
    if is_executive {
        rest.trim_start().to_string()
    } else {
        trimmed.to_string()
    }
}
