//! `[n]` citation markers: rewriting, reference maps and citation sets.
//!
//! A marker is `[` + ASCII digits + `]`. Markers directly followed by `(`
//! are already markdown links; the link-producing rewrites leave them alone.

use std::collections::{BTreeMap, BTreeSet};

use board_core::entities::References;

use crate::lines::{LineKind, heading, numbered, scan};
use crate::normalize_newlines;

/// Ranges wider than this are treated as malformed rather than expanded.
const MAX_RANGE_SPAN: u32 = 1000;

/// Rewrite every `[n]` marker in `text`.
///
/// `rewrite` receives the marker's digits exactly as written (leading zeros
/// and all) and whether the marker is directly followed by `(`; returning
/// `None` keeps the marker as written.
pub fn rewrite_markers<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str, bool) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];
        let digits = candidate[1..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let close = 1 + digits;
        if digits == 0 || candidate.as_bytes().get(close) != Some(&b']') {
            out.push('[');
            rest = &candidate[1..];
            continue;
        }
        let marker = &candidate[..=close];
        let after = &candidate[close + 1..];
        let replacement = rewrite(&candidate[1..close], after.starts_with('('));
        out.push_str(replacement.as_deref().unwrap_or(marker));
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Superscript anchor used for citations inside a parsed summary.
#[must_use]
pub fn summary_anchor(number: &str) -> String {
    format!(
        "<sup><a href='#ref-{number}' class='text-primary underline' \
         aria-label='Reference {number}'>[{number}]</a></sup>"
    )
}

/// Replace every `[n]` in a summary with a [`summary_anchor`].
#[must_use]
pub fn anchor_summary_citations(summary: &str) -> String {
    rewrite_markers(summary, |number, _| Some(summary_anchor(number)))
}

/// Reference digits targeted by summary anchors, in order of appearance.
#[must_use]
pub fn anchor_targets(html: &str) -> Vec<&str> {
    const NEEDLE: &str = "href='#ref-";
    html.match_indices(NEEDLE)
        .filter_map(|(at, _)| {
            let tail = &html[at + NEEDLE.len()..];
            let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
            (digits > 0 && tail.as_bytes().get(digits) == Some(&b'\''))
                .then_some(&tail[..digits])
        })
        .collect()
}

/// Turn `[n]` into `[n](url)` for every `n` present in `ref_map`.
///
/// Markers without a known URL, and markers that are already links, are left
/// unchanged. The marker text itself is never renumbered.
#[must_use]
pub fn linkify(markdown: &str, ref_map: &BTreeMap<u32, String>) -> String {
    rewrite_markers(markdown, |digits, is_link| {
        if is_link {
            return None;
        }
        let number = digits.parse::<u32>().ok()?;
        ref_map
            .get(&number)
            .map(|url| format!("[{digits}]({url})"))
    })
}

/// Collect `number -> url` from a numbered sources block.
///
/// Lines must read `N. rest`. A markdown link `[text](http...)` in `rest`
/// wins; otherwise the first bare `http(s)://` URL is used; lines with neither
/// are dropped.
#[must_use]
pub fn extract_reference_links(sources_block: &str) -> BTreeMap<u32, String> {
    normalize_newlines(sources_block)
        .lines()
        .filter_map(|line| numbered(line.trim()))
        .filter_map(|(number, rest)| {
            markdown_link(rest)
                .map(|link| link.url)
                .or_else(|| bare_url(rest))
                .map(|url| (number, url.to_string()))
        })
        .collect()
}

/// Every number cited in `content` through `[a]`, `[a,b]` or `[a-b]` groups.
///
/// Ranges are inclusive. Tokens that do not parse, reversed ranges and
/// implausibly wide ranges are skipped; the rest of the group still counts.
#[must_use]
pub fn cited_numbers(content: &str) -> BTreeSet<u32> {
    let mut cited = BTreeSet::new();
    for group in bracket_groups(content) {
        for token in group.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let (Ok(start), Ok(end)) =
                        (start.trim().parse::<u32>(), end.trim().parse::<u32>())
                    else {
                        continue;
                    };
                    if start <= end && end - start <= MAX_RANGE_SPAN {
                        cited.extend(start..=end);
                    }
                }
                None => {
                    if let Ok(number) = token.parse() {
                        cited.insert(number);
                    }
                }
            }
        }
    }
    cited
}

/// The entries of `refs` cited somewhere in `content`.
#[must_use]
pub fn references_for(content: &str, refs: &References) -> References {
    cited_numbers(content)
        .into_iter()
        .filter_map(|number| refs.get(&number).map(|text| (number, text.clone())))
        .collect()
}

/// Numbered entries following a `### References` heading.
///
/// Only `N. text` lines count; everything else in the block is ignored.
#[must_use]
pub fn extract_references(markdown: &str) -> References {
    let text = normalize_newlines(markdown);
    let lines = scan(&text);
    let Some(start) = lines.iter().position(|line| is_references_heading(line.kind)) else {
        return References::new();
    };
    lines[start + 1..]
        .iter()
        .filter_map(|line| numbered(line.raw.trim()))
        .map(|(number, rest)| (number, rest.to_string()))
        .collect()
}

/// Make citations navigable inside a single document.
///
/// Within the `### References` block, each `N.` line gains an `<a id='refN'>`
/// anchor. Everywhere, `[n]` markers not already followed by `(` become
/// `[n](#refn)`; adjacent markers such as `[1][3]` are each rewritten.
#[must_use]
pub fn anchor_citations(markdown: &str) -> String {
    let text = normalize_newlines(markdown);
    let lines = scan(&text);
    let start = lines
        .iter()
        .position(|line| is_references_heading(line.kind))
        .unwrap_or(lines.len());

    let anchored: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.index > start {
                anchor_reference_line(line.raw)
            } else {
                line.raw.to_string()
            }
        })
        .collect();

    rewrite_markers(&anchored.join("\n"), |digits, is_link| {
        (!is_link).then(|| format!("[{digits}](#ref{digits})"))
    })
}

fn anchor_reference_line(raw: &str) -> String {
    let digits = raw.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return raw.to_string();
    }
    let rest = &raw[digits..];
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    if !rest.starts_with(char::is_whitespace) {
        return raw.to_string();
    }
    let number = &raw[..digits];
    format!("<a id='ref{number}'>{number}.</a> {}", rest.trim_start())
}

/// Re-render a sources block as `N. [text](url)` lines in numeric order.
///
/// A leading `## Sources`/`### Sources` heading is kept. The text of each
/// entry is taken from the matching line of the block (with any markdown link
/// reduced to its label), falling back to the URL. Returns an empty string
/// when the block or the map is empty.
#[must_use]
pub fn format_sources_markdown(sources_block: &str, ref_map: &BTreeMap<u32, String>) -> String {
    if sources_block.trim().is_empty() || ref_map.is_empty() {
        return String::new();
    }
    let text = normalize_newlines(sources_block);
    let mut formatted = String::new();

    if let Some(first) = text.lines().find(|line| !line.trim().is_empty()) {
        let first = first.trim();
        if matches!(heading(first), Some((2 | 3, title)) if title.to_ascii_lowercase().starts_with("sources"))
        {
            formatted.push_str(first);
            formatted.push_str("\n\n");
        }
    }

    let originals: BTreeMap<u32, &str> = text
        .lines()
        .filter_map(|line| numbered(line.trim()))
        .collect();

    for (number, url) in ref_map {
        let label = originals
            .get(number)
            .map(|rest| strip_markdown_link(rest))
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| url.clone());
        formatted.push_str(&format!("{number}. [{label}]({url})\n"));
    }

    formatted.trim().to_string()
}

fn is_references_heading(kind: LineKind<'_>) -> bool {
    matches!(kind, LineKind::Heading { level, title }
        if level >= 3 && title.to_ascii_lowercase().starts_with("references"))
}

/// Inner text of every `[...]` group made only of digits, commas, hyphens and
/// spaces, and containing at least one digit.
fn bracket_groups(content: &str) -> impl Iterator<Item = &str> {
    content.split('[').skip(1).filter_map(|chunk| {
        let inner = &chunk[..chunk.find(']')?];
        let well_formed = inner.bytes().any(|b| b.is_ascii_digit())
            && inner
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b',' | b'-' | b' '));
        well_formed.then_some(inner)
    })
}

struct MarkdownLink<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

/// First `[label](http...)` link in `text`.
fn markdown_link(text: &str) -> Option<MarkdownLink<'_>> {
    text.match_indices('[').find_map(|(start, _)| {
        let after_open = &text[start + 1..];
        let split = after_open.find("](")?;
        let label = &after_open[..split];
        let target_at = start + 1 + split + 2;
        let target = &text[target_at..];
        if !(target.starts_with("http://") || target.starts_with("https://")) {
            return None;
        }
        let close = target.find(')')?;
        Some(MarkdownLink {
            start,
            end: target_at + close + 1,
            label,
            url: &target[..close],
        })
    })
}

fn strip_markdown_link(text: &str) -> String {
    match markdown_link(text) {
        Some(link) => format!("{}{}{}", &text[..link.start], link.label, &text[link.end..])
            .trim()
            .to_string(),
        None => text.trim().to_string(),
    }
}

/// First bare `http://` or `https://` URL, up to the next whitespace.
fn bare_url(text: &str) -> Option<&str> {
    let start = ["http://", "https://"]
        .iter()
        .filter_map(|scheme| text.find(scheme))
        .min()?;
    let tail = &text[start..];
    let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
    Some(&tail[..end])
}
