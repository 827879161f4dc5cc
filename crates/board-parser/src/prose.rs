//! Presentation helpers for summaries: paragraphs, previews, URLs.
//!
//! These are heuristics. They aim to make dense model output readable and
//! make no promises beyond that.

use url::Url;

use crate::normalize_newlines;

/// Preview length limit, in characters, when no sentence break is found.
pub const PREVIEW_CHARS: usize = 160;

const PATH_PREVIEW_CHARS: usize = 20;
const UNPARSED_URL_CHARS: usize = 40;
const ELLIPSIS: char = '…';

/// Split a plain summary into trimmed, non-empty paragraphs.
///
/// Blank lines separate paragraphs. A line ending in `.`, `!` or `?` followed
/// by a line starting with an uppercase letter also starts a new paragraph.
#[must_use]
pub fn split_paragraphs(summary: &str) -> Vec<String> {
    let text = normalize_newlines(summary);
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            flush(&mut paragraphs, &mut current);
            continue;
        }
        current.push(line);
        let ends_sentence = line.trim_end().ends_with(['.', '!', '?']);
        let next_is_capital = lines
            .peek()
            .and_then(|next| next.chars().next())
            .is_some_and(char::is_uppercase);
        if ends_sentence && next_is_capital {
            flush(&mut paragraphs, &mut current);
        }
    }
    flush(&mut paragraphs, &mut current);
    paragraphs
}

fn flush(paragraphs: &mut Vec<String>, current: &mut Vec<&str>) {
    let paragraph = current.join("\n");
    let paragraph = paragraph.trim();
    if !paragraph.is_empty() {
        paragraphs.push(paragraph.to_string());
    }
    current.clear();
}

/// Break a single dense block into paragraphs at sentence boundaries.
///
/// Only applies when the text has no blank-line breaks already. A boundary is
/// a lowercase letter, digit, `)` or `"` followed by `.`, whitespace and an
/// uppercase letter.
#[must_use]
pub fn break_dense_paragraph(content: &str) -> String {
    if content.contains("\n\n") {
        return content.to_string();
    }
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len() + 16);
    let mut i = 0;
    while i < chars.len() {
        out.push(chars[i]);
        let boundary = chars[i] == '.'
            && i > 0
            && matches!(chars[i - 1], 'a'..='z' | '0'..='9' | ')' | '"');
        if boundary {
            let gap = chars[i + 1..]
                .iter()
                .take_while(|c| c.is_whitespace())
                .count();
            if gap > 0 && chars.get(i + 1 + gap).is_some_and(|c| c.is_uppercase()) {
                out.push_str("\n\n");
                i += gap;
            }
        }
        i += 1;
    }
    out
}

/// One-line plain-text preview of a summary.
///
/// HTML tags and markdown punctuation are removed and whitespace collapsed.
/// If the result has sentence breaks (`". "`), the first two sentences are
/// kept, with an ellipsis when more followed. Otherwise the text is cut to
/// [`PREVIEW_CHARS`].
#[must_use]
pub fn short_plain_summary(summary: &str) -> String {
    let without_tags = strip_tags(summary);
    let without_markdown: String = without_tags
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '_' | '`' | '>' | '[' | ']' | '(' | ')' | '-'))
        .collect();
    let plain = without_markdown.split_whitespace().collect::<Vec<_>>().join(" ");

    let sentences: Vec<&str> = plain.split(". ").collect();
    if sentences.len() > 1 {
        let mut preview = sentences[..2].join(". ");
        if sentences.len() > 2 {
            preview.push(ELLIPSIS);
        }
        return preview;
    }
    truncate_chars(&plain, PREVIEW_CHARS)
}

fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open + 1..].find('>') else {
            break;
        };
        if close == 0 {
            out.push_str(&rest[..=open + 1]);
            rest = &rest[open + 2..];
            continue;
        }
        out.push_str(&rest[..open]);
        rest = &rest[open + 1 + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Keep at most `limit` characters, replacing the tail with an ellipsis.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit - 3).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Wrap bare `http(s)://` URLs as `[url](url)`.
///
/// URLs that are already the target or label of a markdown link are left
/// alone. Trailing sentence punctuation is not treated as part of the URL.
#[must_use]
pub fn linkify_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = next_url_start(rest) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let run = tail
            .find(|c: char| !is_url_char(c))
            .unwrap_or(tail.len());
        let url = trim_url_tail(&tail[..run]);
        let already_linked = out.ends_with("](") || url.contains("](");
        if already_linked {
            out.push_str(&tail[..run]);
            rest = &tail[run..];
        } else {
            out.push_str(&format!("[{url}]({url})"));
            rest = &tail[url.len()..];
        }
    }
    out.push_str(rest);
    out
}

fn next_url_start(text: &str) -> Option<usize> {
    ["http://", "https://"]
        .iter()
        .filter_map(|scheme| text.find(scheme))
        .min()
}

const fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | ':' | '/' | '?' | '#' | '[' | ']' | '@' | '!' | '$' | '&'
                | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%'
        )
}

/// Drop trailing punctuation and unbalanced closing parentheses.
fn trim_url_tail(url: &str) -> &str {
    let mut url = url;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?', '\'']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(inner) if inner.matches('(').count() < trimmed.matches(')').count() => inner,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

/// Compact display form of a source URL: host plus at most 20 path characters.
///
/// Strings that do not parse as URLs are cut to 40 characters instead.
#[must_use]
pub fn truncate_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return truncate_chars(raw, UNPARSED_URL_CHARS);
    };
    let host = url.host_str().unwrap_or_default();
    let path = url.path();
    if path.chars().count() > PATH_PREVIEW_CHARS {
        let head: String = path.chars().take(PATH_PREVIEW_CHARS).collect();
        format!("{host}{head}{ELLIPSIS}")
    } else {
        format!("{host}{path}")
    }
}
