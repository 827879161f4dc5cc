//! Line classification.
//!
//! Every parser in this crate starts from [`scan`]: the text is split on
//! `\n` and each line is classified exactly once. Section assembly then works
//! on classified lines instead of re-matching the raw text.

/// Section names recognized as headings, with or without `#` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLabel {
    ActionItems,
    References,
    Sources,
    ExecutiveSummary,
}

/// What a single line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Three or more of `-` / `_` and nothing else.
    Divider,
    /// `#`..`######` followed by a title.
    Heading { level: usize, title: &'a str },
    /// A section label on a line of its own, without `#` markers
    /// (`Action Items:`, `References`).
    Label(SectionLabel),
    Text,
}

/// One classified line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Zero-based line number.
    pub index: usize,
    /// The line as it appears in the input, without its newline.
    pub raw: &'a str,
    pub kind: LineKind<'a>,
    /// Whether a newline follows this line.
    pub terminated: bool,
}

impl Line<'_> {
    /// The section label this line names, whether written as a heading or a bare label.
    #[must_use]
    pub fn label(&self) -> Option<SectionLabel> {
        match self.kind {
            LineKind::Heading { title, .. } => label_of(title),
            LineKind::Label(label) => Some(label),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_heading(&self) -> bool {
        matches!(self.kind, LineKind::Heading { .. })
    }

    /// A heading or a bare label: anything that opens a section.
    #[must_use]
    pub const fn opens_section(&self) -> bool {
        matches!(self.kind, LineKind::Heading { .. } | LineKind::Label(_))
    }

    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self.kind, LineKind::Blank | LineKind::Divider)
    }
}

/// Split normalized text into classified lines.
///
/// Always returns at least one line; `""` scans to a single blank line.
#[must_use]
pub fn scan(text: &str) -> Vec<Line<'_>> {
    let segments: Vec<&str> = text.split('\n').collect();
    let last = segments.len() - 1;
    segments
        .into_iter()
        .enumerate()
        .map(|(index, raw)| Line {
            index,
            raw,
            kind: classify(raw),
            terminated: index < last,
        })
        .collect()
}

/// Re-join a run of lines exactly as they appeared in the input.
#[must_use]
pub fn join(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| line.raw)
        .collect::<Vec<_>>()
        .join("\n")
}

fn classify(raw: &str) -> LineKind<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if is_divider(trimmed) {
        return LineKind::Divider;
    }
    if let Some((level, title)) = heading(trimmed) {
        return LineKind::Heading { level, title };
    }
    if let Some(label) = label_of(trimmed) {
        return LineKind::Label(label);
    }
    LineKind::Text
}

/// Parse an ATX heading from a trimmed line.
///
/// A space after the `#` run is required, except for section labels, where
/// `##Action Items` is accepted too.
#[must_use]
pub fn heading(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    if rest.starts_with(char::is_whitespace) || label_of(title).is_some() {
        Some((level, title))
    } else {
        None
    }
}

/// Match a heading title or bare line against the known section labels.
///
/// Case-insensitive; a trailing colon and surrounding whitespace are ignored.
#[must_use]
pub fn label_of(title: &str) -> Option<SectionLabel> {
    let name = title.trim();
    let name = name.strip_suffix(':').unwrap_or(name).trim_end();
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "action items" => Some(SectionLabel::ActionItems),
        "references" | "reference" => Some(SectionLabel::References),
        "sources" | "source" => Some(SectionLabel::Sources),
        "executive summary" => Some(SectionLabel::ExecutiveSummary),
        _ => None,
    }
}

/// `---`, `___`, `-_-` ... at least three characters.
#[must_use]
pub fn is_divider(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.bytes().all(|b| b == b'-' || b == b'_')
}

/// Strip one leading `-`, `*` or `+` bullet followed by whitespace.
#[must_use]
pub fn strip_bullet(line: &str) -> &str {
    match line.strip_prefix(['-', '*', '+']) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

/// Strip one leading `N.` ordinal followed by whitespace.
#[must_use]
pub fn strip_ordinal(line: &str) -> &str {
    let digits = leading_digits(line);
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

/// Strip a leading reference number: `1.`, `1`, `[1]`, `(1)`, `[1].`.
#[must_use]
pub fn strip_reference_marker(line: &str) -> &str {
    let body = line.strip_prefix(['[', '(']).unwrap_or(line);
    let digits = leading_digits(body);
    if digits == 0 {
        return line;
    }
    let rest = &body[digits..];
    let rest = rest.strip_prefix([']', ')']).unwrap_or(rest);
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    rest.trim_start()
}

/// Split `N. rest` into its number and trimmed remainder.
#[must_use]
pub fn numbered(trimmed: &str) -> Option<(u32, &str)> {
    let digits = leading_digits(trimmed);
    if digits == 0 {
        return None;
    }
    let number = trimmed[..digits].parse().ok()?;
    let rest = trimmed[digits..].strip_prefix('.')?;
    Some((number, rest.trim()))
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn scan_tracks_termination() {
        let lines = scan("a\nb\n");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].terminated);
        assert!(lines[1].terminated);
        assert!(!lines[2].terminated);
        assert_eq!(lines[2].kind, LineKind::Blank);
    }

    #[test]
    fn join_restores_input() {
        let text = "one\n\n  two  \nthree";
        assert_eq!(join(&scan(text)), text);
    }

    #[rstest]
    #[case("Action Items:", Some(SectionLabel::ActionItems))]
    #[case("  action items  ", Some(SectionLabel::ActionItems))]
    #[case("REFERENCES", Some(SectionLabel::References))]
    #[case("Reference:", Some(SectionLabel::References))]
    #[case("Sources:", Some(SectionLabel::Sources))]
    #[case("Executive Summary", Some(SectionLabel::ExecutiveSummary))]
    #[case("Action Items: call the CFO", None)]
    #[case("Actions", None)]
    fn labels(#[case] input: &str, #[case] expected: Option<SectionLabel>) {
        assert_eq!(label_of(input), expected);
    }

    #[rstest]
    #[case("## Action Items", Some((2, "Action Items")))]
    #[case("##Action Items:", Some((2, "Action Items:")))]
    #[case("### Executive Summary", Some((3, "Executive Summary")))]
    #[case("# Title  ", Some((1, "Title")))]
    #[case("#hashtag", None)]
    #[case("####### too deep", None)]
    #[case("##", None)]
    fn headings(#[case] input: &str, #[case] expected: Option<(usize, &str)>) {
        assert_eq!(heading(input), expected);
    }

    #[test]
    fn classification() {
        let lines = scan("Intro\n---\n## Action Items\nReferences:\n\n- item");
        let kinds: Vec<_> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Text,
                LineKind::Divider,
                LineKind::Heading {
                    level: 2,
                    title: "Action Items"
                },
                LineKind::Label(SectionLabel::References),
                LineKind::Blank,
                LineKind::Text,
            ]
        );
        assert_eq!(lines[2].label(), Some(SectionLabel::ActionItems));
        assert_eq!(lines[3].label(), Some(SectionLabel::References));
        assert!(lines[3].opens_section());
        assert!(!lines[3].is_heading());
    }

    #[rstest]
    #[case("- item", "item")]
    #[case("*   item", "item")]
    #[case("+ item", "item")]
    #[case("-item", "-item")]
    #[case("item", "item")]
    fn bullets(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_bullet(input), expected);
    }

    #[rstest]
    #[case("1. item", "item")]
    #[case("12.  item", "item")]
    #[case("1.item", "1.item")]
    #[case("2024 revenue", "2024 revenue")]
    fn ordinals(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_ordinal(input), expected);
    }

    #[rstest]
    #[case("1. ref1", "ref1")]
    #[case("[2] ref2", "ref2")]
    #[case("(3) ref3", "ref3")]
    #[case("4 ref4", "ref4")]
    #[case("[5]. ref5", "ref5")]
    #[case("https://example.com", "https://example.com")]
    #[case("[Title](https://example.com)", "[Title](https://example.com)")]
    fn reference_markers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_reference_marker(input), expected);
    }

    #[test]
    fn numbered_lines() {
        assert_eq!(numbered("3. Reuters"), Some((3, "Reuters")));
        assert_eq!(numbered("3.Reuters"), Some((3, "Reuters")));
        assert_eq!(numbered("3 Reuters"), None);
        assert_eq!(numbered("Reuters"), None);
        assert_eq!(numbered("99999999999. overflow"), None);
    }

    #[test]
    fn dividers() {
        assert!(is_divider("---"));
        assert!(is_divider("_____"));
        assert!(!is_divider("--"));
        assert!(!is_divider("- - -"));
    }
}
