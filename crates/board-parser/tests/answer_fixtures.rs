//! Parsing of realistic generated answers.

use board_parser::citations::{
    anchor_targets, extract_reference_links, extract_references, format_sources_markdown,
    linkify, references_for,
};
use board_parser::prose::short_plain_summary;
use board_parser::sections::split_sections;
use board_parser::{cited_numbers, parse_insight};
use pretty_assertions::assert_eq;

const MARKET_RISK: &str = include_str!("fixtures/market_risk_answer.md");
const BOARD_BRIEF: &str = include_str!("fixtures/board_brief.md");

#[test]
fn market_risk_answer_sections() {
    let parsed = parse_insight(MARKET_RISK);

    assert!(parsed.summary.starts_with("Perplexity faces three market risks"));
    assert!(!parsed.summary.contains("Action Items"));
    assert_eq!(anchor_targets(&parsed.summary), vec!["1", "2", "3", "4", "1"]);

    assert_eq!(
        parsed.action_items,
        vec![
            "Brief the board on the status of publisher revenue-share talks.",
            "Model a 15% rise in inference costs against the FY plan.",
            "Assign an owner for incumbent pricing response.",
        ]
    );

    let numbers: Vec<u32> = parsed.references.keys().copied().collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(
        parsed.references[&3],
        "The Information, pricing memo coverage"
    );
    assert!(parsed.references[&4].starts_with("IEA, Electricity 2025 report"));
}

#[test]
fn market_risk_answer_crlf_matches_lf() {
    let crlf = MARKET_RISK.replace('\n', "\r\n");
    assert_eq!(parse_insight(&crlf), parse_insight(MARKET_RISK));
}

#[test]
fn parsed_insight_json_shape() {
    let parsed = parse_insight(MARKET_RISK);
    let json = serde_json::to_value(&parsed).expect("serialize");
    assert_eq!(json["actionItems"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        json["references"]["2"],
        "Bloomberg, \"Search incumbents cut AI tier prices\""
    );
}

#[test]
fn board_brief_executive_summary_wins() {
    let parsed = parse_insight(BOARD_BRIEF);

    assert!(parsed.summary.starts_with("Regulatory activity increased"));
    assert!(parsed.summary.ends_with("disclosure-focused [2,3]."));
    assert_eq!(anchor_targets(&parsed.summary), vec!["1"]);
    assert_eq!(
        parsed.action_items,
        vec![
            "Schedule a compliance review with counsel.",
            "Confirm the owner for AI Act transparency reporting.",
        ]
    );
    assert_eq!(parsed.references.len(), 3);
    assert_eq!(parsed.references[&3], "Internal counsel memo");
}

#[test]
fn board_brief_sections_and_citations() {
    let sections = split_sections(BOARD_BRIEF);
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Executive Summary", "Key Changes", "Board Actions", "Action Items"]
    );

    let refs = extract_references(BOARD_BRIEF);
    assert_eq!(refs.len(), 3);

    let key_changes = &sections[1].content;
    assert_eq!(
        cited_numbers(key_changes).into_iter().collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    let board_actions = references_for(&sections[2].content, &refs);
    assert_eq!(board_actions.keys().copied().collect::<Vec<_>>(), vec![3]);
}

#[test]
fn board_brief_sources_are_linked() {
    let block = BOARD_BRIEF
        .split_once("### References")
        .map(|(_, block)| block)
        .expect("references block");
    let links = extract_reference_links(block);
    assert_eq!(links.len(), 2);
    assert_eq!(links[&1], "https://eu.example/ai-act");

    let sections = split_sections(BOARD_BRIEF);
    let linked = linkify(&sections[1].content, &links);
    assert!(linked.contains("phasing in [1](https://eu.example/ai-act)."));
    assert!(linked.contains("opt-out requirements [2-3]."));

    let rendered = format_sources_markdown(block, &links);
    assert_eq!(
        rendered,
        "1. [EU AI Act overview](https://eu.example/ai-act)\n\
         2. [State privacy tracker https://privacy.example/tracker](https://privacy.example/tracker)"
    );
}

#[test]
fn previews_strip_markup() {
    let parsed = parse_insight(BOARD_BRIEF);
    let preview = short_plain_summary(&parsed.summary);
    assert!(preview.starts_with("Regulatory activity increased across the EU and US this quarter 1."));
    assert!(!preview.contains('<'));
}
