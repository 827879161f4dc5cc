//! Scenario suggestions for scenario planning.
//!
//! A company is matched against a small table of well-known companies by
//! edit distance; matched companies get competitor-specific scenarios, all
//! others a generic set.

use serde::Serialize;

/// Well-known companies and their main competitors.
const COMPETITORS: &[(&str, &[&str])] = &[
    ("Perplexity", &["OpenAI", "Google", "Anthropic", "Microsoft"]),
    ("Intuit", &["H&R Block", "Xero", "FreshBooks"]),
    ("Microsoft", &["Google", "Apple", "Amazon", "Salesforce"]),
    ("Google", &["Microsoft", "Apple", "Meta", "Amazon"]),
    ("Apple", &["Samsung", "Google", "Microsoft", "Huawei"]),
    ("Amazon", &["Walmart", "Alibaba", "eBay", "Target"]),
    ("Meta", &["TikTok", "Snap", "Twitter", "YouTube"]),
    ("Tesla", &["Ford", "GM", "Rivian", "Lucid"]),
    ("OpenAI", &["Anthropic", "Google", "Cohere", "Meta"]),
];

/// Largest edit distance, on normalized names, still counted as a match.
const MAX_MATCH_DISTANCE: usize = 2;

/// Competitor-specific scenarios offered for a matched company.
const COMPETITOR_SCENARIOS: usize = 3;

/// Suggested what-if scenarios for one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSuggestions {
    pub company: String,
    /// Table entry the company matched, if any.
    pub matched: Option<&'static str>,
    pub scenarios: Vec<String>,
}

/// Uppercase the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lowercase and keep ASCII letters and digits only.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Closest known company to `input`, if it is close enough.
#[must_use]
pub fn match_company(input: &str) -> Option<&'static str> {
    let wanted = normalize(input);
    if wanted.is_empty() {
        return None;
    }
    COMPETITORS
        .iter()
        .map(|(name, _)| (*name, strsim::levenshtein(&wanted, &normalize(name))))
        .min_by_key(|(_, distance)| *distance)
        .filter(|(_, distance)| *distance <= MAX_MATCH_DISTANCE)
        .map(|(name, _)| name)
}

/// Competitors listed for a known company, empty otherwise.
#[must_use]
pub fn competitors_of(company: &str) -> &'static [&'static str] {
    COMPETITORS
        .iter()
        .find_map(|(name, competitors)| (*name == company).then_some(*competitors))
        .unwrap_or_default()
}

fn competitor_scenario(index: usize, company: &str, competitor: &str) -> String {
    match index {
        0 => format!("What if {competitor} launches a new enterprise suite targeting {company}?"),
        1 => format!("What if {competitor} acquires a major AI startup?"),
        _ => format!("What if {competitor} introduces a disruptive product in {company}'s market?"),
    }
}

fn regulation_scenario(company: &str) -> String {
    format!("What if new regulations impact {company}'s core business?")
}

/// Scenarios for `company`: up to three competitor moves plus a regulatory
/// change when the company is known, a generic set otherwise.
#[must_use]
pub fn suggest_scenarios(company: &str) -> ScenarioSuggestions {
    let display_name = capitalize(company.trim());
    let matched = match_company(&display_name);

    let scenarios = match matched {
        Some(known) => competitors_of(known)
            .iter()
            .take(COMPETITOR_SCENARIOS)
            .enumerate()
            .map(|(index, competitor)| competitor_scenario(index, &display_name, competitor))
            .chain(std::iter::once(regulation_scenario(&display_name)))
            .collect(),
        None => vec![
            format!("What if OpenAI launches a new enterprise suite targeting {display_name}?"),
            format!(
                "What if a major competitor launches an AI-powered product in {display_name}'s market?"
            ),
            regulation_scenario(&display_name),
        ],
    };

    tracing::debug!(company = %display_name, ?matched, count = scenarios.len(), "scenario suggestions");
    ScenarioSuggestions {
        company: display_name,
        matched,
        scenarios,
    }
}
