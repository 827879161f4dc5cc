use board_core::enums::InsightKind;
use clap::ValueEnum;

/// Canned alert prompts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum AlertPreset {
    MarketRisk,
    Regulatory,
    Competitor,
}

/// Prompt for a full board pack.
#[must_use]
pub fn board_pack_prompt(company: &str) -> String {
    format!("Generate a board pack for {company}")
}

/// A free-form question, scoped to `company`.
#[must_use]
pub fn question_prompt(company: &str, question: &str) -> String {
    format!("For the company {company}, {}", question.trim())
}

const ACTION_ITEMS_TAIL: &str = "Then, under the heading \"Action Items:\", list 3-5 clear, \
actionable next steps as markdown bullet points.";

impl AlertPreset {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MarketRisk => "Market Risk Alert",
            Self::Regulatory => "Regulatory Update",
            Self::Competitor => "Competitor X Product Launch",
        }
    }

    #[must_use]
    pub const fn kind(self) -> InsightKind {
        match self {
            Self::MarketRisk => InsightKind::Alert,
            Self::Regulatory | Self::Competitor => InsightKind::Brief,
        }
    }

    /// Prompt text for `company`.
    #[must_use]
    pub fn prompt(self, company: &str) -> String {
        let lead = match self {
            Self::MarketRisk => format!(
                "What are the top market risks for {company} this week? \
                 Provide a board-ready summary with cited sources."
            ),
            Self::Regulatory => format!(
                "Summarize the latest regulatory changes affecting {company} and \
                 recommend board actions. Provide cited sources."
            ),
            Self::Competitor => format!(
                "What are the strategic implications of Competitor X's latest product \
                 launch for {company}? Provide a board-ready brief with cited sources."
            ),
        };
        format!("{lead} {ACTION_ITEMS_TAIL}")
    }
}
