//! Prompts for long-form briefs: competitive analysis and scenario planning.

/// Closing instructions shared by every long-form brief.
const BRIEF_REFERENCES: &str = "### References\n\
- Numbered markdown list for all sources. For each in-text citation, use [n] (e.g., [3]). \
Do NOT use HTML or anchor tags, just plain markdown.";

const EXECUTIVE_SUMMARY_STYLE: &str = "Write in 2-3 short paragraphs, using double line \
breaks between paragraphs for readability.";

const RECOMMENDATIONS: &str = "### Board-Ready Recommendations\n\
- Use a numbered markdown list for each recommendation, with a short explanation for each.";

/// Month and year the brief is written for, e.g. `October 2026`.
#[must_use]
pub fn month_year() -> String {
    chrono::Local::now().format("%B %Y").to_string()
}

/// Board-level competitive analysis for `company`.
#[must_use]
pub fn competitive_analysis_prompt(company: &str, month_year: &str) -> String {
    format!(
        "Perform a deep, board-level competitive analysis for {company} as of {month_year}.\n\n\
         Structure your response in markdown with the following sections:\n\n\
         ### Executive Summary\n\
         {EXECUTIVE_SUMMARY_STYLE} Summarize the current competitive landscape and key \
         risks/opportunities.\n\n\
         ### Recent High-Impact Competitor Moves\n\
         - Use a markdown bullet list: [Competitor], [Move], [Date], [Strategic Implication \
         for {company}], [Source]\n\n\
         ### Market Shifts, Threats & Opportunities\n\
         - Use short paragraphs for each trend or threat, separated by double line breaks. \
         Use bullet points for lists where appropriate.\n\n\
         {RECOMMENDATIONS}\n\n\
         {BRIEF_REFERENCES}\n\n\
         Do NOT include a 'Top Competitors' table or section. Focus on recent moves, \
         implications, and board-level recommendations. All claims must be cited with sources \
         as [n] and listed in the References section as a markdown numbered list."
    )
}

/// Board-level analysis of one what-if `scenario` for `company`.
#[must_use]
pub fn scenario_prompt(scenario: &str, company: &str, month_year: &str) -> String {
    format!(
        "Given this scenario: \"{scenario}\", generate a board-level scenario analysis for \
         {company} as of {month_year}.\n\n\
         Structure your response in markdown with the following sections:\n\n\
         ### Executive Summary\n\
         {EXECUTIVE_SUMMARY_STYLE} Summarize the scenario and its strategic implications.\n\n\
         ### Risks & Opportunities\n\
         - Use short paragraphs or bullet points for each risk or opportunity, separated by \
         double line breaks. Use bullet points for lists where appropriate.\n\n\
         {RECOMMENDATIONS}\n\n\
         {BRIEF_REFERENCES}\n\n\
         Do NOT include a 'Top Competitors' table or section. Focus on scenario implications, \
         risks, and board-level recommendations. All claims must be cited with sources as [n] \
         and listed in the References section as a markdown numbered list."
    )
}
