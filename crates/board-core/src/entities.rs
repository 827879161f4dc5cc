//! Insight records and the parsed view of an answer.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{InsightKind, RecordStatus};

/// Numbered sources, keyed by citation number.
///
/// This is the only representation of references: producers that yield an
/// ordered list number it from 1.
pub type References = BTreeMap<u32, String>;

/// Number an ordered list of sources from 1.
#[must_use]
pub fn number_references<I, S>(sources: I) -> References
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    (1..).zip(sources.into_iter().map(Into::into)).collect()
}

/// Description shown while a generation request is in flight.
pub const LOADING_DESCRIPTION: &str = "Generating Perplexity-powered insight... Please wait.";

/// Description written when a generation request fails.
pub const FAILED_DESCRIPTION: &str = "Failed to generate Perplexity insight.";

/// Display timestamp written on creation and on every terminal update.
pub const JUST_NOW: &str = "just now";

/// A single board pack, brief or alert held in the memory store.
///
/// `id` and `kind` are fixed at creation; everything else may be rewritten as
/// the underlying request resolves.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<References>,
    /// Full markdown of a saved brief section or scenario analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl InsightRecord {
    /// A record in the loading state for a request that was just dispatched.
    #[must_use]
    pub fn loading(id: i64, base_title: &str, kind: InsightKind) -> Self {
        Self {
            id,
            title: RecordStatus::Loading.title(base_title),
            description: LOADING_DESCRIPTION.to_string(),
            timestamp: JUST_NOW.to_string(),
            kind,
            action_items: None,
            references: None,
            content: None,
        }
    }

    /// A finished `board-pack` record saved from a brief. The title carries
    /// no status suffix.
    #[must_use]
    pub fn saved(
        id: i64,
        title: &str,
        description: impl Into<String>,
        content: impl Into<String>,
        references: References,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.into(),
            timestamp: JUST_NOW.to_string(),
            kind: InsightKind::BoardPack,
            action_items: None,
            references: Some(references),
            content: Some(content.into()),
        }
    }

    /// Apply a successful answer in place.
    pub fn resolve(&mut self, base_title: &str, parsed: ParsedInsight) {
        self.title = RecordStatus::Ready.title(base_title);
        self.description = parsed.summary;
        self.action_items = Some(parsed.action_items);
        self.references = Some(parsed.references);
        self.timestamp = JUST_NOW.to_string();
    }

    /// Mark the record as failed in place. Earlier fields other than title
    /// and description are left as they were.
    pub fn fail(&mut self, base_title: &str) {
        self.title = RecordStatus::Failed.title(base_title);
        self.description = FAILED_DESCRIPTION.to_string();
        self.timestamp = JUST_NOW.to_string();
    }

    /// Infer the lifecycle state from the title suffix.
    #[must_use]
    pub fn status(&self) -> Option<RecordStatus> {
        [RecordStatus::Loading, RecordStatus::Ready, RecordStatus::Failed]
            .into_iter()
            .find(|status| self.title.ends_with(status.title_suffix()))
    }

    /// Title without a trailing loading marker.
    #[must_use]
    pub fn display_title(&self) -> &str {
        display_title(&self.title)
    }
}

/// Strip a trailing ` (Loading.)`, ` (Loading..)`, ` (Loading...)` marker.
#[must_use]
pub fn display_title(title: &str) -> &str {
    let Some(open) = title.rfind("(Loading") else {
        return title;
    };
    let rest = &title[open + "(Loading".len()..];
    let dots = rest.chars().take_while(|c| *c == '.').count();
    if dots == 0 || &rest[dots..] != ")" {
        return title;
    }
    title[..open].trim_end()
}

/// Output of the insight section parser. Recomputed on demand, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInsight {
    pub summary: String,
    pub action_items: Vec<String>,
    pub references: References,
}

impl ParsedInsight {
    /// A parse result that carries the whole text as summary.
    #[must_use]
    pub fn summary_only(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }
}
