//! Record kinds and lifecycle states.
//!
//! `InsightKind` serializes with the kebab-case names used on the wire
//! (`board-pack`, `brief`, `alert`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// InsightKind
// ---------------------------------------------------------------------------

/// Display classification of an insight record. Has no effect on parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    BoardPack,
    Brief,
    Alert,
}

impl InsightKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BoardPack => "board-pack",
            Self::Brief => "brief",
            Self::Alert => "alert",
        }
    }

    /// Human label, e.g. `Board Pack`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BoardPack => "Board Pack",
            Self::Brief => "Brief",
            Self::Alert => "Alert",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "board-pack" | "boardpack" => Ok(Self::BoardPack),
            "brief" => Ok(Self::Brief),
            "alert" => Ok(Self::Alert),
            other => Err(CoreError::Validation(format!(
                "unknown insight kind '{other}' (expected board-pack, brief or alert)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a generated record, reflected in its title suffix.
///
/// ```text
/// loading → ready
///         → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Loading,
    Ready,
    Failed,
}

impl RecordStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Loading => &[Self::Ready, Self::Failed],
            Self::Ready | Self::Failed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Suffix appended to the base title, including parentheses.
    #[must_use]
    pub const fn title_suffix(self) -> &'static str {
        match self {
            Self::Loading => "(Loading...)",
            Self::Ready => "(Perplexity)",
            Self::Failed => "(Error)",
        }
    }

    /// Build the title for a record in this state.
    #[must_use]
    pub fn title(self, base: &str) -> String {
        format!("{base} {}", self.title_suffix())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
