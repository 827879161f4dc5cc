use std::path::PathBuf;

use board_core::enums::InsightKind;
use clap::{Args, Subcommand};

use crate::context::AlertPreset;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the proxy endpoint in front of the answer service.
    Serve(ServeArgs),
    /// Ask one question and store the parsed answer.
    Ask(AskArgs),
    /// Run one or more alert presets concurrently.
    Alert(AlertArgs),
    /// Generate a full board pack for the configured company.
    BoardPack,
    /// Generate a competitive analysis brief, optionally saving sections.
    Brief(BriefArgs),
    /// Suggest what-if scenarios, or analyze one.
    Scenario(ScenarioArgs),
    /// Parse an answer from a file or stdin.
    Parse(ParseArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Address to bind, overriding `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// The question sent to the answer service.
    pub question: String,

    /// Record kind: board-pack, brief, alert
    #[arg(long, default_value = "board-pack")]
    pub kind: InsightKind,

    /// Record title (defaults to the kind's label).
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AlertArgs {
    /// Presets to run.
    #[arg(value_enum, required = true, num_args = 1..)]
    pub presets: Vec<AlertPreset>,

    /// Pin the Nth generated record (1-based, in argument order).
    #[arg(long)]
    pub pin: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// Answer file; reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Treat the input as a long-form brief: split it into linked sections.
    #[arg(long)]
    pub brief: bool,
}

#[derive(Clone, Debug, Args)]
pub struct BriefArgs {
    /// Save the Nth section (1-based) to the board pack; repeatable.
    #[arg(long = "save", value_name = "N")]
    pub save: Vec<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ScenarioArgs {
    /// Scenario to analyze; lists suggestions when omitted.
    pub scenario: Option<String>,

    /// Save the whole analysis to the board pack.
    #[arg(long, requires = "scenario")]
    pub save: bool,
}
