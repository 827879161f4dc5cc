mod app_context;
mod briefs;
mod config_warnings;
mod presets;
mod scenarios;

pub use app_context::AppContext;
pub use briefs::{competitive_analysis_prompt, month_year, scenario_prompt};
pub use config_warnings::warn_unconfigured;
pub use presets::{AlertPreset, board_pack_prompt, question_prompt};
pub use scenarios::{capitalize, suggest_scenarios};
