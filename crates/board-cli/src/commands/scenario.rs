use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScenarioArgs;
use crate::context::{AppContext, capitalize, month_year, scenario_prompt, suggest_scenarios};
use crate::output::{BriefReport, brief_view, output};

/// Handle `boardroom scenario`.
pub async fn handle(args: &ScenarioArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(scenario) = args.scenario.as_deref() else {
        return output(&suggest_scenarios(&ctx.company), flags.format);
    };

    let company = capitalize(ctx.company.trim());
    let prompt = scenario_prompt(scenario.trim(), &company, &month_year());
    let markdown = ctx.fetch_brief(&prompt).await?;

    let mut saved = Vec::new();
    if args.save {
        if markdown.trim().is_empty() {
            tracing::warn!("--save skipped: the analysis is empty");
        } else {
            saved.push(ctx.save_scenario(&markdown));
        }
    }

    let report = BriefReport {
        brief: brief_view(&markdown),
        saved,
        snapshot: ctx.store.snapshot(),
    };
    output(&report, flags.format)
}
