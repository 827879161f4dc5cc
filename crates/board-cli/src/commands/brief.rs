use anyhow::bail;
use board_parser::citations::extract_references;
use board_parser::sections::split_sections;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BriefArgs;
use crate::context::{AppContext, capitalize, competitive_analysis_prompt, month_year};
use crate::output::{BriefReport, brief_view, output};

/// Handle `boardroom brief`.
pub async fn handle(args: &BriefArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.save.contains(&0) {
        bail!("--save is 1-based");
    }

    let company = capitalize(ctx.company.trim());
    let prompt = competitive_analysis_prompt(&company, &month_year());
    let markdown = ctx.fetch_brief(&prompt).await?;

    let sections = split_sections(&markdown);
    let references = extract_references(&markdown);
    let mut saved = Vec::with_capacity(args.save.len());
    for n in &args.save {
        match sections.get(n - 1) {
            Some(section) => saved.push(ctx.save_section(section, &references)),
            None => tracing::warn!(
                section = n,
                available = sections.len(),
                "--save skipped: the brief has no such section"
            ),
        }
    }

    let report = BriefReport {
        brief: brief_view(&markdown),
        saved,
        snapshot: ctx.store.snapshot(),
    };
    output(&report, flags.format)
}
