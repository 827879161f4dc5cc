use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::context::{AppContext, question_prompt};
use crate::output::output;

/// Handle `boardroom ask`.
pub async fn handle(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let title = args.title.as_deref().unwrap_or(args.kind.label());
    let prompt = question_prompt(&ctx.company, &args.question);
    ctx.generate(title, &prompt, args.kind).await;
    output(&ctx.store.snapshot(), flags.format)
}
