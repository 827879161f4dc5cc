use board_core::enums::InsightKind;

use crate::cli::GlobalFlags;
use crate::context::{AppContext, board_pack_prompt};
use crate::output::output;

/// Handle `boardroom board-pack`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let prompt = board_pack_prompt(&ctx.company);
    let kind = InsightKind::BoardPack;
    ctx.generate(kind.label(), &prompt, kind).await;
    output(&ctx.store.snapshot(), flags.format)
}
