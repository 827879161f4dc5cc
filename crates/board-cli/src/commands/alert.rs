use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AlertArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `boardroom alert`.
pub async fn handle(args: &AlertArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pin_index = match args.pin {
        Some(0) => bail!("--pin is 1-based"),
        Some(n) if n > args.presets.len() => {
            bail!("--pin {n} is out of range: {} preset(s) given", args.presets.len())
        }
        Some(n) => Some(n - 1),
        None => None,
    };

    let ids = ctx.run_presets(&args.presets).await?;
    if let Some(id) = pin_index.and_then(|index| ids.get(index).copied()) {
        ctx.store.pin(id);
    }
    output(&ctx.store.snapshot(), flags.format)
}
