use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Ask(args) => commands::ask::handle(&args, ctx, flags).await,
        Commands::Alert(args) => commands::alert::handle(&args, ctx, flags).await,
        Commands::BoardPack => commands::board_pack::handle(ctx, flags).await,
        Commands::Brief(args) => commands::brief::handle(&args, ctx, flags).await,
        Commands::Scenario(args) => commands::scenario::handle(&args, ctx, flags).await,
        Commands::Serve(_) | Commands::Parse(_) => {
            unreachable!("serve/parse are pre-dispatched in main")
        }
    }
}
