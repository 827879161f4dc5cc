use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("boardroom error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    // Parsing is pure and needs neither config nor network.
    if let cli::Commands::Parse(args) = &cli.command {
        return commands::parse::handle(args, &flags);
    }

    let config = board_config::BoardConfig::load_with_dotenv()
        .context("failed to load boardroom configuration")?;
    context::warn_unconfigured(&config);

    if let cli::Commands::Serve(args) = &cli.command {
        return commands::serve::handle(args, config).await;
    }

    let ctx = context::AppContext::init(config)
        .context("failed to initialize boardroom application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("BOARDROOM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
