use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use board_config::BoardConfig;
use board_gateway::ProxyServer;

use crate::cli::root_commands::ServeArgs;

/// Handle `boardroom serve`. Runs until Ctrl-C.
pub async fn handle(args: &ServeArgs, mut config: BoardConfig) -> anyhow::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    config.server.validate()?;

    let server = ProxyServer::from_config(&config).context("failed to start proxy endpoint")?;
    if let Some(addr) = server.local_addr() {
        eprintln!("boardroom proxy listening on http://{addr}{}", server.path());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            flag.store(true, Ordering::SeqCst);
        }
    });

    server.serve_until(shutdown).await?;
    Ok(())
}
