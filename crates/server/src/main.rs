mod api;
mod app_config;
mod cli;
mod live;
mod router;
mod startup;
mod state;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ServeArgs};

async fn serve(mut config: offload_core::Config, args: &ServeArgs) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.log_summary();

    let addr = config.server.bind_addr();
    let port = config.server.port;

    let state = startup::build_app_state(config)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", port);
    info!("Monitor available at http://localhost:{}/monitor", port);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let config = app_config::load_config();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config) => {
            println!("{}", config.to_json_pretty()?);
        }
        Some(Command::Serve(args)) => serve(config, &args).await?,
        None => serve(config, &ServeArgs::default()).await?,
    }

    Ok(())
}
