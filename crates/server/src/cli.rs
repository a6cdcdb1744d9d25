//! CLI argument parsing.
//!
//! Flags override the environment-derived `Config`; with no subcommand the
//! server starts with the environment values alone.

use clap::{Args, Parser, Subcommand};

/// Task offload server: factorials on a fixed worker pool, with a live
/// WebSocket status feed.
#[derive(Parser, Debug)]
#[command(name = "offload-server", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP/WebSocket server (default).
    Serve(ServeArgs),
    /// Print the effective configuration as JSON and exit.
    Config,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address (overrides HOST).
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides PORT).
    #[arg(long)]
    pub port: Option<u16>,

    /// Worker thread count, 0 = available parallelism (overrides WORKER_POOL_SIZE).
    #[arg(long)]
    pub workers: Option<usize>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut offload_core::Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(workers) = self.workers {
            config.pool.workers = workers;
        }
    }
}
