use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use encore::{cli, runtime};

/// Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = cli::Args::parse();
    runtime::run(args)
}
