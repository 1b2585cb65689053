//! Scout CLI application
//!
//! Runs the code search tools from a terminal.
//!
//! ```bash
//! scout search 'repo:^github\.com/tokio-rs/tokio$ spawn_blocking'
//! scout fetch github.com/tokio-rs/tokio tokio/src --depth 3
//! ```
//!
//! Settings come from the environment (`SEARCH_BACKEND`, `SRC_ENDPOINT`,
//! `SRC_ACCESS_TOKEN`, `ZOEKT_API_URL`, ...; a `.env` file is honored) or
//! from `--config <file.toml>`. Set `RUST_LOG=debug` for verbose logging.

mod args;
mod commands;

use clap::Parser;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli).await
}
