//! Command execution

use crate::args::{Cli, Commands};
use anyhow::Context;
use scout_core::config::{load_from_env, load_from_file};
use scout_core::{
    BackendKind, ContentFetcher, ScoutConfig, SearchBackend, create_content_fetcher,
    create_search_client,
};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => load_from_env().context("Failed to load configuration from environment")?,
    };

    match cli.command {
        Commands::Search {
            query,
            limit,
            backend,
        } => {
            override_backend(&mut config, backend)?;
            let limit = limit.unwrap_or(config.output.num_results);
            let client = create_search_client(config.backend, &config.backend_options())?;

            let raw = client.search(&query, limit).await?;
            let results = client.format_results(&raw, limit);
            tracing::info!(results = results.len(), "Search complete");

            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Fetch {
            repo,
            path,
            depth,
            rev,
            backend,
        } => {
            override_backend(&mut config, backend)?;
            let fetcher = create_content_fetcher(config.backend, &config.backend_options())?;

            let content = fetcher.get_content(&repo, &path, depth, &rev).await?;
            println!("{}", content);
        }
    }

    Ok(())
}

fn override_backend(config: &mut ScoutConfig, backend: Option<BackendKind>) -> anyhow::Result<()> {
    if let Some(backend) = backend {
        config.backend = backend;
    }
    config.validate()?;
    Ok(())
}
