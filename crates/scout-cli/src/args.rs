//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use scout_core::BackendKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "Scout - code search and repository context for agents")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (defaults to environment variables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search code and print formatted results as JSON
    Search {
        /// Query in the backend's syntax
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Override the configured backend (sourcegraph or zoekt)
        #[arg(short, long)]
        backend: Option<BackendKind>,
    },

    /// Print a file, or a directory listing
    Fetch {
        /// Repository, e.g. github.com/org/repo
        repo: String,

        /// Path inside the repository; empty lists the root
        #[arg(default_value = "")]
        path: String,

        /// Directory listing depth
        #[arg(short, long, default_value_t = scout_core::search::DEFAULT_TREE_DEPTH)]
        depth: usize,

        /// Branch, tag, or commit
        #[arg(short, long, default_value = scout_core::search::DEFAULT_REV)]
        rev: String,

        /// Override the configured backend (sourcegraph or zoekt)
        #[arg(short, long)]
        backend: Option<BackendKind>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["scout", "search", "lang:rust tokio", "--limit", "5", "-b", "zoekt"]);
        match cli.command {
            Commands::Search { query, limit, backend } => {
                assert_eq!(query, "lang:rust tokio");
                assert_eq!(limit, Some(5));
                assert_eq!(backend, Some(BackendKind::Zoekt));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_fetch_defaults() {
        let cli = Cli::parse_from(["scout", "--config", "scout.toml", "fetch", "github.com/a/b"]);
        assert_eq!(cli.config, Some(PathBuf::from("scout.toml")));
        match cli.command {
            Commands::Fetch { repo, path, depth, rev, backend } => {
                assert_eq!(repo, "github.com/a/b");
                assert_eq!(path, "");
                assert_eq!(depth, 2);
                assert_eq!(rev, "HEAD");
                assert_eq!(backend, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["scout", "search", "q", "--backend", "grep"]).is_err());
    }
}
