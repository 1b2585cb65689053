//! Configuration management
//!
//! Settings come from environment variables (a `.env` file is honored) or
//! from a TOML file. Both produce the same [`ScoutConfig`].

pub mod env_loader;
pub mod file_loader;
pub mod model;

pub use env_loader::{load_from_env, load_from_lookup};
pub use file_loader::load_from_file;
pub use model::{LimitsConfig, OutputConfig, ScoutConfig, SourcegraphConfig, ZoektConfig};
