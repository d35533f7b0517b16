use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::esplora::client::DEFAULT_ENDPOINT;
use crate::report::DEFAULT_TOP;

pub const SETTINGS_FILE: &str = "Settings.toml";
pub const DEFAULT_BLOCK_HEIGHT: u64 = 680000;
pub const DEFAULT_START_INDEX: u64 = 100;

/// Run parameters. Loaded from defaults, then `Settings.toml` (or an explicit
/// path), then `ANCESTRY_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub endpoint: String,
    pub block_height: u64,
    pub start_index: u64,
    pub top: usize,
}

impl Settings {
    /// Load settings. Without an explicit path a missing `Settings.toml` is
    /// fine; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        Self::defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix("ANCESTRY"))
            .build()?
            .try_deserialize()
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml_str, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("block_height", DEFAULT_BLOCK_HEIGHT)?
            .set_default("start_index", DEFAULT_START_INDEX)?
            .set_default("top", DEFAULT_TOP as u64)
    }
}
