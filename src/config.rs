//! Configuration management for the Alert Console
//!
//! This module defines the `Config` struct, responsible for holding all
//! application settings. It uses the `figment` crate to layer defaults, an
//! `alert-console.toml` file, environment variables and command-line
//! arguments. It also owns the backend URL resolution order.

use crate::cli::Cli;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Used when neither an override nor a saved value names a backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Configuration file read when `--config` is not given. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "alert-console.toml";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Backend base URL injected at startup; wins over the saved value.
    #[serde(default)]
    pub backend_url: Option<String>,
    /// Where values saved between sessions are kept.
    pub state_file: PathBuf,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources, lowest priority first: defaults, the TOML file, environment
    /// variables prefixed `ALERT_CONSOLE_`, command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // e.g. ALERT_CONSOLE_BACKEND_URL=http://10.0.0.5:5000
            .merge(Env::prefixed("ALERT_CONSOLE_"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            backend_url: None,
            state_file: PathBuf::from(".alert-console").join("state.json"),
        }
    }
}

/// Picks the backend URL from `sources`, highest priority first.
///
/// The first non-empty source wins; with none, [`DEFAULT_BACKEND_URL`].
pub fn resolve_backend_url<'a, I>(sources: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    sources
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL)
        .to_string()
}
