//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `alert-console.toml` file and environment variables.

use clap::{Parser, Subcommand};
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Operator console for listing subscribers and broadcasting alerts.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the alert backend. Takes priority over the saved value.
    #[arg(short, long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Path to the file holding values saved between sessions.
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Logging level (e.g. "info", "debug", or a full filter directive).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive console (the default).
    Console,
    /// Fetch and print the subscriber list once.
    List,
    /// Broadcast a single message to all subscribers.
    Send {
        /// The alert text.
        message: String,
    },
    /// Save a backend URL for future sessions.
    SetBackend {
        /// The backend base URL, e.g. http://localhost:5000
        url: String,
    },
    /// Forget the saved backend URL.
    ClearBackend,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Console)
    }
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(url) = &self.backend_url {
            dict.insert("backend_url".into(), Value::from(url.clone()));
        }

        if let Some(path) = &self.state_file {
            dict.insert(
                "state_file".into(),
                Value::from(path.to_string_lossy().into_owned()),
            );
        }

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
