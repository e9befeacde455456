//! Alert Console
//!
//! Terminal front-end for listing subscribers and broadcasting alerts through
//! the alert backend.

use alert_console::{
    app::App,
    cli::{Cli, Command},
    config::{resolve_backend_url, Config},
    store::{LocalStore, BACKEND_URL_KEY},
};
use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(filter: &str) {
    // Logs go to stderr so they never interleave with the console's output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        init_logging("info");
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    init_logging(&config.log_level);

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!(
        "Backend Override: {}",
        config.backend_url.as_deref().unwrap_or("Not configured")
    );
    info!("State File: {}", config.state_file.display());
    info!("-------------------------------------------------------");

    // An unreadable state file counts as "nothing saved"; set-backend and
    // clear-backend overwrite it.
    let mut store = LocalStore::open_or_empty(&config.state_file);

    let command = cli.command();
    match &command {
        Command::SetBackend { url } => {
            store.set(BACKEND_URL_KEY, url.as_str());
            store.save()?;
            info!(url = %url, "Saved backend URL");
            println!("Saved backend URL {} to {}", url, store.path().display());
            return Ok(());
        }
        Command::ClearBackend => {
            store.remove(BACKEND_URL_KEY);
            store.save()?;
            println!("Cleared saved backend URL in {}", store.path().display());
            return Ok(());
        }
        _ => {}
    }

    // Resolved once; every request below uses this prefix.
    let backend_url = resolve_backend_url([config.backend_url.as_deref(), store.get(BACKEND_URL_KEY)]);
    info!("Backend URL: {}", backend_url);

    let app = App::builder(backend_url).build();
    match command {
        Command::List => app.list().await,
        Command::Send { message } => app.send(&message).await,
        Command::Console => {
            println!("Type 'help' for commands.");
            app.run_console(BufReader::new(tokio::io::stdin())).await
        }
        Command::SetBackend { .. } | Command::ClearBackend => Ok(()),
    }
}
