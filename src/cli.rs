//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::market_data_from_settings;
use crate::domain::error::QuoteError;
use crate::domain::quote::fetch_quote;
use crate::domain::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "quoteproxy", about = "Normalized stock quotes with RSI and MACD")]
pub struct Cli {
    /// INI configuration file; built-in defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Override `[server] listen`
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Fetch one quote and print it as JSON
    Quote { symbol: String },
    /// Search the symbol catalog
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Load and validate the configuration
    CheckConfig,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Serve { listen } => run_serve(cli.config.as_deref(), listen),
        Command::Quote { symbol } => run_quote(cli.config.as_deref(), &symbol),
        Command::Search { query, limit } => run_search(cli.config.as_deref(), &query, limit),
        Command::CheckConfig => run_check_config(cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, QuoteError> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| QuoteError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, QuoteError> {
    let adapter = load_config(path)?;
    Settings::from_config(&adapter)
}

fn runtime() -> Result<tokio::runtime::Runtime, QuoteError> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn run_quote(config_path: Option<&Path>, symbol: &str) -> Result<(), QuoteError> {
    let settings = load_settings(config_path)?;
    let catalog = settings.catalog()?;
    let market_data = market_data_from_settings(&settings.provider)?;

    let quote = runtime()?.block_on(fetch_quote(
        market_data.as_ref(),
        &catalog,
        symbol,
        &settings.indicators,
    ))?;

    let json = serde_json::to_string_pretty(&quote).map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(())
}

fn run_search(
    config_path: Option<&Path>,
    query: &str,
    limit: Option<usize>,
) -> Result<(), QuoteError> {
    let settings = load_settings(config_path)?;
    let catalog = settings.catalog()?;
    let results = catalog.search(query, limit.unwrap_or(settings.search.limit));

    let json = serde_json::to_string_pretty(&results).map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(())
}

fn run_check_config(config_path: Option<&Path>) -> Result<(), QuoteError> {
    let settings = load_settings(config_path)?;
    let catalog = settings.catalog()?;

    eprintln!("listen:     {}", settings.server.listen);
    eprintln!("cors:       {}", settings.server.cors);
    eprintln!("provider:   {:?}", settings.provider.kind);
    eprintln!("indicators: {} {}", settings.indicators.rsi(), settings.indicators.macd());
    eprintln!(
        "catalog:    {} symbols ({})",
        catalog.len(),
        settings
            .search
            .catalog_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| settings.search.exchange.to_string())
    );
    eprintln!("\nConfiguration is valid.");
    Ok(())
}

fn run_serve(config_path: Option<&Path>, listen: Option<SocketAddr>) -> Result<(), QuoteError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use std::sync::Arc;

        let settings = load_settings(config_path)?;
        let catalog = settings.catalog()?;
        let market_data = market_data_from_settings(&settings.provider)?;
        let addr = listen.unwrap_or(settings.server.listen);

        let state = AppState {
            market_data,
            catalog: Arc::new(catalog),
            indicators: settings.indicators,
            search_limit: settings.search.limit,
        };
        let router = build_router(state, settings.server.cors);

        runtime()?.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(
                "Starting web server on {} ({:?} provider)",
                addr, settings.provider.kind
            );
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("Server stopped");
            Ok::<(), QuoteError>(())
        })
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (config_path, listen);
        Err(QuoteError::config_invalid(
            "server",
            "listen",
            "web feature is required for serve",
        ))
    }
}

#[cfg(feature = "web")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
