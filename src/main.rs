use clap::Parser;
use quoteproxy::cli::{Cli, run};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "quoteproxy=info,tower_http=info";

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
