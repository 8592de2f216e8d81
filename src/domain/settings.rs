//! Typed service settings built from the config port.
//!
//! Every key has a default so the service runs without a config file.
//! Validation happens once here; the rest of the crate trusts the result.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::error::QuoteError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::symbol_catalog::{DEFAULT_SEARCH_LIMIT, Exchange, SymbolCatalog};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_RANGE: &str = "6mo";
pub const DEFAULT_INTERVAL: &str = "1d";
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; quoteproxy/0.1)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Csv,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(ProviderKind::Yahoo),
            "csv" => Ok(ProviderKind::Csv),
            other => Err(format!("unknown provider {other:?} (expected yahoo or csv)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub listen: SocketAddr,
    pub cors: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: String,
    pub range: String,
    pub interval: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub exchange: Exchange,
    pub catalog_file: Option<PathBuf>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub indicators: IndicatorParams,
    pub search: SearchSettings,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, QuoteError> {
        Ok(Self {
            server: build_server(config)?,
            provider: build_provider(config)?,
            indicators: build_indicators(config)?,
            search: build_search(config)?,
        })
    }

    /// The catalog file when one is configured, else the built-in exchange table.
    pub fn catalog(&self) -> Result<SymbolCatalog, QuoteError> {
        match &self.search.catalog_file {
            Some(path) => SymbolCatalog::from_csv_file(path),
            None => Ok(SymbolCatalog::builtin(self.search.exchange)),
        }
    }
}

fn non_blank(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<usize, QuoteError> {
    let value = config.get_int(section, key, default);
    if value <= 0 {
        return Err(QuoteError::config_invalid(
            section,
            key,
            format!("{key} must be positive"),
        ));
    }
    Ok(value as usize)
}

fn build_server(config: &dyn ConfigPort) -> Result<ServerSettings, QuoteError> {
    let listen_str =
        non_blank(config, "server", "listen").unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    let listen = listen_str.parse::<SocketAddr>().map_err(|_| {
        QuoteError::config_invalid(
            "server",
            "listen",
            format!("invalid socket address {listen_str:?}"),
        )
    })?;
    Ok(ServerSettings {
        listen,
        cors: config.get_bool("server", "cors", true),
    })
}

fn build_provider(config: &dyn ConfigPort) -> Result<ProviderSettings, QuoteError> {
    let kind = match non_blank(config, "provider", "kind") {
        Some(k) => k
            .parse::<ProviderKind>()
            .map_err(|reason| QuoteError::config_invalid("provider", "kind", reason))?,
        None => ProviderKind::Yahoo,
    };

    let data_dir = non_blank(config, "provider", "data_dir").map(PathBuf::from);
    if kind == ProviderKind::Csv && data_dir.is_none() {
        return Err(QuoteError::config_invalid(
            "provider",
            "data_dir",
            "data_dir is required for the csv provider",
        ));
    }

    let base_url = non_blank(config, "provider", "base_url")
        .unwrap_or_else(|| DEFAULT_YAHOO_BASE_URL.to_string());
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(QuoteError::config_invalid(
            "provider",
            "base_url",
            "base_url must start with http:// or https://",
        ));
    }

    Ok(ProviderSettings {
        kind,
        base_url: base_url.trim_end_matches('/').to_string(),
        range: non_blank(config, "provider", "range").unwrap_or_else(|| DEFAULT_RANGE.to_string()),
        interval: non_blank(config, "provider", "interval")
            .unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
        timeout_secs: positive(config, "provider", "timeout_secs", DEFAULT_TIMEOUT_SECS)? as u64,
        user_agent: non_blank(config, "provider", "user_agent")
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        data_dir,
    })
}

fn build_indicators(config: &dyn ConfigPort) -> Result<IndicatorParams, QuoteError> {
    let defaults = IndicatorParams::default();
    let params = IndicatorParams {
        rsi_period: positive(config, "indicators", "rsi_period", defaults.rsi_period as i64)?,
        macd_fast: positive(config, "indicators", "macd_fast", defaults.macd_fast as i64)?,
        macd_slow: positive(config, "indicators", "macd_slow", defaults.macd_slow as i64)?,
        macd_signal: positive(config, "indicators", "macd_signal", defaults.macd_signal as i64)?,
    };
    if params.macd_fast >= params.macd_slow {
        return Err(QuoteError::config_invalid(
            "indicators",
            "macd_fast",
            "macd_fast must be less than macd_slow",
        ));
    }
    Ok(params)
}

fn build_search(config: &dyn ConfigPort) -> Result<SearchSettings, QuoteError> {
    let exchange = match non_blank(config, "search", "exchange") {
        Some(e) => e
            .parse::<Exchange>()
            .map_err(|reason| QuoteError::config_invalid("search", "exchange", reason))?,
        None => Exchange::Nasdaq,
    };
    Ok(SearchSettings {
        exchange,
        catalog_file: non_blank(config, "search", "catalog_file").map(PathBuf::from),
        limit: positive(config, "search", "limit", DEFAULT_SEARCH_LIMIT as i64)?,
    })
}
