//! Quote assembly.
//!
//! A quote is derived fresh from the provider's history and metadata on every
//! request: the last bar supplies the price fields, the closing-price series
//! feeds RSI and MACD, and the upstream recommendation is passed through.

use serde::Serialize;
use tracing::debug;

use crate::domain::error::QuoteError;
use crate::domain::indicator::{
    IndicatorParams, calculate_macd, calculate_rsi, normalize_recommendation,
};
use crate::domain::price_bar::{PriceBar, change_pct, closes};
use crate::domain::symbol_catalog::SymbolCatalog;
use crate::ports::market_data_port::{InstrumentMetadata, MarketDataPort};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Percent change of the last close versus the previous close.
    pub change: f64,
    pub recommendation: String,
    pub rsi: f64,
    pub macd: f64,
}

/// Trim and upper-case a ticker, rejecting anything that is not a plain symbol.
pub fn normalize_symbol(raw: &str) -> Result<String, QuoteError> {
    let symbol = raw.trim().to_uppercase();
    let valid = !symbol.is_empty()
        && symbol.len() <= 32
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_'));
    if !valid {
        return Err(QuoteError::InvalidSymbol {
            symbol: raw.to_string(),
        });
    }
    Ok(symbol)
}

pub fn build_quote(
    symbol: &str,
    bars: &[PriceBar],
    metadata: &InstrumentMetadata,
    fallback_name: Option<&str>,
    params: &IndicatorParams,
) -> Result<Quote, QuoteError> {
    let last = bars.last().ok_or_else(|| QuoteError::NoData {
        symbol: symbol.to_string(),
    })?;

    let prices = closes(bars);
    let rsi = calculate_rsi(&prices, params.rsi_period);
    let macd = calculate_macd(
        &prices,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    )
    .map(|m| m.line)
    .filter(|v| v.is_finite())
    .unwrap_or(0.0);

    let name = metadata
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .or(fallback_name)
        .unwrap_or(symbol)
        .to_string();

    Ok(Quote {
        symbol: symbol.to_string(),
        name,
        open: last.open,
        high: last.high,
        low: last.low,
        close: last.close,
        volume: last.volume,
        change: change_pct(bars),
        recommendation: normalize_recommendation(metadata.recommendation.as_deref()),
        rsi,
        macd,
    })
}

/// Fetch history and metadata for one symbol and assemble its quote.
/// Any failure aborts the whole quote.
pub async fn fetch_quote(
    port: &dyn MarketDataPort,
    catalog: &SymbolCatalog,
    raw_symbol: &str,
    params: &IndicatorParams,
) -> Result<Quote, QuoteError> {
    let symbol = normalize_symbol(raw_symbol)?;

    let bars = port.fetch_history(&symbol).await?;
    if bars.is_empty() {
        return Err(QuoteError::NoData { symbol });
    }
    debug!(
        provider = port.name(),
        symbol = %symbol,
        bars = bars.len(),
        "fetched price history"
    );

    let metadata = port.fetch_metadata(&symbol).await?;
    build_quote(&symbol, &bars, &metadata, catalog.name_for(&symbol), params)
}
