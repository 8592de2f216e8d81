#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use quoteproxy::domain::error::QuoteError;
pub use quoteproxy::domain::price_bar::PriceBar;
use quoteproxy::ports::market_data_port::{InstrumentMetadata, MarketDataPort};
use std::collections::HashMap;

pub struct MockMarketDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub metadata: HashMap<String, InstrumentMetadata>,
    pub errors: HashMap<String, String>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            metadata: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_metadata(
        mut self,
        symbol: &str,
        name: Option<&str>,
        recommendation: Option<&str>,
    ) -> Self {
        self.metadata.insert(
            symbol.to_string(),
            InstrumentMetadata {
                name: name.map(str::to_string),
                recommendation: recommendation.map(str::to_string),
            },
        );
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

#[async_trait]
impl MarketDataPort for MockMarketDataPort {
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<PriceBar>, QuoteError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuoteError::Upstream {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    async fn fetch_metadata(&self, symbol: &str) -> Result<InstrumentMetadata, QuoteError> {
        Ok(self.metadata.get(symbol).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

pub fn make_bar(symbol: &str, date: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        symbol: symbol.to_string(),
        date,
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000_000,
    }
}

/// Bars from a list of closes, one per calendar day starting 2024-01-01.
pub fn bars_from_closes(symbol: &str, closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(symbol, start + chrono::Days::new(i as u64), close))
        .collect()
}

/// A deterministic zig-zag series with an upward drift.
pub fn generate_bars(symbol: &str, count: usize, base_price: f64) -> Vec<PriceBar> {
    let closes: Vec<f64> = (0..count)
        .map(|i| base_price + i as f64 * 0.5 + if i % 3 == 0 { -1.5 } else { 1.0 })
        .collect();
    bars_from_closes(symbol, &closes)
}
