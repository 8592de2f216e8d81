//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
#[cfg(feature = "web")]
pub mod web;
pub mod yahoo_adapter;

use std::sync::Arc;

use crate::domain::error::QuoteError;
use crate::domain::settings::{ProviderKind, ProviderSettings};
use crate::ports::market_data_port::MarketDataPort;

use csv_adapter::CsvAdapter;
use yahoo_adapter::YahooAdapter;

/// Build the market data adapter selected by `[provider] kind`.
pub fn market_data_from_settings(
    settings: &ProviderSettings,
) -> Result<Arc<dyn MarketDataPort>, QuoteError> {
    match settings.kind {
        ProviderKind::Yahoo => Ok(Arc::new(YahooAdapter::from_settings(settings)?)),
        ProviderKind::Csv => {
            let dir = settings.data_dir.clone().ok_or_else(|| {
                QuoteError::config_invalid(
                    "provider",
                    "data_dir",
                    "data_dir is required for the csv provider",
                )
            })?;
            Ok(Arc::new(CsvAdapter::new(dir)))
        }
    }
}
