//! Market data access port trait.

use crate::domain::error::QuoteError;
use crate::domain::price_bar::PriceBar;
use async_trait::async_trait;

/// Descriptive data about an instrument, as far as the provider knows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentMetadata {
    pub name: Option<String>,
    pub recommendation: Option<String>,
}

#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Daily bars for `symbol`, oldest first. Empty when the provider has none.
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<PriceBar>, QuoteError>;

    async fn fetch_metadata(&self, symbol: &str) -> Result<InstrumentMetadata, QuoteError>;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;
}
