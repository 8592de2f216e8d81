//! Yahoo Finance market data adapter.
//!
//! History comes from the public v8 chart endpoint:
//! `GET {base_url}/v8/finance/chart/{symbol}?range=..&interval=..`
//!
//! Metadata comes from the v10 quote summary endpoint:
//! `GET {base_url}/v10/finance/quoteSummary/{symbol}?modules=price,financialData`
//! (`price.longName` / `price.shortName` and `financialData.recommendationKey`).

use crate::domain::error::QuoteError;
use crate::domain::price_bar::PriceBar;
use crate::domain::settings::ProviderSettings;
use crate::ports::market_data_port::{InstrumentMetadata, MarketDataPort};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Quote summary modules requested for metadata.
const SUMMARY_MODULES: &str = "price,financialData";

/// Recommendation key Yahoo reports for instruments without analyst coverage.
const NO_RECOMMENDATION: &str = "none";

#[derive(Debug, Clone)]
pub struct YahooAdapter {
    http: Client,
    base_url: String,
    range: String,
    interval: String,
}

/// `{result, error}` body shared by the chart and quote summary payloads.
#[derive(Debug, Deserialize)]
struct YahooBody<T> {
    result: Option<Vec<T>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    #[serde(default)]
    description: String,
}

trait Envelope: DeserializeOwned {
    type Item;

    fn into_body(self) -> YahooBody<Self::Item>;
    fn error(&self) -> Option<&YahooError>;
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: YahooBody<ChartResult>,
}

impl Envelope for ChartEnvelope {
    type Item = ChartResult;

    fn into_body(self) -> YahooBody<ChartResult> {
        self.chart
    }

    fn error(&self) -> Option<&YahooError> {
        self.chart.error.as_ref()
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: YahooBody<SummaryResult>,
}

impl Envelope for SummaryEnvelope {
    type Item = SummaryResult;

    fn into_body(self) -> YahooBody<SummaryResult> {
        self.quote_summary
    }

    fn error(&self) -> Option<&YahooError> {
        self.quote_summary.error.as_ref()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: SummaryPrice,
    #[serde(default)]
    financial_data: SummaryFinancialData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPrice {
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryFinancialData {
    recommendation_key: Option<String>,
}

impl YahooAdapter {
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(&settings.user_agent)
            .build()
            .map_err(|e| QuoteError::Upstream {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            range: settings.range.clone(),
            interval: settings.interval.clone(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }

    fn summary_url(&self, symbol: &str) -> String {
        format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol)
    }

    async fn get<E: Envelope>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<E::Item>, QuoteError> {
        debug!(url = %url, ?query, "requesting");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| QuoteError::Upstream {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| QuoteError::Upstream {
            reason: e.to_string(),
        })?;

        decode::<E>(status, &body)
    }
}

/// Interpret a Yahoo response. `Ok(None)` means the provider has no data.
fn decode<E: Envelope>(status: StatusCode, body: &str) -> Result<Option<E::Item>, QuoteError> {
    let envelope = serde_json::from_str::<E>(body);

    if !status.is_success() {
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let description = envelope
            .as_ref()
            .ok()
            .and_then(|e| e.error())
            .map(|e| e.description.clone());
        warn!(status = status.as_u16(), "request rejected");
        return Err(QuoteError::UpstreamStatus {
            status: status.as_u16(),
            reason: description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
        });
    }

    let body = envelope
        .map_err(|e| QuoteError::Parse {
            reason: e.to_string(),
        })?
        .into_body();

    if let Some(err) = body.error {
        if err.code.eq_ignore_ascii_case("Not Found") {
            return Ok(None);
        }
        return Err(QuoteError::Upstream {
            reason: format!("{}: {}", err.code, err.description),
        });
    }

    Ok(body.result.and_then(|r| r.into_iter().next()))
}

/// Zip the parallel chart arrays into bars, skipping rows with missing prices.
fn chart_to_bars(symbol: &str, chart: &ChartResult) -> Vec<PriceBar> {
    let empty = ChartQuote::default();
    let quote = chart.indicators.quote.first().unwrap_or(&empty);
    let at = |v: &Vec<Option<f64>>, i: usize| v.get(i).copied().flatten();

    let mut bars: Vec<PriceBar> = chart
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            Some(PriceBar {
                symbol: symbol.to_string(),
                date,
                open: at(&quote.open, i)?,
                high: at(&quote.high, i)?,
                low: at(&quote.low, i)?,
                close: at(&quote.close, i)?,
                volume: at(&quote.volume, i).unwrap_or(0.0) as i64,
            })
        })
        .collect();

    bars.sort_by_key(|b| b.date);
    bars
}

fn summary_metadata(summary: SummaryResult) -> InstrumentMetadata {
    InstrumentMetadata {
        name: summary.price.long_name.or(summary.price.short_name),
        recommendation: summary
            .financial_data
            .recommendation_key
            .filter(|key| !key.trim().eq_ignore_ascii_case(NO_RECOMMENDATION)),
    }
}

#[async_trait]
impl MarketDataPort for YahooAdapter {
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<PriceBar>, QuoteError> {
        let query = [
            ("range", self.range.as_str()),
            ("interval", self.interval.as_str()),
        ];
        match self
            .get::<ChartEnvelope>(&self.chart_url(symbol), &query)
            .await?
        {
            Some(chart) => Ok(chart_to_bars(symbol, &chart)),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_metadata(&self, symbol: &str) -> Result<InstrumentMetadata, QuoteError> {
        Ok(self
            .get::<SummaryEnvelope>(&self.summary_url(symbol), &[("modules", SUMMARY_MODULES)])
            .await?
            .map(summary_metadata)
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}
