//! CSV file market data adapter.
//!
//! History lives in `<dir>/<SYMBOL>.csv` with a `date,open,high,low,close,volume`
//! header. Instrument metadata is optional and read from `<dir>/metadata.csv`
//! (`symbol,name,recommendation`).

use crate::domain::error::QuoteError;
use crate::domain::price_bar::PriceBar;
use crate::ports::market_data_port::{InstrumentMetadata, MarketDataPort};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub const METADATA_FILE: &str = "metadata.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct MetadataRow {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    recommendation: Option<String>,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// File contents, or `None` when the file does not exist.
    fn read_optional(path: &PathBuf) -> Result<Option<String>, QuoteError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuoteError::Upstream {
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    fn parse_bars(symbol: &str, content: &str) -> Result<Vec<PriceBar>, QuoteError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuoteError::Parse {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                QuoteError::Parse {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(PriceBar {
                symbol: symbol.to_string(),
                date,
                open: number(&record, 1, "open")?,
                high: number(&record, 2, "high")?,
                low: number(&record, 3, "low")?,
                close: number(&record, 4, "close")?,
                volume: number(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn parse_metadata(symbol: &str, content: &str) -> Result<InstrumentMetadata, QuoteError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        for row in rdr.deserialize::<MetadataRow>() {
            let row = row.map_err(|e| QuoteError::Parse {
                reason: format!("metadata parse error: {}", e),
            })?;
            if row.symbol.eq_ignore_ascii_case(symbol) {
                return Ok(InstrumentMetadata {
                    name: row.name.filter(|n| !n.is_empty()),
                    recommendation: row.recommendation.filter(|r| !r.is_empty()),
                });
            }
        }

        Ok(InstrumentMetadata::default())
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, name: &str) -> Result<&'r str, QuoteError> {
    record.get(idx).ok_or_else(|| QuoteError::Parse {
        reason: format!("missing {} column", name),
    })
}

fn number<T>(record: &StringRecord, idx: usize, name: &str) -> Result<T, QuoteError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    field(record, idx, name)?
        .trim()
        .parse()
        .map_err(|e| QuoteError::Parse {
            reason: format!("invalid {} value: {}", name, e),
        })
}

#[async_trait]
impl MarketDataPort for CsvAdapter {
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<PriceBar>, QuoteError> {
        let path = self.csv_path(symbol);
        match Self::read_optional(&path)? {
            Some(content) => Self::parse_bars(symbol, &content),
            None => {
                debug!(path = %path.display(), "no history file");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_metadata(&self, symbol: &str) -> Result<InstrumentMetadata, QuoteError> {
        match Self::read_optional(&self.base_path.join(METADATA_FILE))? {
            Some(content) => Self::parse_metadata(symbol, &content),
            None => Ok(InstrumentMetadata::default()),
        }
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}
