//! Searchable table of known tickers.
//!
//! The built-in tables are plain data; a catalog can also be loaded from a
//! `symbol,name` CSV file so exchange coverage changes without touching code.

use crate::domain::error::QuoteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub name: String,
}

const NASDAQ: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("AMZN", "Amazon.com Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla, Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("AMD", "Advanced Micro Devices"),
    ("INTC", "Intel Corporation"),
    ("ORCL", "Oracle Corporation"),
    ("CSCO", "Cisco Systems Inc."),
    ("ADBE", "Adobe Inc."),
    ("NFLX", "Netflix Inc."),
    ("PYPL", "PayPal Holdings Inc."),
];

const PARIS: &[(&str, &str)] = &[
    ("MC.PA", "LVMH Moet Hennessy Louis Vuitton"),
    ("OR.PA", "L'Oreal"),
    ("RMS.PA", "Hermes International"),
    ("TTE.PA", "TotalEnergies SE"),
    ("SAN.PA", "Sanofi"),
    ("AIR.PA", "Airbus SE"),
    ("SU.PA", "Schneider Electric SE"),
    ("AI.PA", "Air Liquide"),
    ("BNP.PA", "BNP Paribas"),
    ("EL.PA", "EssilorLuxottica"),
    ("DG.PA", "Vinci SA"),
    ("KER.PA", "Kering"),
    ("CAP.PA", "Capgemini SE"),
    ("GLE.PA", "Societe Generale"),
];

/// Built-in exchange tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Nasdaq,
    Paris,
}

impl Exchange {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Exchange::Nasdaq => NASDAQ,
            Exchange::Paris => PARIS,
        }
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NASDAQ" => Ok(Exchange::Nasdaq),
            "PARIS" | "EURONEXT" | "EPA" => Ok(Exchange::Paris),
            other => Err(format!("unknown exchange {other:?} (expected NASDAQ or PARIS)")),
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Nasdaq => write!(f, "NASDAQ"),
            Exchange::Paris => write!(f, "PARIS"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    entries: Vec<SymbolEntry>,
}

impl SymbolCatalog {
    pub fn builtin(exchange: Exchange) -> Self {
        let entries = exchange
            .table()
            .iter()
            .map(|(symbol, name)| SymbolEntry {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Load a catalog from a headed `symbol,name` CSV file.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content).map_err(|reason| QuoteError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })
    }

    pub fn from_csv_str(content: &str) -> Result<Self, String> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut entries = Vec::new();
        for record in rdr.deserialize::<SymbolEntry>() {
            let entry = record.map_err(|e| format!("CSV parse error: {}", e))?;
            if entry.symbol.is_empty() {
                return Err("empty symbol in catalog".to_string());
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring match on symbol or name, list order kept.
    /// A blank query returns the first `limit` entries.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SymbolEntry> {
        let query = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                query.is_empty()
                    || e.symbol.to_lowercase().contains(&query)
                    || e.name.to_lowercase().contains(&query)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn name_for(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
            .map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(entries: &[SymbolEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_first_ten_in_order() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        let results = catalog.search("", DEFAULT_SEARCH_LIMIT);
        assert_eq!(results.len(), 10);
        assert_eq!(results.as_slice(), &catalog.entries()[..10]);
    }

    #[test]
    fn whitespace_query_treated_as_empty() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        assert_eq!(catalog.search("   ", 10).len(), 10);
    }

    #[test]
    fn unmatched_query_is_empty() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        assert!(catalog.search("zzzzzz", 10).is_empty());
    }

    #[test]
    fn matches_symbol_case_insensitive() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        assert_eq!(symbols(&catalog.search("aapl", 10)), vec!["AAPL"]);
    }

    #[test]
    fn matches_name_substring() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        // "Corporation" appears in several names; list order is kept.
        assert_eq!(
            symbols(&catalog.search("corporation", 10)),
            vec!["MSFT", "NVDA", "INTC", "ORCL"]
        );
    }

    #[test]
    fn matches_either_field() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        // "am" hits AMZN, AMD by symbol and "Amazon.com" by name.
        assert_eq!(symbols(&catalog.search("am", 10)), vec!["AMZN", "AMD"]);
    }

    #[test]
    fn limit_caps_results() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        assert_eq!(catalog.search("inc", 2).len(), 2);
    }

    #[test]
    fn nasdaq_has_no_duplicate_symbols() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        let mut seen = std::collections::HashSet::new();
        for e in catalog.entries() {
            assert!(seen.insert(e.symbol.clone()), "duplicate {}", e.symbol);
        }
    }

    #[test]
    fn paris_table_searchable() {
        let catalog = SymbolCatalog::builtin(Exchange::Paris);
        assert_eq!(symbols(&catalog.search("airbus", 10)), vec!["AIR.PA"]);
    }

    #[test]
    fn name_for_is_case_insensitive() {
        let catalog = SymbolCatalog::builtin(Exchange::Nasdaq);
        assert_eq!(catalog.name_for("msft"), Some("Microsoft Corporation"));
        assert_eq!(catalog.name_for("NOPE"), None);
    }

    #[test]
    fn exchange_from_str() {
        assert_eq!("nasdaq".parse::<Exchange>(), Ok(Exchange::Nasdaq));
        assert_eq!("Paris".parse::<Exchange>(), Ok(Exchange::Paris));
        assert!("LSE".parse::<Exchange>().is_err());
    }

    #[test]
    fn from_csv_str_loads_entries() {
        let catalog =
            SymbolCatalog::from_csv_str("symbol,name\nVOD.L, Vodafone Group\nBP.L,BP p.l.c.\n")
                .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name_for("VOD.L"), Some("Vodafone Group"));
    }

    #[test]
    fn from_csv_str_rejects_missing_column() {
        assert!(SymbolCatalog::from_csv_str("symbol\nVOD.L\n").is_err());
    }

    #[test]
    fn from_csv_file_missing_is_io_error() {
        let err = SymbolCatalog::from_csv_file("/nonexistent/catalog.csv").unwrap_err();
        assert!(matches!(err, QuoteError::Io(_)));
    }
}
