//! Technical indicator calculations over a closing-price series.
//!
//! Every function here is a pure function of its input: identical price
//! sequences produce identical outputs and nothing is carried between calls.
//! - `calculate_rsi`: trailing-window RSI, neutral 50 when undefined
//! - `calculate_ema` / `ema_series`: recursive EMA seeded with the first price
//! - `calculate_macd`: fast EMA minus slow EMA, plus signal line and histogram
//! - `normalize_recommendation`: upstream recommendation passthrough

pub mod ema;
pub mod macd;
pub mod recommendation;
pub mod rsi;

pub use ema::{calculate_ema, ema_series};
pub use macd::{MacdValue, calculate_macd};
pub use recommendation::{NEUTRAL, normalize_recommendation};
pub use rsi::{RSI_NEUTRAL, calculate_rsi};

use std::fmt;

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

/// Periods used when computing the indicators of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
        }
    }
}

impl IndicatorParams {
    pub fn rsi(&self) -> IndicatorType {
        IndicatorType::Rsi(self.rsi_period)
    }

    pub fn macd(&self) -> IndicatorType {
        IndicatorType::Macd {
            fast: self.macd_fast,
            slow: self.macd_slow,
            signal: self.macd_signal,
        }
    }
}
