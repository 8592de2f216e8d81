//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9. All three EMAs are seeded
//! with their first input, so a value exists from the first price onward.

use crate::domain::indicator::ema_series;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD at the last index of `prices`. `None` for empty input or a zero span.
pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdValue> {
    if prices.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return None;
    }

    let ema_fast = ema_series(prices, fast);
    let ema_slow = ema_series(prices, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();

    let line = *macd_line.last()?;
    let signal = *ema_series(&macd_line, signal_period).last()?;

    Some(MacdValue {
        line,
        signal,
        histogram: line - signal,
    })
}
