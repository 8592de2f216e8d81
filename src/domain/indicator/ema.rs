//! Exponential Moving Average.
//!
//! k = 2/(span+1), seeded with the first price, then EMA[i] = P[i]*k + EMA[i-1]*(1-k).
//! Every index carries a value; a single price is its own EMA.

/// Full EMA series of `prices`. Empty when `prices` is empty or `span` is 0.
pub fn ema_series(prices: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || prices.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut values = Vec::with_capacity(prices.len());
    let mut ema = prices[0];
    values.push(ema);

    for &price in &prices[1..] {
        ema = price * k + ema * (1.0 - k);
        values.push(ema);
    }

    values
}

/// EMA at the last index of `prices`.
pub fn calculate_ema(prices: &[f64], span: usize) -> Option<f64> {
    ema_series(prices, span).last().copied()
}
