//! RSI (Relative Strength Index).
//!
//! Simple moving average of gains and losses over the trailing `period`
//! price changes:
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! If avg_loss == 0, or fewer than `period` changes exist, RSI = 50.

pub const RSI_NEUTRAL: f64 = 50.0;

/// Most recent RSI of `closes` (oldest first).
pub fn calculate_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let mut gains: Vec<f64> = Vec::with_capacity(closes.len() - 1);
    let mut losses: Vec<f64> = Vec::with_capacity(closes.len() - 1);

    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let window_start = gains.len() - period;
    let avg_gain = gains[window_start..].iter().sum::<f64>() / period as f64;
    let avg_loss = losses[window_start..].iter().sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return RSI_NEUTRAL;
    }

    let rsi = 100.0 - (100.0 / (1.0 + avg_gain / avg_loss));
    if rsi.is_finite() { rsi } else { RSI_NEUTRAL }
}
