//! Daily price bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Closing prices of a chronological bar series, oldest first.
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Percent change of the last close versus the one before it.
///
/// 0 when fewer than two bars exist or the previous close is 0.
pub fn change_pct(bars: &[PriceBar]) -> f64 {
    match bars {
        [.., prev, last] if prev.close != 0.0 => (last.close - prev.close) / prev.close * 100.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            symbol: "AAPL".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn closes_keeps_order() {
        let bars = vec![bar(1, 10.0), bar(2, 11.0), bar(3, 9.5)];
        assert_eq!(closes(&bars), vec![10.0, 11.0, 9.5]);
    }

    #[test]
    fn change_pct_from_last_two_bars() {
        let bars = vec![bar(1, 50.0), bar(2, 100.0), bar(3, 110.0)];
        assert!((change_pct(&bars) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn change_pct_negative() {
        let bars = vec![bar(1, 200.0), bar(2, 150.0)];
        assert!((change_pct(&bars) + 25.0).abs() < 1e-12);
    }

    #[test]
    fn change_pct_single_bar_is_zero() {
        assert_eq!(change_pct(&[bar(1, 42.0)]), 0.0);
    }

    #[test]
    fn change_pct_empty_is_zero() {
        assert_eq!(change_pct(&[]), 0.0);
    }

    #[test]
    fn change_pct_previous_zero_is_zero() {
        let bars = vec![bar(1, 0.0), bar(2, 5.0)];
        assert_eq!(change_pct(&bars), 0.0);
    }
}
