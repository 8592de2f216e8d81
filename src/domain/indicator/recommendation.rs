//! Upstream recommendation passthrough.

pub const NEUTRAL: &str = "NEUTRAL";

/// Upper-cases a present, non-blank upstream code; anything else is `NEUTRAL`.
pub fn normalize_recommendation(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_uppercase(),
        _ => NEUTRAL.to_string(),
    }
}
