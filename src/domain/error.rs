//! Domain error types.

/// Top-level error type for quoteproxy.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("invalid symbol: {symbol:?}")]
    InvalidSymbol { symbol: String },

    #[error("upstream request failed: {reason}")]
    Upstream { reason: String },

    #[error("upstream returned {status}: {reason}")]
    UpstreamStatus { status: u16, reason: String },

    #[error("malformed upstream payload: {reason}")]
    Parse { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        QuoteError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&QuoteError> for std::process::ExitCode {
    fn from(err: &QuoteError) -> Self {
        let code: u8 = match err {
            QuoteError::Io(_) => 1,
            QuoteError::ConfigParse { .. } | QuoteError::ConfigInvalid { .. } => 2,
            QuoteError::Upstream { .. }
            | QuoteError::UpstreamStatus { .. }
            | QuoteError::Parse { .. } => 3,
            QuoteError::InvalidSymbol { .. } => 4,
            QuoteError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_message_names_symbol() {
        let err = QuoteError::NoData {
            symbol: "ZZZZ".into(),
        };
        assert_eq!(err.to_string(), "no data for ZZZZ");
    }

    #[test]
    fn config_invalid_message() {
        let err = QuoteError::config_invalid("indicators", "rsi_period", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid config value [indicators] rsi_period: must be positive"
        );
    }

    #[test]
    fn upstream_status_message() {
        let err = QuoteError::UpstreamStatus {
            status: 429,
            reason: "Too Many Requests".into(),
        };
        assert_eq!(err.to_string(), "upstream returned 429: Too Many Requests");
    }
}
