//! HTTP error responses for the web adapter.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::QuoteError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

pub fn status_from_error(err: &QuoteError) -> StatusCode {
    match err {
        QuoteError::NoData { .. } => StatusCode::NOT_FOUND,
        QuoteError::InvalidSymbol { .. } => StatusCode::BAD_REQUEST,
        QuoteError::Upstream { .. }
        | QuoteError::UpstreamStatus { .. }
        | QuoteError::Parse { .. }
        | QuoteError::ConfigParse { .. }
        | QuoteError::ConfigInvalid { .. }
        | QuoteError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<QuoteError> for WebError {
    fn from(err: QuoteError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
