//! HTTP request handlers for the web adapter.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::error::QuoteError;
use crate::domain::quote::{Quote, fetch_quote};
use crate::domain::symbol_catalog::SymbolEntry;

use super::{AppState, WebError};

pub async fn stock_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, WebError> {
    match fetch_quote(
        state.market_data.as_ref(),
        &state.catalog,
        &symbol,
        &state.indicators,
    )
    .await
    {
        Ok(quote) => Ok(Json(quote)),
        Err(err @ (QuoteError::NoData { .. } | QuoteError::InvalidSymbol { .. })) => {
            info!(symbol = %symbol, "{err}");
            Err(err.into())
        }
        Err(err) => {
            error!(
                symbol = %symbol,
                provider = state.market_data.name(),
                "error fetching quote: {err}"
            );
            Err(err.into())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SymbolEntry>> {
    Json(state.catalog.search(&params.q, state.search_limit))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> WebError {
    WebError::not_found("not found")
}
