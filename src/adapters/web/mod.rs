//! Web server adapter.
//!
//! Axum router exposing the quote and search endpoints as JSON. Every
//! response, errors included, is a JSON document.

mod error;
mod handlers;

pub use error::{WebError, status_from_error};
pub use handlers::*;

use axum::{Router, http::Method, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::indicator::IndicatorParams;
use crate::domain::symbol_catalog::SymbolCatalog;
use crate::ports::market_data_port::MarketDataPort;

pub struct AppState {
    pub market_data: Arc<dyn MarketDataPort>,
    pub catalog: Arc<SymbolCatalog>,
    pub indicators: IndicatorParams,
    pub search_limit: usize,
}

pub fn build_router(state: AppState, cors: bool) -> Router {
    let mut router = Router::new()
        .route("/api/stock/{symbol}", get(handlers::stock_quote))
        .route("/api/search", get(handlers::search))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state));

    if cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS]),
        );
    }

    router.layer(TraceLayer::new_for_http())
}
