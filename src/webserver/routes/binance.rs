//! Binance proxy endpoints
//!
//! Both endpoints sit behind the stale-fallback cache: a failed upstream
//! call is answered from the last good value while it is inside the
//! endpoint's fallback window, with the same success headers as fresh data.

use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::apis::binance::{build_pair_map, build_price_map};
use crate::cache::with_stale_fallback;
use crate::logger::{self, LogTag};
use crate::webserver::{
    state::AppState,
    utils::{cached_response, upstream_error_response},
};

/// Pairs change rarely; revalidate hourly, fall back for up to 6 hours
const PAIRS_MAX_AGE_SECS: u32 = 3600;
const PAIRS_SWR_SECS: u32 = 86400;
const PAIRS_FALLBACK_MS: i64 = 6 * 60 * 60 * 1000;

/// Prices are hot; revalidate every 30s, fall back for up to 5 minutes
const PRICES_MAX_AGE_SECS: u32 = 30;
const PRICES_SWR_SECS: u32 = 120;
const PRICES_FALLBACK_MS: i64 = 5 * 60 * 1000;

const DEFAULT_QUOTE: &str = "USDT";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pairs", get(get_pairs))
        .route("/prices", get(get_prices))
}

#[derive(Debug, Deserialize)]
struct PricesQuery {
    quote: Option<String>,
}

/// Base-asset to quote-assets map of actively tradeable symbols
async fn get_pairs(State(state): State<Arc<AppState>>) -> Response {
    let binance = &state.binance;
    let result = with_stale_fallback(&state.pairs_cache, "", PAIRS_FALLBACK_MS, || async move {
        let info = binance.fetch_exchange_info().await?;
        Ok(build_pair_map(info))
    })
    .await;

    match result {
        Ok(map) => cached_response(map, PAIRS_MAX_AGE_SECS, PAIRS_SWR_SECS),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Binance pairs fetch failed: {}", e));
            upstream_error_response(&e, "Failed to fetch Binance pairs.")
        }
    }
}

/// Symbol to numeric price map for one quote asset (default USDT)
async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PricesQuery>,
) -> Response {
    let quote = query
        .quote
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .unwrap_or(DEFAULT_QUOTE)
        .to_uppercase();

    let binance = &state.binance;
    let quote = quote.as_str();
    let result = with_stale_fallback(&state.prices_cache, quote, PRICES_FALLBACK_MS, || async move {
        let prices = binance.fetch_ticker_prices().await?;
        Ok(build_price_map(prices, quote))
    })
    .await;

    match result {
        Ok(map) => cached_response(map, PRICES_MAX_AGE_SECS, PRICES_SWR_SECS),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Binance prices fetch failed: {}", e));
            upstream_error_response(&e, "Failed to fetch Binance prices.")
        }
    }
}
