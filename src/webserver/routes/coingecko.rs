//! CoinGecko proxy endpoints
//!
//! Market listings and favorites sit behind the stale-fallback cache,
//! keyed by their distinguishing query parameter. Categories, coin detail
//! and chart are thin pass-throughs with cache headers only.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::cache::with_stale_fallback;
use crate::logger::{self, LogTag};
use crate::webserver::{
    state::AppState,
    utils::{cached_response, error_response, upstream_error_response},
};

/// Listings and favorites: revalidate every minute, 5 minute fallback
const MARKETS_MAX_AGE_SECS: u32 = 60;
const MARKETS_SWR_SECS: u32 = 300;
const MARKETS_FALLBACK_MS: i64 = 5 * 60 * 1000;

/// Category list is near-static
const CATEGORIES_MAX_AGE_SECS: u32 = 3600;
const CATEGORIES_SWR_SECS: u32 = 86400;

/// Coin detail and chart
const COIN_MAX_AGE_SECS: u32 = 120;
const COIN_SWR_SECS: u32 = 300;

#[derive(Debug, Deserialize)]
pub struct MarketsQuery {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    ids: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoinQuery {
    id: Option<String>,
    days: Option<String>,
}

/// Market listing, optionally filtered by category
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> Response {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let key = category.unwrap_or("");

    let coingecko = &state.coingecko;
    let result = with_stale_fallback(&state.markets_cache, key, MARKETS_FALLBACK_MS, || async move {
        coingecko.fetch_markets(category).await
    })
    .await;

    match result {
        Ok(coins) => cached_response(coins, MARKETS_MAX_AGE_SECS, MARKETS_SWR_SECS),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Market listing fetch failed: {}", e));
            upstream_error_response(&e, "Failed to fetch prices.")
        }
    }
}

/// Market coin objects for an explicit list of coin ids
pub async fn get_favorites(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FavoritesQuery>,
) -> Response {
    let ids = query.ids.as_deref().map(str::trim).unwrap_or("");
    if ids.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing ids query param.");
    }

    // keyed by the literal ids string: different favorite sets cache
    // independently
    let coingecko = &state.coingecko;
    let result = with_stale_fallback(&state.favorites_cache, ids, MARKETS_FALLBACK_MS, || async move {
        coingecko.fetch_markets_by_ids(ids).await
    })
    .await;

    match result {
        Ok(coins) => cached_response(coins, MARKETS_MAX_AGE_SECS, MARKETS_SWR_SECS),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Favorites fetch failed: {}", e));
            upstream_error_response(&e, "Failed to fetch favorites.")
        }
    }
}

/// Category id/name list (pass-through, no fallback cache)
pub async fn get_categories(State(state): State<Arc<AppState>>) -> Response {
    match state.coingecko.fetch_categories().await {
        Ok(categories) => {
            cached_response(categories, CATEGORIES_MAX_AGE_SECS, CATEGORIES_SWR_SECS)
        }
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Categories fetch failed: {}", e));
            upstream_error_response(&e, "Failed to fetch categories.")
        }
    }
}

/// Raw coin detail object (pass-through)
pub async fn get_coin(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoinQuery>,
) -> Response {
    let id = query.id.as_deref().map(str::trim).unwrap_or("");
    if id.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing id.");
    }

    match state.coingecko.fetch_coin(id).await {
        Ok(coin) => cached_response(coin, COIN_MAX_AGE_SECS, COIN_SWR_SECS),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Coin fetch failed for '{}': {}", id, e));
            upstream_error_response(&e, "Failed to fetch coin.")
        }
    }
}

/// Raw market chart object (pass-through)
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoinQuery>,
) -> Response {
    let id = query.id.as_deref().map(str::trim).unwrap_or("");
    if id.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing id.");
    }
    let days = query.days.as_deref().unwrap_or("7");

    match state.coingecko.fetch_chart(id, days).await {
        Ok(chart) => cached_response(chart, COIN_MAX_AGE_SECS, COIN_SWR_SECS),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Chart fetch failed for '{}': {}", id, e));
            upstream_error_response(&e, "Failed to fetch chart.")
        }
    }
}
