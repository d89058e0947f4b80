use crate::webserver::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub mod binance;
pub mod coingecko;
pub mod image;
pub mod nfts;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/binance", binance::router())
        .route("/prices", get(coingecko::get_prices))
        .route("/favorites", get(coingecko::get_favorites))
        .route("/categories", get(coingecko::get_categories))
        .route("/coin", get(coingecko::get_coin))
        .route("/coin/chart", get(coingecko::get_chart))
        .route("/nfts", get(nfts::get_nfts))
        .route("/nfts/debug", get(nfts::get_nfts_debug))
        .route("/nft-image", get(image::get_nft_image))
}
