//! Image proxy endpoint
//!
//! Fetches one externally-referenced image on behalf of the browser so the
//! client never calls third-party hosts directly, applying the same ipfs://
//! normalization as the NFT pipeline. Only http(s) targets are allowed
//! after normalization; images are treated as immutable (1 day max-age).

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::nfts::resolve::normalize_url;
use crate::webserver::{state::AppState, utils::error_response};

const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    url: Option<String>,
}

/// Check a normalized target before fetching
fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Fetch and pass through one external image
pub async fn get_nft_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let raw = query.url.as_deref().unwrap_or("");
    let normalized = normalize_url(Some(raw), &state.settings.ipfs_gateway);

    if normalized.is_empty() || !is_safe_url(&normalized) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid url");
    }

    let response = match state.image_client.client().get(&normalized).send().await {
        Ok(response) => response,
        Err(e) => {
            logger::debug(LogTag::Image, &format!("Image fetch failed: {}", e));
            return error_response(StatusCode::BAD_GATEWAY, "Image fetch failed");
        }
    };

    if !response.status().is_success() {
        return error_response(StatusCode::BAD_GATEWAY, "Image fetch failed");
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            logger::debug(LogTag::Image, &format!("Image body read failed: {}", e));
            return error_response(StatusCode::BAD_GATEWAY, "Image fetch failed");
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        Body::from(bytes),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;

    /// Local server standing in for the external image host
    async fn spawn_image_host() -> SocketAddr {
        let app = Router::new()
            .route(
                "/image.png",
                get(|| async { ([(header::CONTENT_TYPE, "image/png")], &b"\x89PNGdata"[..]) }),
            )
            .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Settings::default()).unwrap())
    }

    #[test]
    fn test_rejects_unsafe_schemes() {
        assert!(!is_safe_url("ftp://evil"));
        assert!(!is_safe_url(""));
        assert!(!is_safe_url("javascript:alert(1)"));
    }

    #[test]
    fn test_accepts_http_targets() {
        assert!(is_safe_url("https://x/y.png"));
        assert!(is_safe_url("http://x/y.png"));
    }

    #[test]
    fn test_ipfs_urls_become_safe_after_normalization() {
        let normalized = normalize_url(Some("ipfs://bafyXYZ"), "cloudflare-ipfs.com");
        assert!(is_safe_url(&normalized));
    }

    #[tokio::test]
    async fn test_passes_through_upstream_bytes_and_content_type() {
        let addr = spawn_image_host().await;

        let response = get_nft_image(
            State(state()),
            Query(ImageQuery {
                url: Some(format!("http://{}/image.png", addr)),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[header::CACHE_CONTROL], IMAGE_CACHE_CONTROL);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"\x89PNGdata");
    }

    #[tokio::test]
    async fn test_upstream_non_success_maps_to_bad_gateway() {
        let addr = spawn_image_host().await;

        let response = get_nft_image(
            State(state()),
            Query(ImageQuery {
                url: Some(format!("http://{}/missing.png", addr)),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
