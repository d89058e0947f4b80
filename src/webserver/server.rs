/// Axum webserver implementation
///
/// Server lifecycle management including startup and graceful shutdown.
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::{
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down.
pub async fn start_server(state: Arc<AppState>) -> Result<(), String> {
    let host = state.settings.host.clone();
    let port = state.settings.port;

    logger::debug(
        LogTag::Server,
        &format!("Starting webserver on {}:{}", host, port),
    );

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    logger::info(
        LogTag::Server,
        &format!("Webserver listening on http://{}", addr),
    );
    logger::info(
        LogTag::Server,
        &format!("API endpoints available at http://{}/api", addr),
    );

    let shutdown_signal = async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = SHUTDOWN_NOTIFY.notified() => {}
        }
        logger::info(LogTag::Server, "Received shutdown signal, stopping webserver...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}

/// Build the router with all layers applied
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}

/// Request a graceful shutdown of the running server
pub fn shutdown() {
    SHUTDOWN_NOTIFY.notify_waiters();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_stops_server() {
        let settings = Settings {
            port: 0,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(settings).unwrap());

        let server = tokio::spawn(start_server(state));
        tokio::time::sleep(Duration::from_millis(100)).await;

        shutdown();

        let result = tokio::time::timeout(Duration::from_secs(5), server).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
    }
}
