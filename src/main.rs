use std::sync::Arc;

use ethexplorer::logger::{self, LogTag};
use ethexplorer::webserver::{self, state::AppState};
use ethexplorer::config::Settings;

#[tokio::main]
async fn main() {
    logger::init();

    let settings = Settings::from_env();

    let state = match AppState::new(settings) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::error(LogTag::Server, &format!("Failed to initialize: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = webserver::start_server(state).await {
        logger::error(LogTag::Server, &format!("Server error: {}", e));
        std::process::exit(1);
    }
}
