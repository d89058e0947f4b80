/// Shared application state for the webserver
///
/// Holds the runtime settings, one client per upstream provider, and one
/// stale-tolerant cache per fallback-capable endpoint family. Built once
/// per process and handed to every route handler; there is no other shared
/// mutable state.
use crate::apis::alchemy::AlchemyClient;
use crate::apis::binance::BinanceClient;
use crate::apis::client::HttpClient;
use crate::apis::coingecko::CoinGeckoClient;
use crate::cache::StaleCache;
use crate::config::Settings;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Timeout for image proxy and token-URI fetches
const IMAGE_TIMEOUT_SECS: u64 = 10;

/// Shared application state passed to all route handlers
pub struct AppState {
    /// Runtime settings resolved at startup
    pub settings: Arc<Settings>,

    /// Upstream clients
    pub coingecko: CoinGeckoClient,
    pub binance: BinanceClient,
    pub alchemy: AlchemyClient,

    /// Plain client for the image proxy and token-URI metadata fetches
    pub image_client: HttpClient,

    /// Last-good-value caches, one per fallback-capable endpoint
    pub pairs_cache: StaleCache<BTreeMap<String, Vec<String>>>,
    pub prices_cache: StaleCache<BTreeMap<String, f64>>,
    pub markets_cache: StaleCache<Vec<Value>>,
    pub favorites_cache: StaleCache<Vec<Value>>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings) -> Result<Self, String> {
        Ok(Self {
            settings: Arc::new(settings),
            coingecko: CoinGeckoClient::new()?,
            binance: BinanceClient::new()?,
            alchemy: AlchemyClient::new()?,
            image_client: HttpClient::new(IMAGE_TIMEOUT_SECS)?,
            pairs_cache: StaleCache::new(),
            prices_cache: StaleCache::new(),
            markets_cache: StaleCache::new(),
            favorites_cache: StaleCache::new(),
        })
    }
}
