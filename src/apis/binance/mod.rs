/// Binance API client
///
/// Endpoints implemented:
/// 1. /api/v3/exchangeInfo - symbol definitions and trading status
/// 2. /api/v3/ticker/price - latest price per symbol
///
/// The transforms into the shapes served by our proxy endpoints are pure
/// functions so they can be tested without any HTTP involved.

pub mod types;

use self::types::{ExchangeInfo, TickerPrice};
use crate::apis::client::HttpClient;
use crate::errors::UpstreamError;
use std::collections::BTreeMap;

const BINANCE_BASE_URL: &str = "https://api.binance.com/api/v3";

const TIMEOUT_SECS: u64 = 10;

/// Symbol status marking an actively tradeable pair
const STATUS_TRADING: &str = "TRADING";

pub struct BinanceClient {
    http_client: HttpClient,
}

impl BinanceClient {
    pub fn new() -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        Ok(Self { http_client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let response = self
            .http_client
            .client()
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))
    }

    /// Fetch the full exchange symbol table
    pub async fn fetch_exchange_info(&self) -> Result<ExchangeInfo, UpstreamError> {
        let url = format!("{}/exchangeInfo", BINANCE_BASE_URL);
        self.get_json(&url).await
    }

    /// Fetch the latest price for every symbol
    pub async fn fetch_ticker_prices(&self) -> Result<Vec<TickerPrice>, UpstreamError> {
        let url = format!("{}/ticker/price", BINANCE_BASE_URL);
        self.get_json(&url).await
    }
}

/// Build the base-asset -> quote-assets map, keeping only trading symbols
pub fn build_pair_map(info: ExchangeInfo) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for symbol in info
        .symbols
        .into_iter()
        .filter(|s| s.status == STATUS_TRADING)
    {
        map.entry(symbol.base_asset).or_default().push(symbol.quote_asset);
    }
    map
}

/// Build the symbol -> numeric price map for one quote asset
///
/// Symbols not ending in `quote` are dropped, as are prices that do not
/// parse as finite numbers.
pub fn build_price_map(prices: Vec<TickerPrice>, quote: &str) -> BTreeMap<String, f64> {
    let mut map = BTreeMap::new();
    for item in prices {
        if !item.symbol.ends_with(quote) {
            continue;
        }
        if let Ok(value) = item.price.parse::<f64>() {
            if value.is_finite() {
                map.insert(item.symbol, value);
            }
        }
    }
    map
}
