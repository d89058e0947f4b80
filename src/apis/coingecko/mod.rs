/// CoinGecko API client
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Endpoints implemented:
/// 1. /api/v3/coins/markets - market listings (optionally by category or ids)
/// 2. /api/v3/coins/categories/list - category ids and names
/// 3. /api/v3/coins/{id} - coin detail
/// 4. /api/v3/coins/{id}/market_chart - price history

pub mod types;

use self::types::Category;
use crate::apis::client::HttpClient;
use crate::errors::UpstreamError;
use serde_json::Value;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Request timeout - CoinGecko can be slow with large market pages
const TIMEOUT_SECS: u64 = 10;

pub struct CoinGeckoClient {
    http_client: HttpClient,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        Ok(Self { http_client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let mut request = self
            .http_client
            .client()
            .get(url)
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
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

    /// Fetch the top-50 market listing, optionally filtered by category
    pub async fn fetch_markets(&self, category: Option<&str>) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/coins/markets", COINGECKO_BASE_URL);
        let mut query = vec![
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", "50"),
            ("page", "1"),
            ("sparkline", "false"),
            ("price_change_percentage", "24h"),
        ];
        if let Some(category) = category {
            query.push(("category", category));
        }
        self.get_json(&url, &query).await
    }

    /// Fetch market coin objects for an explicit comma-separated id list
    pub async fn fetch_markets_by_ids(&self, ids: &str) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/coins/markets", COINGECKO_BASE_URL);
        let query = [
            ("vs_currency", "usd"),
            ("ids", ids),
            ("order", "market_cap_desc"),
            ("sparkline", "false"),
            ("price_change_percentage", "24h"),
        ];
        self.get_json(&url, &query).await
    }

    /// Fetch the list of category ids and names
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, UpstreamError> {
        let url = format!("{}/coins/categories/list", COINGECKO_BASE_URL);
        self.get_json(&url, &[]).await
    }

    /// Fetch the raw coin detail object
    pub async fn fetch_coin(&self, id: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/coins/{}", COINGECKO_BASE_URL, id);
        self.get_json(&url, &[]).await
    }

    /// Fetch the raw market chart object for a coin
    pub async fn fetch_chart(&self, id: &str, days: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/coins/{}/market_chart", COINGECKO_BASE_URL, id);
        let query = [("vs_currency", "usd"), ("days", days)];
        self.get_json(&url, &query).await
    }
}
