/// Alchemy NFT API client
///
/// API Documentation: https://docs.alchemy.com/reference/nft-api-quickstart
///
/// Endpoints implemented:
/// 1. /nft/v3/{key}/getNFTsForOwner - paged ownership records for a wallet
/// 2. /nft/v3/{key}/getNFTMetadata - full metadata for one token
///
/// The API key and network slug are passed per call; their absence is a
/// request-time error on the NFT endpoints, not a startup failure.

pub mod types;

use self::types::{OwnedNftsPage, TokenMetadata};
use crate::apis::client::HttpClient;
use crate::errors::UpstreamError;
use serde_json::Value;

const TIMEOUT_SECS: u64 = 10;

pub struct AlchemyClient {
    http_client: HttpClient,
}

impl AlchemyClient {
    pub fn new() -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        Ok(Self { http_client })
    }

    fn base_url(network: &str, api_key: &str) -> String {
        format!("https://{}.g.alchemy.com/nft/v3/{}", network, api_key)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let response = self
            .http_client
            .client()
            .get(url)
            .query(query)
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

    /// Fetch one page of ownership records for a wallet
    pub async fn fetch_nfts_for_owner(
        &self,
        network: &str,
        api_key: &str,
        owner: &str,
        page_size: u32,
        page_key: Option<&str>,
    ) -> Result<OwnedNftsPage, UpstreamError> {
        let url = format!("{}/getNFTsForOwner", Self::base_url(network, api_key));
        let page_size = page_size.to_string();
        let mut query = vec![
            ("owner", owner),
            ("pageSize", page_size.as_str()),
            ("withMetadata", "true"),
        ];
        if let Some(page_key) = page_key {
            query.push(("pageKey", page_key));
        }
        self.get_json(&url, &query).await
    }

    /// Fetch a small raw sample for the debug endpoint, untyped
    pub async fn fetch_nfts_sample(
        &self,
        network: &str,
        api_key: &str,
        owner: &str,
    ) -> Result<(u16, Value), UpstreamError> {
        let url = format!("{}/getNFTsForOwner", Self::base_url(network, api_key));
        let query = [("owner", owner), ("pageSize", "3"), ("withMetadata", "true")];

        let response = self
            .http_client
            .client()
            .get(&url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        Ok((status, body))
    }

    /// Fetch the full per-token metadata document
    pub async fn fetch_nft_metadata(
        &self,
        network: &str,
        api_key: &str,
        contract_address: &str,
        token_id: &str,
    ) -> Result<TokenMetadata, UpstreamError> {
        let url = format!("{}/getNFTMetadata", Self::base_url(network, api_key));
        let query = [("contractAddress", contract_address), ("tokenId", token_id)];
        self.get_json(&url, &query).await
    }
}
