/// Base HTTP client for upstream API calls
use reqwest::Client;
use std::time::Duration;

/// Client identifier sent on every outbound request
pub const USER_AGENT: &str = "ethereum-explorer/1.0";

/// HTTP client wrapper with a fixed per-request timeout
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
