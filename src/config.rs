//! Runtime configuration
//!
//! All configuration is environment-provided. The settings are loaded once
//! at startup and handed to the webserver state; there is no config file and
//! no hot reload. A missing Alchemy API key is deliberately not a startup
//! failure - the NFT endpoints report it as a 400 at request time so the
//! market-data endpoints keep working without it.

/// Default bind address for the webserver
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Default Alchemy network slug used to build NFT API URLs
pub const DEFAULT_ALCHEMY_NETWORK: &str = "eth-mainnet";

/// Default HTTPS gateway used to rewrite ipfs:// URLs
pub const DEFAULT_IPFS_GATEWAY: &str = "cloudflare-ipfs.com";

/// Default cap on per-token metadata fallback calls per NFT page
pub const DEFAULT_METADATA_CALL_CAP: usize = 10;

/// Process-wide settings, resolved from the environment at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// Host/IP to bind the webserver
    pub host: String,

    /// Port to bind the webserver
    pub port: u16,

    /// Alchemy API key for the NFT data provider (optional at startup)
    pub alchemy_api_key: Option<String>,

    /// Alchemy network slug (e.g. "eth-mainnet")
    pub alchemy_network: String,

    /// Hostname of the HTTPS gateway used for ipfs:// normalization
    pub ipfs_gateway: String,

    /// Max per-token metadata provider calls for one NFT page
    pub metadata_call_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            alchemy_api_key: None,
            alchemy_network: DEFAULT_ALCHEMY_NETWORK.to_string(),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            metadata_call_cap: DEFAULT_METADATA_CALL_CAP,
        }
    }
}

impl Settings {
    /// Resolve settings from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Settings::default();

        Self {
            host: env_string("EXPLORER_HOST").unwrap_or(defaults.host),
            port: env_parse("EXPLORER_PORT").unwrap_or(defaults.port),
            alchemy_api_key: env_string("ALCHEMY_API_KEY"),
            alchemy_network: env_string("ALCHEMY_NETWORK").unwrap_or(defaults.alchemy_network),
            ipfs_gateway: env_string("IPFS_GATEWAY").unwrap_or(defaults.ipfs_gateway),
            metadata_call_cap: env_parse("NFT_METADATA_CALL_CAP")
                .unwrap_or(defaults.metadata_call_cap),
        }
    }
}

/// Read a non-empty environment variable
fn env_string(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Read and parse an environment variable, ignoring unparseable values
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.alchemy_network, "eth-mainnet");
        assert_eq!(settings.ipfs_gateway, "cloudflare-ipfs.com");
        assert_eq!(settings.metadata_call_cap, 10);
        assert!(settings.alchemy_api_key.is_none());
    }
}
