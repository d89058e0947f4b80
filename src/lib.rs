//! ethexplorer - blockchain/crypto market data aggregator
//!
//! Proxies and reshapes third-party REST APIs (CoinGecko, Binance, Alchemy)
//! behind a stale-tolerant in-memory cache, and resolves display images for
//! NFT ownership records with bounded outbound fan-out.

pub mod apis;
pub mod cache;
pub mod config;
pub mod errors;
pub mod logger;
pub mod nfts;
pub mod webserver;
