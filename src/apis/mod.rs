//! Upstream provider clients
//!
//! One client module per third-party API. All share the [`client::HttpClient`]
//! wrapper; every call is a single attempt with a bounded timeout, no retry.

pub mod alchemy;
pub mod binance;
pub mod client;
pub mod coingecko;
