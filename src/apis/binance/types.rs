//! Binance response types

use serde::Deserialize;

/// Subset of `/api/v3/exchangeInfo`
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

/// One tradeable symbol definition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub base_asset: String,
    #[serde(default)]
    pub quote_asset: String,
}

/// One entry of `/api/v3/ticker/price`
///
/// Binance reports prices as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: String,
}
