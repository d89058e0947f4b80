//! CoinGecko response types
//!
//! Market coin objects, coin detail, and chart payloads are passed through
//! to the UI untouched, so they stay as raw `serde_json::Value`. Only the
//! categories list has a declared shape.

use serde::{Deserialize, Serialize};

/// One entry of `/coins/categories/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub category_id: String,
    pub name: String,
}
