//! Alchemy NFT API response types
//!
//! Everything the image-resolution pipeline reads is modelled as typed
//! optional fields; all other provider fields are carried through untouched
//! via `#[serde(flatten)]` so the UI still sees the full record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-cached image URLs on a record or metadata document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Image fields of a raw token metadata document
///
/// Off-chain metadata is inconsistent about the field name, so all three
/// spellings seen in the wild are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url_camel: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `raw` wrapper on an ownership record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNftData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RawMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Marketplace-provided collection imagery
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OpenSea metadata nested under the contract
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSeaMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contract information on an ownership record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_sea_metadata: Option<OpenSeaMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One media entry with gateway/raw URL variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token URI with gateway/raw variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUri {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One NFT ownership record as returned by `getNFTsForOwner`
///
/// `resolved_image` is ours: the enrichment pipeline fills it in before the
/// record is sent to the UI (empty string when unresolved).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedNft {
    #[serde(default)]
    pub token_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<NftImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawNftData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<TokenUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<ContractInfo>,
    #[serde(default)]
    pub resolved_image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of ownership records from `getNFTsForOwner`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedNftsPage {
    #[serde(default)]
    pub owned_nfts: Vec<OwnedNft>,
    #[serde(default)]
    pub total_count: u64,
    pub page_key: Option<String>,
}

/// Per-token metadata document from `getNFTMetadata`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<NftImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_metadata: Option<RawMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_round_trip() {
        let json = serde_json::json!({
            "tokenId": "42",
            "name": "Token #42",
            "image": { "cachedUrl": "https://x/a.png", "size": 1234 },
            "balance": "1",
            "timeLastUpdated": "2024-01-01T00:00:00Z"
        });

        let nft: OwnedNft = serde_json::from_value(json).unwrap();
        assert_eq!(nft.token_id, "42");
        assert_eq!(
            nft.image.as_ref().unwrap().cached_url.as_deref(),
            Some("https://x/a.png")
        );

        let out = serde_json::to_value(&nft).unwrap();
        assert_eq!(out["balance"], "1");
        assert_eq!(out["image"]["size"], 1234);
        // the derived field is always present
        assert_eq!(out["resolvedImage"], "");
    }

    #[test]
    fn test_empty_page_parses() {
        let page: OwnedNftsPage = serde_json::from_str("{}").unwrap();
        assert!(page.owned_nfts.is_empty());
        assert_eq!(page.total_count, 0);
        assert!(page.page_key.is_none());
    }

    #[test]
    fn test_raw_metadata_field_spellings() {
        let meta: RawMetadata =
            serde_json::from_value(serde_json::json!({ "imageUrl": "ipfs://Qm1" })).unwrap();
        assert_eq!(meta.image_url_camel.as_deref(), Some("ipfs://Qm1"));
        assert!(meta.image.is_none());
        assert!(meta.image_url.is_none());
    }
}
