//! Image source resolution for a single ownership record
//!
//! A record may carry an image URL in a dozen optional places. The
//! candidates are evaluated in a fixed priority order with early exit, each
//! normalized (ipfs:// rewritten to the HTTPS gateway) before acceptance.
//! When no embedded candidate works, the token metadata document itself is
//! fetched and mined for an image field.

use crate::apis::alchemy::types::{OwnedNft, RawMetadata, TokenMetadata};
use std::time::Duration;

/// Timeout for a token-URI metadata fetch; the request is cancelled when it
/// elapses and the record degrades to an empty result
pub const METADATA_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Normalize a candidate URL
///
/// `ipfs://<path>` becomes `https://<gateway>/ipfs/<path>`; anything else
/// passes through unchanged. Absent candidates become the empty string.
pub fn normalize_url(raw: Option<&str>, gateway: &str) -> String {
    let Some(url) = raw else {
        return String::new();
    };
    if let Some(path) = url.strip_prefix("ipfs://") {
        return format!("https://{}/ipfs/{}", gateway, path);
    }
    url.to_string()
}

/// A URL that points at a metadata document rather than an image
pub fn looks_like_document(url: &str) -> bool {
    url.ends_with(".json")
}

/// First non-empty embedded image candidate, in fixed priority order
pub fn embedded_image(nft: &OwnedNft, gateway: &str) -> String {
    let image = nft.image.as_ref();
    let raw_meta = nft.raw.as_ref().and_then(|r| r.metadata.as_ref());
    let opensea = nft
        .contract
        .as_ref()
        .and_then(|c| c.open_sea_metadata.as_ref());
    let collection = nft.collection.as_ref();
    let media = nft.media.as_ref().and_then(|m| m.first());
    let token_uri = nft.token_uri.as_ref();

    let candidates: [Option<&str>; 14] = [
        image.and_then(|i| i.cached_url.as_deref()),
        image.and_then(|i| i.thumbnail_url.as_deref()),
        image.and_then(|i| i.original_url.as_deref()),
        raw_meta.and_then(|m| m.image.as_deref()),
        raw_meta.and_then(|m| m.image_url.as_deref()),
        raw_meta.and_then(|m| m.image_url_camel.as_deref()),
        opensea.and_then(|o| o.image_url.as_deref()),
        opensea.and_then(|o| o.banner_image_url.as_deref()),
        collection.and_then(|c| c.image_url.as_deref()),
        collection.and_then(|c| c.banner_image_url.as_deref()),
        media.and_then(|m| m.gateway.as_deref()),
        media.and_then(|m| m.raw.as_deref()),
        token_uri.and_then(|t| t.gateway.as_deref()),
        token_uri.and_then(|t| t.raw.as_deref()),
    ];

    first_non_empty(candidates, gateway)
}

/// Token metadata URI of a record, raw preferred over gateway
pub fn token_uri(nft: &OwnedNft, gateway: &str) -> String {
    let uri = nft
        .token_uri
        .as_ref()
        .and_then(|t| t.raw.as_deref().or(t.gateway.as_deref()));
    normalize_url(uri, gateway)
}

/// First non-empty image candidate of a per-token metadata document
pub fn metadata_image(meta: &TokenMetadata, gateway: &str) -> String {
    let image = meta.image.as_ref();
    let raw_meta = meta.raw_metadata.as_ref();
    let media = meta.media.as_ref().and_then(|m| m.first());

    let candidates: [Option<&str>; 8] = [
        image.and_then(|i| i.cached_url.as_deref()),
        image.and_then(|i| i.thumbnail_url.as_deref()),
        image.and_then(|i| i.original_url.as_deref()),
        raw_meta.and_then(|m| m.image.as_deref()),
        raw_meta.and_then(|m| m.image_url.as_deref()),
        raw_meta.and_then(|m| m.image_url_camel.as_deref()),
        media.and_then(|m| m.gateway.as_deref()),
        media.and_then(|m| m.raw.as_deref()),
    ];

    first_non_empty(candidates, gateway)
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N], gateway: &str) -> String {
    candidates
        .into_iter()
        .map(|candidate| normalize_url(candidate, gateway))
        .find(|url| !url.is_empty())
        .unwrap_or_default()
}

/// Fetch a token metadata URI and extract an image URL from it
///
/// If the response is itself an image, the fetched URL is the answer. If it
/// is (or parses as) JSON, the usual image field spellings are tried. Any
/// failure - timeout, non-2xx, unparseable body - yields the empty string;
/// a single record never fails the page.
pub async fn fetch_metadata_image(client: &reqwest::Client, url: &str, gateway: &str) -> String {
    let request = client
        .get(url)
        .header("Accept", "application/json")
        .send();

    let response = match tokio::time::timeout(METADATA_FETCH_TIMEOUT, request).await {
        Ok(Ok(response)) => response,
        // timeout (drops and cancels the request) or transport error
        _ => return String::new(),
    };

    if !response.status().is_success() {
        return String::new();
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("image/") {
        return normalize_url(Some(url), gateway);
    }

    // JSON content type, or any body that happens to parse as JSON
    let body = match tokio::time::timeout(METADATA_FETCH_TIMEOUT, response.text()).await {
        Ok(Ok(body)) => body,
        _ => return String::new(),
    };

    match serde_json::from_str::<RawMetadata>(&body) {
        Ok(doc) => {
            let image = doc
                .image
                .as_deref()
                .or(doc.image_url.as_deref())
                .or(doc.image_url_camel.as_deref());
            normalize_url(image, gateway)
        }
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::alchemy::types::{
        CollectionInfo, MediaItem, NftImage, RawNftData, TokenUri,
    };

    const GATEWAY: &str = "cloudflare-ipfs.com";

    #[test]
    fn test_normalize_ipfs_scheme() {
        assert_eq!(
            normalize_url(Some("ipfs://bafyXYZ"), GATEWAY),
            "https://cloudflare-ipfs.com/ipfs/bafyXYZ"
        );
        assert_eq!(
            normalize_url(Some("ipfs://Qm123/image.png"), GATEWAY),
            "https://cloudflare-ipfs.com/ipfs/Qm123/image.png"
        );
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(
            normalize_url(Some("https://x/y.png"), GATEWAY),
            "https://x/y.png"
        );
        assert_eq!(normalize_url(Some("http://x/y.png"), GATEWAY), "http://x/y.png");
        assert_eq!(normalize_url(None, GATEWAY), "");
        assert_eq!(normalize_url(Some(""), GATEWAY), "");
    }

    #[test]
    fn test_embedded_image_priority_order() {
        let nft = OwnedNft {
            image: Some(NftImage {
                cached_url: Some("https://x/cached.png".into()),
                thumbnail_url: Some("https://x/thumb.png".into()),
                ..Default::default()
            }),
            collection: Some(CollectionInfo {
                image_url: Some("https://x/collection.png".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(embedded_image(&nft, GATEWAY), "https://x/cached.png");
    }

    #[test]
    fn test_embedded_image_falls_through_empty_candidates() {
        let nft = OwnedNft {
            image: Some(NftImage::default()),
            raw: Some(RawNftData::default()),
            media: Some(vec![MediaItem {
                gateway: Some("ipfs://QmMedia".into()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert_eq!(
            embedded_image(&nft, GATEWAY),
            "https://cloudflare-ipfs.com/ipfs/QmMedia"
        );
    }

    #[test]
    fn test_embedded_image_unresolved() {
        assert_eq!(embedded_image(&OwnedNft::default(), GATEWAY), "");
    }

    #[test]
    fn test_token_uri_prefers_raw() {
        let nft = OwnedNft {
            token_uri: Some(TokenUri {
                raw: Some("ipfs://QmRaw/meta.json".into()),
                gateway: Some("https://gw/meta.json".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            token_uri(&nft, GATEWAY),
            "https://cloudflare-ipfs.com/ipfs/QmRaw/meta.json"
        );
    }

    #[test]
    fn test_looks_like_document() {
        assert!(looks_like_document("https://x/meta.json"));
        assert!(!looks_like_document("https://x/a.png"));
        assert!(!looks_like_document(""));
    }

    #[test]
    fn test_metadata_image_order() {
        let meta = TokenMetadata {
            raw_metadata: Some(RawMetadata {
                image_url: Some("ipfs://QmDoc".into()),
                ..Default::default()
            }),
            media: Some(vec![MediaItem {
                gateway: Some("https://x/media.png".into()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert_eq!(
            metadata_image(&meta, GATEWAY),
            "https://cloudflare-ipfs.com/ipfs/QmDoc"
        );
    }
}
