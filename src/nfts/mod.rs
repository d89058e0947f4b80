//! NFT enrichment pipeline
//!
//! Given one page of ownership records, resolve a best-effort display image
//! per record. Records are resolved concurrently; the expensive per-token
//! metadata fallback (one extra provider call per record) is capped per
//! page so worst-case outbound fan-out stays bounded regardless of page
//! size. Resolution failures degrade that record to an empty image and
//! never fail the page.

pub mod resolve;

use crate::apis::alchemy::types::{OwnedNft, OwnedNftsPage, TokenMetadata};
use crate::errors::UpstreamError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of per-token metadata documents, the lookup of last resort
///
/// Implemented by the Alchemy client in production; tests inject counting
/// fakes to verify the call cap.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn token_metadata(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<TokenMetadata, UpstreamError>;
}

/// Shared per-page budget for metadata fallback calls
///
/// `try_acquire` is a compare-and-swap loop, so the cap is never exceeded
/// even with all records resolving concurrently.
struct CallBudget {
    used: AtomicUsize,
    cap: usize,
}

impl CallBudget {
    fn new(cap: usize) -> Self {
        Self {
            used: AtomicUsize::new(0),
            cap,
        }
    }

    fn try_acquire(&self) -> bool {
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                (used < self.cap).then_some(used + 1)
            })
            .is_ok()
    }
}

/// Resolve display images for every record of a page, in place
pub async fn enrich_page(
    page: &mut OwnedNftsPage,
    source: &dyn MetadataSource,
    http: &reqwest::Client,
    gateway: &str,
    metadata_call_cap: usize,
) {
    let budget = CallBudget::new(metadata_call_cap);

    let budget = &budget;
    let resolutions = page.owned_nfts.iter_mut().map(|nft| async move {
        let resolved = resolve_image(nft, source, http, gateway, budget).await;
        nft.resolved_image = resolved;
    });

    join_all(resolutions).await;
}

/// Resolve one record's display image
///
/// Order: embedded candidates, then the token-URI metadata document, then
/// (budget permitting) the provider's per-token metadata. Returns the empty
/// string when nothing resolves.
async fn resolve_image(
    nft: &OwnedNft,
    source: &dyn MetadataSource,
    http: &reqwest::Client,
    gateway: &str,
    budget: &CallBudget,
) -> String {
    let base = resolve::embedded_image(nft, gateway);
    if !base.is_empty() && !resolve::looks_like_document(&base) {
        return base;
    }

    // no metadata URI to chase: the embedded candidate (possibly a bare
    // document URL, possibly empty) is the best we have
    let uri = resolve::token_uri(nft, gateway);
    if uri.is_empty() {
        return base;
    }

    let meta_image = resolve::fetch_metadata_image(http, &uri, gateway).await;
    let mut resolved = if meta_image.is_empty() { base } else { meta_image };

    if resolved.is_empty() {
        if let Some(address) = nft.contract.as_ref().and_then(|c| c.address.as_deref()) {
            if budget.try_acquire() {
                match source.token_metadata(address, &nft.token_id).await {
                    Ok(meta) => {
                        let image = resolve::metadata_image(&meta, gateway);
                        if !image.is_empty() {
                            resolved = image;
                        }
                    }
                    Err(e) => {
                        logger::debug(
                            LogTag::Nft,
                            &format!(
                                "Metadata lookup failed for {}/{}: {}",
                                address, nft.token_id, e
                            ),
                        );
                    }
                }
            }
        }
    }

    resolved
}
