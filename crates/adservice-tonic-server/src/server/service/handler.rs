//! gRPC service implementation for contextual ad selection.
//!
//! This module defines [`AdSelector`], the concrete implementation of the
//! `AdService` gRPC service defined in the protobuf specification. It maps
//! the context keys of an incoming request to the ads registered for those
//! categories, falling back to a random draw when no context is supplied.

use adservice_tonic_core::{
    AdCatalog, Error,
    proto::{AdRequest, AdResponse, ad_service_server::AdService},
};
use std::sync::Arc;
use tonic::{Request, Response, Status};

/// Number of ads served on the context-free fallback path. Fixed policy, not
/// user-configurable.
const MAX_ADS_TO_SERVE: usize = 2;

/// Stateless ad-selection service over an immutable, shared catalog.
///
/// Every call only reads the catalog and uses a per-call rng, so concurrent
/// requests need no synchronization.
#[derive(Clone)]
pub struct AdSelector {
    catalog: Arc<AdCatalog>,
}

impl AdSelector {
    pub fn new(catalog: Arc<AdCatalog>) -> Self {
        Self { catalog }
    }
}

#[tonic::async_trait]
impl AdService for AdSelector {
    /// Handles a unary ad request.
    ///
    /// Known context keys contribute their full ad list, concatenated in
    /// request order; unknown keys contribute nothing and duplicate keys
    /// duplicate their ads. An empty key set falls back to a random draw
    /// of [`MAX_ADS_TO_SERVE`] ads from the whole catalog. Exactly one
    /// response is emitted per request.
    #[tracing::instrument(skip_all, fields(context_keys = req.get_ref().context_keys.len()))]
    async fn get_ads(&self, req: Request<AdRequest>) -> Result<Response<AdResponse>, Status> {
        let context_keys = &req.get_ref().context_keys;

        let ads = if context_keys.is_empty() {
            let picked = self.catalog.random_ads(MAX_ADS_TO_SERVE, &mut rand::rng());
            if picked.is_empty() {
                // An empty draw means the catalog cannot satisfy its
                // contract; report it instead of answering with a hollow
                // empty success.
                return Err(Error::Selection {
                    context: "random fallback drew no ads".to_string(),
                }
                .into());
            }
            picked
        } else {
            let mut ads = Vec::new();
            for key in context_keys {
                if let Some(matched) = self.catalog.ads_for_category(key) {
                    ads.extend_from_slice(matched);
                }
            }
            ads
        };

        tracing::debug!(served = ads.len(), "ads selected");
        Ok(Response::new(AdResponse { ads }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adservice_tonic_core::proto::Ad;

    fn selector() -> AdSelector {
        AdSelector::new(Arc::new(AdCatalog::demo_inventory().unwrap()))
    }

    async fn get_ads(selector: &AdSelector, keys: &[&str]) -> AdResponse {
        let req = Request::new(AdRequest {
            context_keys: keys.iter().map(|k| k.to_string()).collect(),
        });
        selector.get_ads(req).await.unwrap().into_inner()
    }

    #[tokio::test]
    async fn clothing_returns_the_tank_top_ad() {
        let resp = get_ads(&selector(), &["clothing"]).await;
        assert_eq!(
            resp.ads,
            vec![Ad {
                redirect_url: "/product/66VCHSJNUP".to_string(),
                text: "Tank top for sale. 20% off.".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn decor_returns_the_candle_holder_ad() {
        let resp = get_ads(&selector(), &["decor"]).await;
        assert_eq!(
            resp.ads,
            vec![Ad {
                redirect_url: "/product/0PUK6V6EV0".to_string(),
                text: "Candle holder for sale. 30% off.".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn multiple_categories_concatenate_in_request_order() {
        let resp = get_ads(&selector(), &["decor", "kitchen"]).await;
        assert_eq!(resp.ads.len(), 3);
        assert_eq!(resp.ads[0].redirect_url, "/product/0PUK6V6EV0");
        assert_eq!(resp.ads[1].redirect_url, "/product/9SIQT8TOJO");
        assert_eq!(resp.ads[2].redirect_url, "/product/6E92ZMYYFZ");
    }

    #[tokio::test]
    async fn empty_context_serves_two_distinct_catalog_ads() {
        let s = selector();
        let resp = get_ads(&s, &[]).await;
        assert_eq!(resp.ads.len(), 2);
        assert_ne!(resp.ads[0], resp.ads[1]);
        for ad in &resp.ads {
            assert!(s.catalog.all_ads().contains(ad));
        }
    }

    #[tokio::test]
    async fn unknown_keys_yield_an_empty_success() {
        let resp = get_ads(&selector(), &["vehicles", "garden"]).await;
        assert!(resp.ads.is_empty());
    }

    #[tokio::test]
    async fn duplicate_keys_duplicate_their_ads() {
        let resp = get_ads(&selector(), &["decor", "decor"]).await;
        assert_eq!(resp.ads.len(), 2);
        assert_eq!(resp.ads[0], resp.ads[1]);
    }

    #[tokio::test]
    async fn categorical_path_is_deterministic_across_calls() {
        let s = selector();
        let first = get_ads(&s, &["kitchen", "hair"]).await;
        let second = get_ads(&s, &["kitchen", "hair"]).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn random_path_is_stable_in_length_only() {
        let s = selector();
        let first = get_ads(&s, &[]).await;
        let second = get_ads(&s, &[]).await;
        assert_eq!(first.ads.len(), 2);
        assert_eq!(second.ads.len(), 2);
    }
}
