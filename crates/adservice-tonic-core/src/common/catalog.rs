//! The immutable advertisement catalog.
//!
//! [`AdCatalog`] maps category keys to fixed, ordered ad lists and keeps a
//! flattened master list for the random-fallback path. It is built exactly
//! once at process start, validated against its invariants, and then shared
//! read-only across all concurrent request handlers.

use crate::common::error::{Error, Result};
use crate::proto::Ad;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

/// Static category-to-ads registry.
///
/// Lookups are exact-match on the category key: no case folding, no
/// wildcards, no hierarchy. Invariants enforced at construction:
///
/// - the catalog holds at least one ad
/// - every category holds at least one ad
/// - category keys are unique
#[derive(Debug, Clone)]
pub struct AdCatalog {
    by_category: HashMap<String, Vec<Ad>>,
    all: Vec<Ad>,
}

impl AdCatalog {
    /// Builds a catalog from ordered `(category, ads)` pairs.
    ///
    /// The master list used by [`random_ads`](Self::random_ads) preserves the
    /// given category order, then catalog order within each category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogMisconfiguration`] if the catalog would be
    /// empty, a category has no ads, or a category key repeats.
    pub fn new<K>(categories: impl IntoIterator<Item = (K, Vec<Ad>)>) -> Result<Self>
    where
        K: Into<String>,
    {
        let mut by_category = HashMap::new();
        let mut all = Vec::new();

        for (key, ads) in categories {
            let key = key.into();
            if ads.is_empty() {
                return Err(Error::CatalogMisconfiguration {
                    reason: format!("category {key:?} has no ads"),
                });
            }
            all.extend_from_slice(&ads);
            if by_category.insert(key.clone(), ads).is_some() {
                return Err(Error::CatalogMisconfiguration {
                    reason: format!("duplicate category {key:?}"),
                });
            }
        }

        if all.is_empty() {
            return Err(Error::CatalogMisconfiguration {
                reason: "catalog has no ads".to_string(),
            });
        }

        Ok(Self { by_category, all })
    }

    /// The fixed storefront inventory served by this demo deployment.
    pub fn demo_inventory() -> Result<Self> {
        fn ad(redirect_url: &str, text: &str) -> Ad {
            Ad {
                redirect_url: redirect_url.to_string(),
                text: text.to_string(),
            }
        }

        Self::new([
            (
                "clothing",
                vec![ad("/product/66VCHSJNUP", "Tank top for sale. 20% off.")],
            ),
            (
                "accessories",
                vec![ad(
                    "/product/1YMWWN1N4O",
                    "Watch for sale. Buy one, get second kit for free",
                )],
            ),
            (
                "footwear",
                vec![ad(
                    "/product/L9ECAV7KIM",
                    "Loafers for sale. Buy one, get second one for free",
                )],
            ),
            (
                "hair",
                vec![ad("/product/2ZYFJ3GM2N", "Hairdryer for sale. 50% off.")],
            ),
            (
                "decor",
                vec![ad("/product/0PUK6V6EV0", "Candle holder for sale. 30% off.")],
            ),
            (
                "kitchen",
                vec![
                    ad("/product/9SIQT8TOJO", "Bamboo glass jar for sale. 10% off."),
                    ad(
                        "/product/6E92ZMYYFZ",
                        "Mug for sale. Buy two, get third one for free",
                    ),
                ],
            ),
        ])
    }

    /// Exact-match lookup of the ads registered for `key`, in catalog order.
    pub fn ads_for_category(&self, key: &str) -> Option<&[Ad]> {
        self.by_category.get(key).map(Vec::as_slice)
    }

    /// Draws up to `count` distinct ads from the whole catalog, without
    /// replacement within a single call.
    ///
    /// The draw order is randomized per call and not reproducible across
    /// calls unless the caller seeds `rng`. A `count` larger than the
    /// inventory clamps to the inventory size rather than erroring.
    pub fn random_ads<R>(&self, count: usize, rng: &mut R) -> Vec<Ad>
    where
        R: Rng + ?Sized,
    {
        self.all.choose_multiple(rng, count).cloned().collect()
    }

    /// Every ad in the catalog, in category insertion order.
    pub fn all_ads(&self) -> &[Ad] {
        &self.all
    }

    /// Number of ads across all categories.
    pub fn total_ads(&self) -> usize {
        self.all.len()
    }

    /// Number of categories.
    pub fn total_categories(&self) -> usize {
        self.by_category.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> AdCatalog {
        AdCatalog::demo_inventory().unwrap()
    }

    #[test]
    fn lookup_returns_ads_in_catalog_order() {
        let catalog = catalog();
        let kitchen = catalog.ads_for_category("kitchen").unwrap();
        assert_eq!(kitchen.len(), 2);
        assert_eq!(kitchen[0].redirect_url, "/product/9SIQT8TOJO");
        assert_eq!(kitchen[1].redirect_url, "/product/6E92ZMYYFZ");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = catalog();
        assert!(catalog.ads_for_category("decor").is_some());
        assert!(catalog.ads_for_category("Decor").is_none());
        assert!(catalog.ads_for_category("DECOR").is_none());
    }

    #[test]
    fn unknown_category_is_absent() {
        assert!(catalog().ads_for_category("vehicles").is_none());
    }

    #[test]
    fn random_draw_is_distinct_and_from_inventory() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..32 {
            let picked = catalog.random_ads(2, &mut rng);
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
            for ad in &picked {
                assert!(catalog.all_ads().contains(ad));
            }
        }
    }

    #[test]
    fn oversized_draw_clamps_to_inventory() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = catalog.random_ads(100, &mut rng);
        assert_eq!(picked.len(), catalog.total_ads());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = AdCatalog::new(Vec::<(String, Vec<Ad>)>::new()).unwrap_err();
        assert!(matches!(err, Error::CatalogMisconfiguration { .. }));
    }

    #[test]
    fn empty_category_is_rejected() {
        let err = AdCatalog::new([("clothing", Vec::new())]).unwrap_err();
        assert!(matches!(err, Error::CatalogMisconfiguration { .. }));
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let ad = Ad {
            redirect_url: "/product/X".to_string(),
            text: "X for sale.".to_string(),
        };
        let err = AdCatalog::new([
            ("clothing", vec![ad.clone()]),
            ("clothing", vec![ad]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::CatalogMisconfiguration { .. }));
    }
}
