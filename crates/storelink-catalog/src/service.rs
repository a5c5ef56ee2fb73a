//! The aggregation pipeline: paginated catalog fetch, collection merge,
//! overlay snapshot, and the final zip into [`ProductView`] records.

use std::collections::{BTreeSet, HashMap};

use sqlx::PgPool;
use thiserror::Error;

use storelink_core::{AppConfig, FailurePolicy, LinkRecord, PaginationStrategy, PlatformKeySet};
use storelink_db::{get_all_links, DbError};
use storelink_shopify::{Collection, Product, ShopifyClient, ShopifyError};

use crate::classify::{resolve_category, INFERRED_CATEGORIES};
use crate::merge::merge_collections;
use crate::mock::mock_products;
use crate::view::ProductView;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Shopify(#[from] ShopifyError),
    #[error(transparent)]
    Store(#[from] DbError),
}

/// Orchestrates one aggregation request.
///
/// Holds the remote client (absent in mock mode), the overlay-store pool, and
/// the per-deployment policy knobs. Cheap to clone; handlers keep one in app
/// state.
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: Option<ShopifyClient>,
    pool: PgPool,
    key_set: PlatformKeySet,
    policy: FailurePolicy,
    page_limit: u32,
    strategy: PaginationStrategy,
    max_pages: usize,
}

impl CatalogService {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        client: Option<ShopifyClient>,
        pool: PgPool,
        key_set: PlatformKeySet,
        policy: FailurePolicy,
        page_limit: u32,
        strategy: PaginationStrategy,
        max_pages: usize,
    ) -> Self {
        Self {
            client,
            pool,
            key_set,
            policy,
            page_limit,
            strategy,
            max_pages,
        }
    }

    /// Builds the service from application config.
    ///
    /// A missing access token puts the service in mock-catalog mode; that is
    /// a designed degraded mode for credential-less deployments, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError`] if the client cannot be constructed from the
    /// configured store domain.
    pub fn from_config(config: &AppConfig, pool: PgPool) -> Result<Self, ShopifyError> {
        let client = match &config.shopify_token {
            Some(token) => Some(ShopifyClient::new(
                &config.shopify_store,
                token,
                &config.shopify_api_version,
                config.request_timeout_secs,
            )?),
            None => {
                tracing::warn!("no access token configured; serving the mock catalog");
                None
            }
        };

        Ok(Self::new(
            client,
            pool,
            config.platform_key_set.clone(),
            config.failure_policy,
            config.page_limit,
            config.pagination_strategy,
            config.max_pages,
        ))
    }

    /// Builds the full merged catalog view.
    ///
    /// The catalog fetch, both collection fetches, and the overlay snapshot
    /// run concurrently; results are only combined after all four complete.
    /// Collection failures degrade to an empty set for that source (they are
    /// enrichment); a catalog fetch failure follows the configured
    /// [`FailurePolicy`]; an overlay-store failure always propagates. The
    /// overlay snapshot is read exactly once per request, so store
    /// round-trips stay constant regardless of catalog size.
    ///
    /// Output order matches pagination order; every catalog item produces
    /// exactly one view.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Shopify`] under the strict policy when the
    /// catalog fetch fails, or [`CatalogError::Store`] when the overlay
    /// snapshot cannot be read.
    pub async fn build_catalog_view(&self) -> Result<Vec<ProductView>, CatalogError> {
        let (products, curated, rule_derived, links) = tokio::join!(
            self.fetch_products(),
            self.fetch_curated_collections(),
            self.fetch_rule_derived_collections(),
            get_all_links(&self.pool, &self.key_set),
        );
        let products = products?;
        let links = links?;

        tracing::info!(
            products = products.len(),
            collections = curated.len() + rule_derived.len(),
            link_records = links.len(),
            "assembling catalog view"
        );
        Ok(self.assemble(products, &curated, &rule_derived, &links))
    }

    /// Returns the sorted set of distinct categories across the catalog,
    /// unioned with the always-offered inferred categories.
    ///
    /// # Errors
    ///
    /// Same failure behavior as [`Self::build_catalog_view`] for the catalog
    /// fetch; no store access is involved.
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let products = self.fetch_products().await?;

        let mut categories: BTreeSet<String> = INFERRED_CATEGORIES
            .iter()
            .map(|c| (*c).to_owned())
            .collect();
        for product in &products {
            if let Some(explicit) = &product.product_type {
                if !explicit.trim().is_empty() {
                    categories.insert(explicit.clone());
                }
            }
        }

        Ok(categories.into_iter().collect())
    }

    /// Fetches the full catalog, applying mock mode and the failure policy.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let Some(client) = &self.client else {
            return Ok(mock_products());
        };

        match client
            .fetch_all_products(self.page_limit, self.strategy, self.max_pages)
            .await
        {
            Ok(products) => Ok(products),
            Err(e) => match self.policy {
                FailurePolicy::Strict => Err(e.into()),
                FailurePolicy::Lenient => {
                    tracing::warn!(error = %e, "catalog fetch failed; lenient policy falls back to the mock catalog");
                    Ok(mock_products())
                }
            },
        }
    }

    async fn fetch_curated_collections(&self) -> Vec<Collection> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        client.fetch_custom_collections().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "curated collection fetch failed; continuing without");
            Vec::new()
        })
    }

    async fn fetch_rule_derived_collections(&self) -> Vec<Collection> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        client.fetch_smart_collections().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "rule-derived collection fetch failed; continuing without");
            Vec::new()
        })
    }

    /// Zips catalog items with their classification and overlay records.
    fn assemble(
        &self,
        products: Vec<Product>,
        curated: &[Collection],
        rule_derived: &[Collection],
        links: &HashMap<String, LinkRecord>,
    ) -> Vec<ProductView> {
        let index = merge_collections(curated, rule_derived);

        products
            .into_iter()
            .map(|product| {
                let id = product.id.to_string();
                let collections = index.get(&id).cloned().unwrap_or_default();
                let category = resolve_category(
                    product.product_type.as_deref(),
                    &collections,
                    &product.title,
                );
                let platform_links = links
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| LinkRecord::empty(&self.key_set));

                ProductView {
                    id,
                    title: product.title,
                    description: product.body_html.unwrap_or_default(),
                    images: product.images,
                    variants: product.variants,
                    category,
                    collections,
                    platform_links,
                }
            })
            .collect()
    }
}
