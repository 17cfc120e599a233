//! Catalog service: the remote access layer used by every state component.
//!
//! Listing-style operations never fail outward: when the API is unreachable,
//! answers with an error status, or sends something undecodable, they log the
//! failure and answer from the sample catalog instead. Detail and comparison
//! fall back only when the network itself is unavailable; authentication
//! never falls back.

use std::sync::Arc;

use tokio::sync::Mutex;

use toolscout_auth::{AuthSession, Credentials, Role};
use toolscout_core::ProductId;
use toolscout_products::{
    CategoryStats, FilterOptions, Product, SampleCatalog, category_slug, category_stats,
    related_products, suggestion_terms,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::offline::{ConnectivityState, OfflineMode};
use crate::remote::{HttpProductApi, ProductApi};

/// Trending list size when the caller does not choose one.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;
/// Listings requested when looking for related products.
pub const RELATED_FETCH_LIMIT: u32 = 4;
/// Related products shown on a detail page.
pub const RELATED_SHOWN: usize = 3;
/// Listings requested when computing category statistics.
pub const CATEGORY_STATS_LIMIT: u32 = 100;

/// Directory access with sample-data fallback.
///
/// Cheap to clone; clones share the API client, the sample catalog and the
/// connectivity state.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn ProductApi>,
    samples: Arc<SampleCatalog>,
    offline_mode: Arc<Mutex<OfflineMode>>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn ProductApi>, samples: Arc<SampleCatalog>) -> Self {
        Self {
            api,
            samples,
            offline_mode: Arc::new(Mutex::new(OfflineMode::new())),
        }
    }

    /// HTTP-backed service with the built-in sample catalog.
    pub fn http(config: ClientConfig) -> Result<Self, ClientError> {
        let api = HttpProductApi::new(config)?;
        Ok(Self::new(Arc::new(api), Arc::new(SampleCatalog::builtin())))
    }

    pub fn samples(&self) -> &SampleCatalog {
        &self.samples
    }

    pub async fn connectivity(&self) -> ConnectivityState {
        self.offline_mode.lock().await.state()
    }

    /// Snapshot of the connectivity bookkeeping.
    pub async fn offline_mode(&self) -> OfflineMode {
        self.offline_mode.lock().await.clone()
    }

    /// Product listing; degrades to category/search filtering of the samples.
    pub async fn list_products(&self, options: &FilterOptions) -> Vec<Product> {
        match self.api.list_products(options).await {
            Ok(products) => {
                self.mark_online().await;
                products
            }
            Err(err) => {
                self.degrade("list_products", &err).await;
                self.samples.filter(options)
            }
        }
    }

    /// Detail record.
    ///
    /// With the network down this answers with the matching sample, or the
    /// first sample when none matches.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        match self.api.get_product(id).await {
            Ok(product) => {
                self.mark_online().await;
                Ok(product)
            }
            Err(err) if err.is_network() => {
                self.degrade("get_product", &err).await;
                self.samples
                    .find(id)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// Most popular listings; degrades to sorting the samples by popularity.
    pub async fn list_trending(&self, category: Option<&str>, limit: usize) -> Vec<Product> {
        match self.api.list_trending(category, limit).await {
            Ok(products) => {
                self.mark_online().await;
                products
            }
            Err(err) => {
                self.degrade("list_trending", &err).await;
                self.samples.trending(category, limit)
            }
        }
    }

    /// Free-text product search; degrades to substring matching the samples.
    pub async fn search_products(&self, query: &str) -> Vec<Product> {
        match self.api.search_products(query).await {
            Ok(products) => {
                self.mark_online().await;
                products
            }
            Err(err) => {
                self.degrade("search_products", &err).await;
                self.samples.search(query)
            }
        }
    }

    /// Names, tags and categories of the products matching `query`,
    /// deduplicated in first-occurrence order.
    pub async fn search_suggestions(&self, query: &str) -> Vec<String> {
        suggestion_terms(&self.search_products(query).await)
    }

    /// Full records for `ids`.
    ///
    /// With the network down, ids without a sample record are dropped.
    pub async fn compare_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, ClientError> {
        match self.api.compare_products(ids).await {
            Ok(products) => {
                self.mark_online().await;
                Ok(products)
            }
            Err(err) if err.is_network() => {
                self.degrade("compare_products", &err).await;
                Ok(self.samples.compare(ids))
            }
            Err(err) => Err(err),
        }
    }

    /// Listings sharing `current`'s primary category, excluding `current`.
    pub async fn related_products(&self, current: &Product) -> Vec<Product> {
        let mut options = FilterOptions::new().with_limit(RELATED_FETCH_LIMIT);
        options.category = current.categories.first().cloned();

        let candidates = self.list_products(&options).await;
        related_products(current, candidates, RELATED_SHOWN)
    }

    /// Product count, review count and average rating for a category.
    ///
    /// `slug` may be a display name; it is normalized first.
    pub async fn category_stats(&self, slug: &str) -> CategoryStats {
        let slug = category_slug(slug);
        let options = FilterOptions::new().with_limit(CATEGORY_STATS_LIMIT);
        let products = self.list_products(&options).await;
        category_stats(&products, &slug)
    }

    pub async fn register(
        &self,
        credentials: &Credentials,
        role: &Role,
    ) -> Result<AuthSession, ClientError> {
        let session = self.api.register(credentials, role).await?;
        tracing::info!(email = %credentials.email, role = %role, "registered account");
        Ok(session)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        let session = self.api.login(credentials).await?;
        tracing::info!(email = %credentials.email, "logged in");
        Ok(session)
    }

    async fn mark_online(&self) {
        self.offline_mode.lock().await.set_online();
    }

    async fn degrade(&self, operation: &'static str, err: &ClientError) {
        tracing::warn!(operation, error = %err, "directory API not available, using sample data");
        self.offline_mode.lock().await.set_offline();
    }
}

impl core::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogService")
            .field("samples", &self.samples.products().len())
            .finish_non_exhaustive()
    }
}
