//! Product listing state.
//!
//! Owns the currently displayed product list for one listing request, the
//! facets derived from it, and the loading/error flags. Repeated loads with an
//! equal effective request are ignored; a response that arrives after a newer
//! request was issued is discarded.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};

use toolscout_products::{Facets, FilterKey, FilterOptions, Product};

use crate::catalog::{CatalogService, DEFAULT_TRENDING_LIMIT};
use crate::error::ClientError;

/// Message recorded when a failure carries no description of its own.
pub const FETCH_FAILED: &str = "Failed to fetch products";

/// What a listing shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRequest {
    Products(FilterOptions),
    Trending {
        category: Option<String>,
        limit: usize,
    },
}

impl ListingRequest {
    /// Trending listing with the default size.
    pub fn trending(category: Option<String>) -> Self {
        ListingRequest::Trending {
            category,
            limit: DEFAULT_TRENDING_LIMIT,
        }
    }

    /// Identity of the request for duplicate suppression.
    pub fn key(&self) -> ListingKey {
        match self {
            ListingRequest::Products(options) => ListingKey::Products(options.effective_key()),
            ListingRequest::Trending { category, limit } => ListingKey::Trending {
                category: category.clone().filter(|c| !c.is_empty()),
                limit: *limit,
            },
        }
    }
}

impl From<FilterOptions> for ListingRequest {
    fn from(options: FilterOptions) -> Self {
        ListingRequest::Products(options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingKey {
    Products(FilterKey),
    Trending {
        category: Option<String>,
        limit: usize,
    },
}

/// Source of listing data.
#[async_trait]
pub trait ProductFeed: Send + Sync {
    async fn fetch_listing(&self, request: &ListingRequest) -> Result<Vec<Product>, ClientError>;
}

#[async_trait]
impl ProductFeed for CatalogService {
    async fn fetch_listing(&self, request: &ListingRequest) -> Result<Vec<Product>, ClientError> {
        let products = match request {
            ListingRequest::Products(options) => self.list_products(options).await,
            ListingRequest::Trending { category, limit } => {
                self.list_trending(category.as_deref(), *limit).await
            }
        };
        Ok(products)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSnapshot {
    pub products: Vec<Product>,
    pub facets: Facets,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Tracker {
    key: Option<ListingKey>,
    request: Option<ListingRequest>,
    generation: u64,
}

struct ListingInner {
    feed: Arc<dyn ProductFeed>,
    snapshot: watch::Sender<ListingSnapshot>,
    tracker: Mutex<Tracker>,
}

/// Listing state shared between the fetcher and any number of observers.
#[derive(Clone)]
pub struct ListingState {
    inner: Arc<ListingInner>,
}

impl ListingState {
    pub fn new(feed: Arc<dyn ProductFeed>) -> Self {
        let (snapshot, _) = watch::channel(ListingSnapshot::default());
        Self {
            inner: Arc::new(ListingInner {
                feed,
                snapshot,
                tracker: Mutex::new(Tracker::default()),
            }),
        }
    }

    /// Fetch `request` unless it is equivalent to the current one.
    ///
    /// Returns whether a fetch was performed.
    pub async fn load(&self, request: impl Into<ListingRequest>) -> bool {
        let request = request.into();
        let key = request.key();

        let generation = {
            let mut tracker = self.inner.tracker.lock().await;
            if tracker.key.as_ref() == Some(&key) {
                tracing::debug!(?key, "listing request unchanged; skipping fetch");
                return false;
            }
            tracker.key = Some(key);
            tracker.request = Some(request.clone());
            tracker.generation += 1;
            tracker.generation
        };

        self.fetch(generation, request).await;
        true
    }

    /// Fetch the current request again. Returns `false` when nothing was
    /// loaded yet.
    pub async fn refresh(&self) -> bool {
        let (generation, request) = {
            let mut tracker = self.inner.tracker.lock().await;
            let Some(request) = tracker.request.clone() else {
                return false;
            };
            tracker.generation += 1;
            (tracker.generation, request)
        };

        self.fetch(generation, request).await;
        true
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot> {
        self.inner.snapshot.subscribe()
    }

    async fn fetch(&self, generation: u64, request: ListingRequest) {
        self.inner.snapshot.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.inner.feed.fetch_listing(&request).await;

        let tracker = self.inner.tracker.lock().await;
        if tracker.generation != generation {
            tracing::debug!(generation, current = tracker.generation, "discarding superseded listing");
            return;
        }

        self.inner.snapshot.send_modify(|s| {
            s.loading = false;
            match result {
                Ok(products) => {
                    s.facets = Facets::from_products(&products);
                    s.products = products;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "listing fetch failed");
                    let message = err.to_string();
                    s.error = Some(if message.is_empty() {
                        FETCH_FAILED.to_string()
                    } else {
                        message
                    });
                }
            }
        });
    }
}

impl core::fmt::Debug for ListingState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListingState")
            .field("snapshot", &*self.inner.snapshot.borrow())
            .finish_non_exhaustive()
    }
}
