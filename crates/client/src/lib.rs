//! `toolscout-client` — access to the AI tool directory API plus the
//! observable state behind listing, comparison and search views.
//!
//! Layering, bottom up:
//! - [`remote`]: the raw HTTP contract ([`ProductApi`], [`HttpProductApi`]).
//! - [`catalog`]: [`CatalogService`], which falls back to sample data when the
//!   API is unavailable.
//! - [`state`]: listing, comparison and suggestion state components.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod offline;
pub mod remote;
pub mod state;

pub use catalog::{CATEGORY_STATS_LIMIT, CatalogService, DEFAULT_TRENDING_LIMIT};
pub use config::ClientConfig;
pub use debounce::{DebounceHandle, Debouncer};
pub use error::{ClientError, ConfigError};
pub use offline::{ConnectivityState, OfflineMode};
pub use remote::{HttpProductApi, ProductApi};
pub use state::{
    ComparisonSnapshot, ComparisonState, ListingRequest, ListingSnapshot, ListingState,
    ProductFeed, SuggestionSnapshot, SuggestionState,
};
