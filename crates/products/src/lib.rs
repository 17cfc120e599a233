//! Product directory domain module.
//!
//! This crate contains the listing data model and everything derived from it,
//! implemented as deterministic logic (no IO, no HTTP, no runtime).

pub mod comparison;
pub mod facets;
pub mod filter;
pub mod product;
pub mod samples;

pub use comparison::{
    ComparisonRow, ComparisonSelection, MAX_COMPARE, MIN_COMPARE, comparison_rows, price_label,
};
pub use facets::{CategoryStats, Facets, category_stats, related_products, suggestion_terms};
pub use filter::{DEFAULT_LIMIT, DEFAULT_PAGE, FilterKey, FilterOptions, SortKey};
pub use product::{
    Feature, Product, ProductRecord, Review, ReviewRecord, SeoMetadata, average_rating,
    category_slug,
};
pub use samples::SampleCatalog;

pub use toolscout_core::ProductId;
