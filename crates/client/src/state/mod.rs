//! Observable UI state components.
//!
//! Each component publishes its state as a snapshot over a `watch` channel;
//! observers either poll `snapshot()` or `subscribe()` for changes.

pub mod comparison;
pub mod listing;
pub mod suggestions;

pub use comparison::{ComparisonSnapshot, ComparisonState};
pub use listing::{
    FETCH_FAILED, ListingKey, ListingRequest, ListingSnapshot, ListingState, ProductFeed,
};
pub use suggestions::{SuggestionSnapshot, SuggestionState};
