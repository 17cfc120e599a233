//! `toolscout-core` — shared building blocks for the product directory.
//!
//! This crate contains **pure domain** primitives (no HTTP, no runtime).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use value_object::ValueObject;
