//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attributes.
/// Filter options are the canonical example here: two option sets with the
/// same effective fields describe the same query, which is what lets the
/// listing state skip redundant fetches.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceRange { min: u32, max: u32 }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
