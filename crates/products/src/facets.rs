//! Values derived from a loaded product list: filter facets, search
//! suggestions, per-category statistics and related products.

use std::collections::HashSet;

use serde::Serialize;
use toolscout_core::Entity;

use crate::product::Product;

/// Deduplicated category and tag values present in a product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    /// Flatten `categories`/`tags` across `products`, keeping first occurrences.
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            categories: dedup_first(products.iter().flat_map(|p| p.categories.iter())),
            tags: dedup_first(products.iter().flat_map(|p| p.tags.iter())),
        }
    }
}

/// Suggestion terms for a search: every product contributes its name, tags
/// and categories, deduplicated in first-occurrence order.
pub fn suggestion_terms(products: &[Product]) -> Vec<String> {
    dedup_first(products.iter().flat_map(|p| {
        std::iter::once(&p.name)
            .chain(p.tags.iter())
            .chain(p.categories.iter())
    }))
}

/// Aggregate numbers shown on a category card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub product_count: usize,
    pub total_reviews: usize,
    /// Mean of the per-product average ratings; `0.0` for an empty category.
    pub average_rating: f64,
}

impl CategoryStats {
    /// Average rating with one decimal place ("4.5").
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

/// Statistics for the products whose categories match `slug`.
pub fn category_stats(products: &[Product], slug: &str) -> CategoryStats {
    let members: Vec<&Product> = products.iter().filter(|p| p.in_category_slug(slug)).collect();

    let total_reviews = members.iter().map(|p| p.reviews.len()).sum();
    let average_rating = if members.is_empty() {
        0.0
    } else {
        members.iter().map(|p| p.average_rating()).sum::<f64>() / members.len() as f64
    };

    CategoryStats {
        product_count: members.len(),
        total_reviews,
        average_rating,
    }
}

/// Candidates other than `current`, at most `max` of them.
pub fn related_products(current: &Product, candidates: Vec<Product>, max: usize) -> Vec<Product> {
    candidates
        .into_iter()
        .filter(|p| !p.is_same(current))
        .take(max)
        .collect()
}

fn dedup_first<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}
