//! Side-by-side comparison: the bounded selection set and the table rows.

use serde::Serialize;

use toolscout_core::ProductId;

use crate::product::Product;

/// Maximum number of products that can be compared at once.
pub const MAX_COMPARE: usize = 3;
/// Minimum number of products needed before a comparison is fetched.
pub const MIN_COMPARE: usize = 2;

/// Ordered set of up to [`MAX_COMPARE`] unique product ids.
///
/// Adding a fourth id, adding a duplicate, or removing an absent id are all
/// no-ops; the boolean results report whether the set changed.
///
/// Only serializable: every selection is built through [`add`](Self::add).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComparisonSelection {
    ids: Vec<ProductId>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ProductId) -> bool {
        if self.ids.len() >= MAX_COMPARE || self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE
    }

    /// Enough products are selected to fetch a comparison.
    pub fn is_comparable(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }
}

impl FromIterator<ProductId> for ComparisonSelection {
    /// Add each id in turn; ids past the cap and duplicates are skipped.
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.add(id);
        }
        selection
    }
}

/// One attribute row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    /// One cell per compared product, in product order.
    pub cells: Vec<String>,
}

/// Attribute rows for a comparison table: description, price, categories,
/// tags and USPs.
pub fn comparison_rows(products: &[Product]) -> Vec<ComparisonRow> {
    vec![
        row("Description", products, |p| p.description.clone()),
        row("Price", products, |p| price_label(p.price)),
        row("Categories", products, |p| p.categories.join(", ")),
        row("Tags", products, |p| p.tags.join(", ")),
        row("USPs", products, |p| p.usps.join(", ")),
    ]
}

fn row(label: &'static str, products: &[Product], cell: impl Fn(&Product) -> String) -> ComparisonRow {
    ComparisonRow {
        label,
        cells: products.iter().map(cell).collect(),
    }
}

/// `$20` for a price, `N/A` when there is none (or it is zero).
pub fn price_label(price: Option<f64>) -> String {
    match price {
        Some(p) if p > 0.0 => format!("${p}"),
        _ => "N/A".to_string(),
    }
}
