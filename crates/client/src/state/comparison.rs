//! Comparison selection state.

use std::sync::Arc;

use tokio::sync::watch;

use toolscout_core::ProductId;
use toolscout_products::{ComparisonRow, ComparisonSelection, Product, comparison_rows};

use crate::catalog::CatalogService;
use crate::error::ClientError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSnapshot {
    pub selection: ComparisonSelection,
    pub compared: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ComparisonSnapshot {
    pub fn selected_ids(&self) -> &[ProductId] {
        self.selection.ids()
    }

    /// Comparison table for the compared products.
    pub fn rows(&self) -> Vec<ComparisonRow> {
        comparison_rows(&self.compared)
    }
}

/// Up to three selected products and the records fetched for them.
#[derive(Debug, Clone)]
pub struct ComparisonState {
    catalog: CatalogService,
    snapshot: Arc<watch::Sender<ComparisonSnapshot>>,
}

impl ComparisonState {
    pub fn new(catalog: CatalogService) -> Self {
        let (snapshot, _) = watch::channel(ComparisonSnapshot::default());
        Self {
            catalog,
            snapshot: Arc::new(snapshot),
        }
    }

    /// Select `id`. No effect when already selected or the selection is full.
    pub fn add(&self, id: ProductId) -> bool {
        self.snapshot.send_if_modified(|s| s.selection.add(id))
    }

    /// Deselect `id`. No effect when not selected.
    pub fn remove(&self, id: &ProductId) -> bool {
        self.snapshot.send_if_modified(|s| s.selection.remove(id))
    }

    /// Fetch the selected products.
    ///
    /// Does nothing while fewer than two products are selected. On failure the
    /// previous comparison is kept and the error is both recorded in the
    /// snapshot and returned.
    pub async fn compare(&self) -> Result<(), ClientError> {
        let ids = {
            let current = self.snapshot.borrow();
            if !current.selection.is_comparable() {
                tracing::debug!(selected = current.selection.len(), "not enough products to compare");
                return Ok(());
            }
            current.selection.ids().to_vec()
        };

        self.snapshot.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.catalog.compare_products(&ids).await;

        let mut outcome = Ok(());
        self.snapshot.send_modify(|s| {
            s.loading = false;
            match result {
                Ok(products) => s.compared = products,
                Err(err) => {
                    tracing::warn!(error = %err, "comparison failed");
                    s.error = Some(err.to_string());
                    outcome = Err(err);
                }
            }
        });
        outcome
    }

    pub fn snapshot(&self) -> ComparisonSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ComparisonSnapshot> {
        self.snapshot.subscribe()
    }
}
