//! Debounced search suggestions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::catalog::CatalogService;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSnapshot {
    pub query: String,
    pub suggestions: Vec<String>,
    pub loading: bool,
}

struct SuggestionInner {
    catalog: CatalogService,
    debouncer: Debouncer,
    snapshot: watch::Sender<SuggestionSnapshot>,
}

/// Suggestion list that follows a search query.
///
/// Lookups run `delay` after the last query change; only the latest query is
/// ever fetched.
#[derive(Clone)]
pub struct SuggestionState {
    inner: Arc<SuggestionInner>,
}

impl SuggestionState {
    pub fn new(catalog: CatalogService, delay: Duration) -> Self {
        let (snapshot, _) = watch::channel(SuggestionSnapshot::default());
        Self {
            inner: Arc::new(SuggestionInner {
                catalog,
                debouncer: Debouncer::new(delay),
                snapshot,
            }),
        }
    }

    /// Suggestions debounced by the configured delay.
    pub fn from_config(catalog: CatalogService, config: &ClientConfig) -> Self {
        let delay = config.suggestion_debounce();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "suggestion debounce configured");
        Self::new(catalog, delay)
    }

    /// Update the query. Must be called from within a tokio runtime.
    ///
    /// Setting the query it already holds is a no-op; its lookup was
    /// scheduled when it was first set.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        if !query.is_empty() && self.inner.snapshot.borrow().query == query {
            tracing::trace!(%query, "suggestion query unchanged");
            return;
        }
        self.inner.debouncer.cancel();

        if query.is_empty() {
            self.inner.snapshot.send_modify(|s| {
                s.query.clear();
                s.suggestions.clear();
                s.loading = false;
            });
            return;
        }

        self.inner.snapshot.send_modify(|s| s.query = query.clone());

        let inner = Arc::clone(&self.inner);
        self.inner.debouncer.schedule(async move {
            inner.snapshot.send_if_modified(|s| {
                let current = s.query == query;
                if current {
                    s.loading = true;
                }
                current
            });

            let suggestions = inner.catalog.search_suggestions(&query).await;

            let applied = inner.snapshot.send_if_modified(|s| {
                if s.query != query {
                    return false;
                }
                s.suggestions = suggestions;
                s.loading = false;
                true
            });
            if !applied {
                tracing::debug!(%query, "dropping suggestions for a stale query");
            }
        });
    }

    pub fn snapshot(&self) -> SuggestionSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionSnapshot> {
        self.inner.snapshot.subscribe()
    }
}

impl core::fmt::Debug for SuggestionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SuggestionState")
            .field("delay", &self.inner.debouncer.delay())
            .field("snapshot", &*self.inner.snapshot.borrow())
            .finish_non_exhaustive()
    }
}
