mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use toolscout_client::config::SUGGEST_DEBOUNCE_ENV;
use toolscout_client::{
    CatalogService, ClientConfig, ClientError, ComparisonState, ListingRequest, ListingState,
    ProductFeed, SuggestionState,
};
use toolscout_products::{FilterOptions, Product, SampleCatalog};

use support::{FakeApi, id, names};

fn samples() -> Arc<SampleCatalog> {
    Arc::new(SampleCatalog::builtin())
}

fn fake_catalog(api: &Arc<FakeApi>) -> CatalogService {
    CatalogService::new(api.clone(), samples())
}

fn sample_api() -> Arc<FakeApi> {
    Arc::new(FakeApi::with_products(SampleCatalog::builtin().products().to_vec()))
}

#[tokio::test]
async fn compare_needs_two_selected_products() {
    let api = sample_api();
    let state = ComparisonState::new(fake_catalog(&api));

    assert!(state.add(id("1")));
    state.compare().await.unwrap();

    assert!(api.calls().is_empty());
    assert!(state.snapshot().compared.is_empty());
}

#[tokio::test]
async fn selection_is_capped_at_three() {
    let state = ComparisonState::new(fake_catalog(&sample_api()));

    for value in ["1", "2", "3"] {
        assert!(state.add(id(value)));
    }
    assert!(!state.add(id("4")));
    assert!(!state.add(id("2")));
    assert!(!state.remove(&id("9")));
    assert_eq!(state.snapshot().selected_ids(), &[id("1"), id("2"), id("3")]);

    assert!(state.remove(&id("2")));
    assert!(state.add(id("4")));
    assert_eq!(state.snapshot().selected_ids(), &[id("1"), id("3"), id("4")]);
}

#[tokio::test]
async fn compare_fetches_the_selection() {
    let api = sample_api();
    let state = ComparisonState::new(fake_catalog(&api));
    let mut updates = state.subscribe();

    state.add(id("3"));
    state.add(id("2"));
    state.compare().await.unwrap();

    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(api.calls(), vec!["compare:3,2"]);
    assert_eq!(names(&snapshot.compared), vec!["Claude", "Midjourney"]);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);

    let rows = snapshot.rows();
    assert_eq!(rows[1].label, "Price");
    assert_eq!(rows[1].cells, vec!["$25", "$30"]);
}

#[tokio::test]
async fn compare_failure_is_recorded_and_returned() {
    let api = Arc::new(FakeApi::failing(ClientError::NonSuccessStatus {
        status: 502,
        body: "bad gateway".into(),
    }));
    let state = ComparisonState::new(fake_catalog(&api));
    state.add(id("1"));
    state.add(id("2"));

    let err = state.compare().await.unwrap_err();
    assert!(matches!(err, ClientError::NonSuccessStatus { status: 502, .. }));

    let snapshot = state.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.compared.is_empty());
    assert_eq!(snapshot.error, Some(err.to_string()));
}

/// Feed over the samples; the "creative" category answers slowly.
#[derive(Default)]
struct SampleFeed {
    fetches: AtomicUsize,
    failing: AtomicBool,
}

#[async_trait]
impl ProductFeed for SampleFeed {
    async fn fetch_listing(&self, request: &ListingRequest) -> Result<Vec<Product>, ClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::NetworkUnavailable("connection refused".into()));
        }

        let catalog = SampleCatalog::builtin();
        match request {
            ListingRequest::Products(options) => {
                if options.category() == Some("creative") {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                Ok(catalog.filter(options))
            }
            ListingRequest::Trending { category, limit } => {
                Ok(catalog.trending(category.as_deref(), *limit))
            }
        }
    }
}

#[tokio::test]
async fn equivalent_options_do_not_refetch() {
    let feed = Arc::new(SampleFeed::default());
    let state = ListingState::new(feed.clone());

    assert!(state.load(FilterOptions::new().with_tags(["a", "b"])).await);
    assert!(!state.load(FilterOptions::new().with_tags(["a,b"])).await);
    assert_eq!(feed.fetches.load(Ordering::SeqCst), 1);

    assert!(state.refresh().await);
    assert_eq!(feed.fetches.load(Ordering::SeqCst), 2);

    assert!(state.load(FilterOptions::new().with_category("chatbot")).await);
    assert_eq!(feed.fetches.load(Ordering::SeqCst), 3);

    let snapshot = state.snapshot();
    assert_eq!(names(&snapshot.products), vec!["ChatGPT", "Claude"]);
    assert_eq!(snapshot.facets.categories, vec!["chatbot", "ai-assistant"]);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn refresh_without_a_request_does_nothing() {
    let feed = Arc::new(SampleFeed::default());
    let state = ListingState::new(feed.clone());

    assert!(!state.refresh().await);
    assert_eq!(feed.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_products() {
    let feed = Arc::new(SampleFeed::default());
    let state = ListingState::new(feed.clone());

    state.load(FilterOptions::new().with_category("chatbot")).await;
    feed.failing.store(true, Ordering::SeqCst);
    state.load(ListingRequest::trending(None)).await;

    let snapshot = state.snapshot();
    assert_eq!(names(&snapshot.products), vec!["ChatGPT", "Claude"]);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("network unavailable: connection refused")
    );
    assert!(!snapshot.loading);

    feed.failing.store(false, Ordering::SeqCst);
    state.refresh().await;
    let snapshot = state.snapshot();
    assert_eq!(snapshot.error, None);
    assert_eq!(names(&snapshot.products), vec!["ChatGPT", "Claude", "Midjourney"]);
}

#[tokio::test(start_paused = true)]
async fn superseded_response_is_discarded() {
    let feed = Arc::new(SampleFeed::default());
    let state = ListingState::new(feed.clone());

    let slow = {
        let state = state.clone();
        tokio::spawn(async move {
            state.load(FilterOptions::new().with_category("creative")).await
        })
    };
    tokio::task::yield_now().await;

    state.load(FilterOptions::new().with_category("chatbot")).await;
    assert!(slow.await.unwrap());

    assert_eq!(feed.fetches.load(Ordering::SeqCst), 2);
    assert_eq!(names(&state.snapshot().products), vec!["ChatGPT", "Claude"]);
}

#[tokio::test]
async fn catalog_feeds_trending_listings() {
    let api = sample_api();
    let state = ListingState::new(Arc::new(fake_catalog(&api)));

    state.load(ListingRequest::trending(Some("chatbot".into()))).await;
    assert_eq!(api.calls(), vec!["trending:chatbot:5"]);
    assert_eq!(state.snapshot().products.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn rapid_queries_fetch_only_the_last_one() {
    let api = sample_api();
    let state = SuggestionState::new(fake_catalog(&api), Duration::from_millis(300));

    for query in ["c", "ch", "chat"] {
        state.set_query(query);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(api.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(api.calls(), vec!["search:chat"]);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.query, "chat");
    assert_eq!(snapshot.suggestions[0], "ChatGPT");
    assert!(!snapshot.loading);
}

#[tokio::test(start_paused = true)]
async fn empty_query_clears_without_fetching() {
    let api = sample_api();
    let state = SuggestionState::new(fake_catalog(&api), Duration::from_millis(300));

    state.set_query("chat");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!state.snapshot().suggestions.is_empty());

    state.set_query("claude");
    state.set_query("");
    assert!(state.snapshot().suggestions.is_empty());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.calls(), vec!["search:chat"]);
    assert!(state.snapshot().suggestions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn repeating_a_query_fetches_once() {
    let api = sample_api();
    let state = SuggestionState::new(fake_catalog(&api), Duration::from_millis(300));

    state.set_query("chat");
    tokio::time::sleep(Duration::from_millis(400)).await;
    state.set_query("chat");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(api.calls(), vec!["search:chat"]);
    assert_eq!(state.snapshot().suggestions[0], "ChatGPT");

    state.set_query("chat");
    state.set_query("chat");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(api.calls(), vec!["search:chat"]);
}

#[tokio::test(start_paused = true)]
async fn suggestion_delay_comes_from_config() {
    let config = ClientConfig::from_lookup(|var| {
        (var == SUGGEST_DEBOUNCE_ENV).then(|| "50".to_string())
    })
    .unwrap();
    let api = sample_api();
    let state = SuggestionState::from_config(fake_catalog(&api), &config);

    state.set_query("chat");
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(api.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(api.calls(), vec!["search:chat"]);
}
