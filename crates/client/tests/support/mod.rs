#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use toolscout_auth::{AuthSession, Credentials, Role};
use toolscout_client::{ClientConfig, ClientError, ProductApi};
use toolscout_core::ProductId;
use toolscout_products::{FilterOptions, Product};

pub const PASSWORD: &str = "correct-horse";

/// In-process directory API on an ephemeral port.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

#[derive(Clone)]
struct StubState {
    products: Arc<Vec<Value>>,
    requests: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl StubServer {
    pub async fn spawn() -> Self {
        Self::start(fixture_products(), false).await
    }

    /// Server listing `products` verbatim, valid or not.
    pub async fn with_products(products: Vec<Value>) -> Self {
        Self::start(products, false).await
    }

    /// Server answering every request with `500`.
    pub async fn failing() -> Self {
        Self::start(fixture_products(), true).await
    }

    async fn start(products: Vec<Value>, failing: bool) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            products: Arc::new(products),
            requests: Arc::clone(&requests),
            failing,
        };

        let app = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/trending", get(trending))
            .route("/api/products/compare", post(compare))
            .route("/api/products/:id", get(product_detail))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            requests,
            handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).unwrap()
    }

    /// Path and query of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_config() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ClientConfig::new(&format!("http://{}", addr)).unwrap()
}

pub fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

pub fn id(value: &str) -> ProductId {
    ProductId::new(value).unwrap()
}

pub fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "_id": "p-1",
            "name": "Perplexity",
            "description": "Answer engine with cited sources",
            "categories": ["search", "ai-assistant"],
            "tags": ["research", "citations"],
            "usps": ["Cited answers"],
            "features": [{ "name": "Sources", "description": "Links every claim" }],
            "reviews": [
                { "user": "Ana", "rating": 5, "comment": "Great", "date": "2024-02-01" },
                { "user": "Ben", "rating": 3, "comment": "Okay", "date": "2024-02-03" }
            ],
            "gallery": [],
            "price": 20,
            "purchaseLink": "https://perplexity.ai",
            "popularity": 80
        }),
        json!({
            "_id": "p-2",
            "name": "Copilot",
            "description": "Pair programmer in the editor",
            "categories": ["coding"],
            "tags": ["code", "ide"],
            "usps": [],
            "features": [],
            "reviews": [],
            "gallery": [],
            "price": 10,
            "popularity": 90
        }),
        json!({
            "_id": "p-3",
            "name": "Gemini",
            "description": "Multimodal chat assistant",
            "categories": ["chatbot", "ai-assistant"],
            "tags": ["multimodal", "google"],
            "usps": [],
            "features": [],
            "reviews": [
                { "user": "Cy", "rating": 4, "comment": "Solid", "date": "2024-03-10" }
            ],
            "gallery": [],
            "popularity": 85
        }),
    ]
}

fn record(state: &StubState, uri: &Uri) {
    state.requests.lock().unwrap().push(uri.to_string());
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response()
}

fn has_category(product: &Value, category: &str) -> bool {
    product["categories"]
        .as_array()
        .is_some_and(|cs| cs.iter().any(|c| c == category))
}

fn matches_search(product: &Value, query: &str) -> bool {
    let query = query.to_lowercase();
    ["name", "description"].iter().any(|field| {
        product[*field]
            .as_str()
            .is_some_and(|v| v.to_lowercase().contains(&query))
    })
}

async fn list_products(
    State(state): State<StubState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &uri);
    if state.failing {
        return server_error();
    }

    let products: Vec<&Value> = state
        .products
        .iter()
        .filter(|p| params.get("category").is_none_or(|c| has_category(p, c)))
        .filter(|p| params.get("search").is_none_or(|q| matches_search(p, q)))
        .collect();
    axum::Json(json!(products)).into_response()
}

async fn trending(
    State(state): State<StubState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &uri);
    if state.failing {
        return server_error();
    }

    let limit = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(5);
    let mut products: Vec<&Value> = state
        .products
        .iter()
        .filter(|p| params.get("category").is_none_or(|c| has_category(p, c)))
        .collect();
    products.sort_by(|a, b| {
        let popularity = |v: &Value| v["popularity"].as_f64().unwrap_or_default();
        popularity(b).total_cmp(&popularity(a))
    });
    products.truncate(limit);
    axum::Json(json!(products)).into_response()
}

async fn product_detail(
    State(state): State<StubState>,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    record(&state, &uri);
    if state.failing {
        return server_error();
    }

    match state.products.iter().find(|p| p["_id"] == id.as_str()) {
        Some(product) => axum::Json(product.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, axum::Json(json!({ "message": "Product not found" })))
            .into_response(),
    }
}

async fn compare(
    State(state): State<StubState>,
    uri: Uri,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    record(&state, &uri);
    if state.failing {
        return server_error();
    }

    let ids: Vec<&str> = body["ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let products: Vec<&Value> = ids
        .iter()
        .filter_map(|id| state.products.iter().find(|p| p["_id"] == *id))
        .collect();
    axum::Json(json!({ "products": products })).into_response()
}

async fn login(
    State(state): State<StubState>,
    uri: Uri,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    record(&state, &uri);
    if body["password"] != PASSWORD {
        return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response();
    }
    axum::Json(json!({
        "token": "stub-token",
        "user": { "_id": "u-1", "email": body["email"], "role": "user" }
    }))
    .into_response()
}

async fn register(
    State(state): State<StubState>,
    uri: Uri,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    record(&state, &uri);
    if body["email"] == "taken@example.com" {
        return (StatusCode::CONFLICT, "Email already registered").into_response();
    }
    (
        StatusCode::CREATED,
        axum::Json(json!({
            "token": "stub-token",
            "user": { "_id": "u-2", "email": body["email"], "role": body["role"] }
        })),
    )
        .into_response()
}

/// Scripted [`ProductApi`] counting calls, for state tests.
#[derive(Default)]
pub struct FakeApi {
    pub products: Vec<Product>,
    pub fail_with: Option<ClientError>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub fn failing(err: ClientError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    /// Operation names (with their main argument) in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<T>(&self, call: String, ok: impl FnOnce() -> T) -> Result<T, ClientError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(ok()),
        }
    }
}

#[async_trait]
impl ProductApi for FakeApi {
    async fn list_products(&self, options: &FilterOptions) -> Result<Vec<Product>, ClientError> {
        let call = format!("list:{}", options.category().unwrap_or_default());
        self.answer(call, || self.products.clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        self.calls.lock().unwrap().push(format!("get:{id}"));
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn list_trending(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Product>, ClientError> {
        let call = format!("trending:{}:{limit}", category.unwrap_or_default());
        self.answer(call, || self.products.iter().take(limit).cloned().collect())
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        self.answer(format!("search:{query}"), || {
            self.products
                .iter()
                .filter(|p| p.matches_search(query))
                .cloned()
                .collect()
        })
    }

    async fn compare_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, ClientError> {
        let joined: Vec<&str> = ids.iter().map(ProductId::as_str).collect();
        self.answer(format!("compare:{}", joined.join(",")), || {
            ids.iter()
                .filter_map(|id| self.products.iter().find(|p| &p.id == id))
                .cloned()
                .collect()
        })
    }

    async fn register(
        &self,
        credentials: &Credentials,
        _role: &Role,
    ) -> Result<AuthSession, ClientError> {
        self.answer(format!("register:{}", credentials.email), AuthSession::default)
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        self.answer(format!("login:{}", credentials.email), AuthSession::default)
    }
}
