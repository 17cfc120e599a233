//! Raw access to the directory REST API.
//!
//! [`ProductApi`] is the seam between the catalog service and the network:
//! [`HttpProductApi`] talks to the real API, tests substitute their own
//! implementations. Nothing here falls back to sample data; that is the
//! catalog service's job.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use toolscout_auth::{AuthSession, Credentials, LoginRequest, RegisterRequest, Role};
use toolscout_core::ProductId;
use toolscout_products::{FilterOptions, Product};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Operations offered by the directory API.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET /api/products?{category,tags,sort,search,page,limit}`
    async fn list_products(&self, options: &FilterOptions) -> Result<Vec<Product>, ClientError>;

    /// `GET /api/products/{id}`; any non-success status is `NotFound`.
    async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError>;

    /// `GET /api/products/trending?{limit,category}`
    async fn list_trending(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Product>, ClientError>;

    /// `GET /api/products?search={query}`
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError>;

    /// `POST /api/products/compare` with `{ids}`
    async fn compare_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, ClientError>;

    /// `POST /api/auth/register` with `{email,password,role}`
    async fn register(
        &self,
        credentials: &Credentials,
        role: &Role,
    ) -> Result<AuthSession, ClientError>;

    /// `POST /api/auth/login` with `{email,password}`
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError>;
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    ids: &'a [ProductId],
}

#[derive(Deserialize)]
struct CompareResponse {
    products: Vec<serde_json::Value>,
}

/// `reqwest`-backed [`ProductApi`].
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpProductApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn products_url(&self, rest: &[&str]) -> Url {
        let mut segments = vec!["api", "products"];
        segments.extend_from_slice(rest);
        self.config.endpoint(&segments)
    }

    async fn fetch_products(&self, request: RequestBuilder) -> Result<Vec<Product>, ClientError> {
        let response = send(request).await?;
        let response = ensure_success(response).await?;
        let records: Vec<serde_json::Value> = decode(response).await?;
        Ok(decode_products(records))
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self, options: &FilterOptions) -> Result<Vec<Product>, ClientError> {
        let request = self
            .http
            .get(self.products_url(&[]))
            .query(&options.query_pairs());
        self.fetch_products(request).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        let url = self.products_url(&[id.as_str()]);
        let response = send(self.http.get(url)).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(product_id = %id, status = status.as_u16(), "product lookup failed");
            return Err(ClientError::NotFound(id.to_string()));
        }

        decode(response).await
    }

    async fn list_trending(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Product>, ClientError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query.push(("category", category.to_string()));
        }

        let request = self.http.get(self.products_url(&["trending"])).query(&query);
        self.fetch_products(request).await
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let request = self
            .http
            .get(self.products_url(&[]))
            .query(&[("search", query)]);
        self.fetch_products(request).await
    }

    async fn compare_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, ClientError> {
        let request = self
            .http
            .post(self.products_url(&["compare"]))
            .json(&CompareRequest { ids });

        let response = send(request).await?;
        let response = ensure_success(response).await?;
        let body: CompareResponse = decode(response).await?;
        Ok(decode_products(body.products))
    }

    async fn register(
        &self,
        credentials: &Credentials,
        role: &Role,
    ) -> Result<AuthSession, ClientError> {
        let request = self
            .http
            .post(self.config.endpoint(&["api", "auth", "register"]))
            .json(&RegisterRequest::new(credentials, role));
        auth_exchange(request).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        let request = self
            .http
            .post(self.config.endpoint(&["api", "auth", "login"]))
            .json(&LoginRequest::from(credentials));
        auth_exchange(request).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    request.send().await.map_err(ClientError::from)
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::NonSuccessStatus {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Convert each listed record, dropping the ones that are not valid products.
fn decode_products(records: Vec<serde_json::Value>) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("_id").and_then(serde_json::Value::as_str).map(str::to_owned);
            match serde_json::from_value::<Product>(record) {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::warn!(product_id = ?id, error = %err, "skipping invalid product record");
                    None
                }
            }
        })
        .collect()
}

async fn auth_exchange(request: RequestBuilder) -> Result<AuthSession, ClientError> {
    let response = send(request).await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::AuthFailure {
            status: status.as_u16(),
            message,
        });
    }
    decode(response).await
}
