//! Blocking HTTP client for the TeenTops REST API.
//!
//! Every request sends and receives JSON. A non-2xx response is turned into
//! [`StorefrontError::Status`]; the response body is logged at `debug` level
//! and never surfaced to end users.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config;
use crate::error::{Result, StorefrontError};
use crate::models::{ContactAck, ContactMessage, Order, OrderPayload, Product, Variant};

// ---------------------------------------------------------------------------
// Backend: the operations the stateful flows depend on
// ---------------------------------------------------------------------------

/// Backend operations used by the checkout, contact and product-detail flows.
///
/// [`ApiClient`] is the real implementation; tests substitute an in-memory
/// fake so the flows can be exercised without a server.
pub trait Backend {
    fn get_product(&self, slug: &str) -> Result<Product>;
    fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>>;
    fn create_order(&self, payload: &OrderPayload) -> Result<Order>;
    fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn get_product(&self, slug: &str) -> Result<Product> {
        (**self).get_product(slug)
    }

    fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>> {
        (**self).list_variants(product_id)
    }

    fn create_order(&self, payload: &OrderPayload) -> Result<Order> {
        (**self).create_order(payload)
    }

    fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck> {
        (**self).submit_contact(message)
    }
}

// ---------------------------------------------------------------------------
// Listing: paginated or bare list responses
// ---------------------------------------------------------------------------

/// List endpoints answer either `{"results": [...]}` or a bare array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Page { results } => results,
            Listing::Bare(items) => items,
        }
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Thin JSON wrapper over a blocking `reqwest` client bound to one base URL.
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl ApiClient {
    /// Create a client for the given API base (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| {
            StorefrontError::InvalidArgument(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Underlying HTTP client for requests not covered by the query wrappers.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Build the absolute URL for an API path plus optional query pairs.
    ///
    /// Query pairs with blank values are dropped, matching how the storefront
    /// omits unset filters.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let pairs = query.iter().filter(|(_, v)| !v.trim().is_empty());
        Url::parse_with_params(&raw, pairs)
            .map_err(|e| StorefrontError::InvalidArgument(format!("Invalid URL '{}': {}", raw, e)))
    }

    /// Resolve a named endpoint from [`config::endpoints`].
    pub fn endpoint(&self, name: &str) -> Result<&'static str> {
        config::endpoint(name)
            .ok_or_else(|| StorefrontError::NotFound(format!("Unknown endpoint: {}", name)))
    }

    /// `GET` a path and decode the JSON body.
    #[instrument(skip(self, query), level = "debug")]
    pub fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path, query)?;
        debug!(%url, "GET");
        let resp = self.client.get(url).send()?;
        let resp = check_status(resp, path)?;
        Ok(resp.json()?)
    }

    /// `GET` a list endpoint, accepting paginated or bare array responses.
    pub fn get_list<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let listing: Listing<T> = self.get_json(path, query)?;
        Ok(listing.into_vec())
    }

    /// `POST` a JSON body and decode the JSON response.
    #[instrument(skip(self, body), level = "debug")]
    pub fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        debug!(%url, "POST");
        let resp = self.client.post(url).json(body).send()?;
        let resp = check_status(resp, path)?;
        Ok(resp.json()?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Backend for ApiClient {
    fn get_product(&self, slug: &str) -> Result<Product> {
        let path = format!("/products/{}/", path_segment(slug)?);
        self.get_json(&path, &[])
    }

    fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>> {
        self.get_list(&format!("/products/{}/variants/", product_id), &[])
    }

    fn create_order(&self, payload: &OrderPayload) -> Result<Order> {
        self.post_json(self.endpoint("create_order")?, payload)
    }

    fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck> {
        self.post_json(self.endpoint("contact")?, message)
    }
}

/// Validate a slug or identifier before interpolating it into a path.
pub(crate) fn path_segment(value: &str) -> Result<&str> {
    let value = value.trim();
    if value.is_empty() || value.contains(['/', '?', '#']) || value.contains(char::is_whitespace) {
        return Err(StorefrontError::InvalidArgument(format!(
            "Invalid path segment: '{}'",
            value
        )));
    }
    Ok(value)
}

fn check_status(resp: Response, path: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    debug!(status = status.as_u16(), path, body = %body, "API error response");
    Err(StorefrontError::Status {
        status: status.as_u16(),
        path: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/api/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_keeps_api_prefix_and_drops_blank_params() {
        let url = client()
            .url(
                "/products/",
                &[("ordering", "-created_at".to_string()), ("category", String::new())],
            )
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/products/?ordering=-created_at");
    }

    #[test]
    fn url_encodes_search_terms() {
        let url = client()
            .url("/products/search/", &[("q", "crop top".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("q=crop+top"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidArgument(_)));
    }

    #[test]
    fn path_segment_rejects_separators() {
        assert!(path_segment("summer-dress").is_ok());
        assert!(path_segment("a/b").is_err());
        assert!(path_segment("  ").is_err());
        assert!(path_segment("x?y=1").is_err());
    }

    #[test]
    fn listing_accepts_both_shapes() {
        let page: Listing<u32> = serde_json::from_str(r#"{"count": 2, "results": [1, 2]}"#).unwrap();
        assert_eq!(page.into_vec(), vec![1, 2]);
        let bare: Listing<u32> = serde_json::from_str("[3]").unwrap();
        assert_eq!(bare.into_vec(), vec![3]);
    }
}
