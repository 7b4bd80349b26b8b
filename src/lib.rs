//! TeenTops storefront SDK for Rust.
//!
//! Client-side logic for the TeenTops teen-fashion shop: typed access to the
//! REST API, a session cart, size/color variant resolution, a three-step
//! checkout, the contact form and French/Arabic UI strings. Presentation is
//! left to the caller; this crate owns state, validation and I/O.
//!
//! # Quick start
//!
//! ```no_run
//! use teentops_sdk::checkout::{Checkout, Field};
//! use teentops_sdk::TeentopsSdk;
//!
//! let sdk = TeentopsSdk::builder()
//!     .base_url("http://localhost:8000/api")
//!     .build()
//!     .unwrap();
//! let t = sdk.translator();
//!
//! // Pick a variant and put it in the cart
//! let selector = sdk.selector("graphic-tee").unwrap();
//! let mut cart = sdk.new_cart().unwrap();
//! selector.add_to_cart(&mut cart);
//!
//! // Check out
//! let mut details = Checkout::from_cart(&cart).unwrap();
//! details.set_field(Field::CustomerName, "Amira");
//! // ... remaining fields
//! if let Ok(review) = details.continue_to_review(&t) {
//!     println!("total: {}", review.formatted_total());
//!     match review.submit(sdk.client(), &mut cart, &t) {
//!         Ok(success) => println!("order {}", success.order_id()),
//!         // `failure.checkout` is still in review and can be resubmitted
//!         Err(failure) => eprintln!("{}", failure.message),
//!     }
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod i18n;
pub mod models;
pub mod queries;
pub mod route;
pub mod selection;

#[cfg(feature = "async")]
pub use async_client::AsyncTeentopsSdk;
pub use cache::CartCache;
pub use cart::{CartLineItem, CartStore, SharedCart};
pub use client::{ApiClient, Backend};
pub use error::{Result, StorefrontError};
pub use i18n::{Language, Translator};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::selection::VariantSelector;

// ---------------------------------------------------------------------------
// TeentopsSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`TeentopsSdk`] instance.
pub struct TeentopsSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    language: Language,
    cache_dir: Option<PathBuf>,
    persist_cart: bool,
}

impl Default for TeentopsSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            language: Language::default(),
            cache_dir: None,
            persist_cart: false,
        }
    }
}

impl TeentopsSdkBuilder {
    /// Set the API base URL, e.g. `https://shop.example/api`.
    ///
    /// If not set, `TEENTOPS_API_BASE_URL` is consulted, then
    /// `http://localhost:8000/api`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Initial UI language. Defaults to French.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Directory for the cart snapshot. Implies nothing unless
    /// [`persist_cart`](Self::persist_cart) is enabled.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the cart on disk between sessions. Defaults to `false`, in which
    /// case the cart lives only as long as the [`CartStore`].
    pub fn persist_cart(mut self, persist: bool) -> Self {
        self.persist_cart = persist;
        self
    }

    /// Build the SDK. Fails on an invalid base URL or an unusable cache
    /// directory; no request is made.
    pub fn build(self) -> Result<TeentopsSdk> {
        let base_url = self
            .base_url
            .or_else(config::api_base_from_env)
            .unwrap_or_else(|| config::DEFAULT_API_BASE.to_string());
        let client = ApiClient::new(&base_url, self.timeout)?;
        let cart_cache = if self.persist_cart {
            Some(CartCache::new(self.cache_dir)?)
        } else {
            None
        };
        Ok(TeentopsSdk {
            client,
            language: self.language,
            cart_cache,
        })
    }
}

// ---------------------------------------------------------------------------
// TeentopsSdk
// ---------------------------------------------------------------------------

/// The main entry point: an API client plus session settings.
///
/// Query interfaces are lightweight wrappers borrowing the client. Stateful
/// pieces (cart, checkout, selectors) are separate values the caller owns.
pub struct TeentopsSdk {
    client: ApiClient,
    language: Language,
    cart_cache: Option<CartCache>,
}

impl TeentopsSdk {
    pub fn builder() -> TeentopsSdkBuilder {
        TeentopsSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.client)
    }

    pub fn categories(&self) -> queries::CategoryQuery<'_> {
        queries::CategoryQuery::new(&self.client)
    }

    pub fn orders(&self) -> queries::OrderQuery<'_> {
        queries::OrderQuery::new(&self.client)
    }

    pub fn reviews(&self) -> queries::ReviewQuery<'_> {
        queries::ReviewQuery::new(&self.client)
    }

    pub fn contact(&self) -> queries::ContactQuery<'_> {
        queries::ContactQuery::new(&self.client)
    }

    /// The HTTP client, usable anywhere a [`Backend`] is expected.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // -- Session state -----------------------------------------------------

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }

    /// Fetch a product by slug and open a variant selector on it.
    pub fn selector(&self, slug: &str) -> Result<VariantSelector> {
        Ok(VariantSelector::new(self.client.get_product(slug)?))
    }

    /// A cart for this session. With persistence enabled it starts from the
    /// saved snapshot and writes every change back to disk.
    pub fn new_cart(&self) -> Result<CartStore> {
        let mut cart = CartStore::new();
        if let Some(cache) = &self.cart_cache {
            cart.restore(cache.load()?);
            let cache = cache.clone();
            cart.subscribe(move |cart| {
                if let Err(e) = cache.save(&cart.snapshot()) {
                    warn!(error = %e, "failed to save cart snapshot");
                }
            });
        }
        Ok(cart)
    }

    /// Write the cart to disk now. A no-op when persistence is disabled.
    pub fn save_cart(&self, cart: &CartStore) -> Result<()> {
        match &self.cart_cache {
            Some(cache) => cache.save(&cart.snapshot()),
            None => Ok(()),
        }
    }

    pub fn cart_cache(&self) -> Option<&CartCache> {
        self.cart_cache.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for TeentopsSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TeentopsSdk(base_url={}, language={}, persist_cart={})",
            self.client.base_url(),
            self.language,
            self.cart_cache.is_some()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_uses_explicit_base_url() {
        let sdk = TeentopsSdk::builder()
            .base_url("http://shop.test/api/")
            .language(Language::Ar)
            .build()
            .unwrap();
        assert_eq!(sdk.client().base_url(), "http://shop.test/api");
        assert_eq!(sdk.translator().language(), Language::Ar);
        assert!(sdk.cart_cache().is_none());
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        let err = TeentopsSdk::builder().base_url("::nope").build().err().unwrap();
        assert!(matches!(err, StorefrontError::InvalidArgument(_)));
    }

    #[test]
    fn persistent_cart_survives_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let build = || {
            TeentopsSdk::builder()
                .base_url("http://shop.test/api")
                .cache_dir(dir.path())
                .persist_cart(true)
                .build()
                .unwrap()
        };
        let product: models::Product = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Tee", "slug": "tee", "base_price": "10.00",
            "variants": [{"id": 5, "size": "M", "color": "white", "price": "10.00", "stock_quantity": 2}]
        }))
        .unwrap();

        {
            let sdk = build();
            let mut cart = sdk.new_cart().unwrap();
            cart.add_item(&product, &product.variants[0], 2);
        }

        let sdk = build();
        let cart = sdk.new_cart().unwrap();
        assert_eq!(cart.item_count(), 2);
        assert!(sdk.to_string().contains("persist_cart=true"));
    }
}
