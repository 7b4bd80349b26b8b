//! Async wrapper around [`TeentopsSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every SDK operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use teentops_sdk::selection::LoadGuard;
//! use teentops_sdk::AsyncTeentopsSdk;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncTeentopsSdk::builder().build().await.unwrap();
//!
//!     // Only the latest product fetch is applied
//!     let guard = LoadGuard::new();
//!     let ticket = guard.begin();
//!     let product = sdk.product("graphic-tee").await.unwrap();
//!     guard.apply(ticket, product, |p| println!("showing {}", p.name));
//!
//!     // Any sync SDK method via closure
//!     let featured = sdk.run(|s| s.products().featured()).await.unwrap();
//!     println!("{} featured", featured.len());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{Result, StorefrontError};
use crate::i18n::Language;
use crate::models::{Category, ContactAck, ContactMessage, Order, OrderPayload, Product, ProductSummary};
use crate::queries::ListProductsParams;
use crate::TeentopsSdk;

// ---------------------------------------------------------------------------
// AsyncTeentopsSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncTeentopsSdk`] instance.
#[derive(Default)]
pub struct AsyncTeentopsSdkBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    language: Language,
    cache_dir: Option<PathBuf>,
    persist_cart: bool,
}

impl AsyncTeentopsSdkBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn persist_cart(mut self, persist: bool) -> Self {
        self.persist_cart = persist;
        self
    }

    /// Build the async SDK. The blocking HTTP client is created on the
    /// blocking pool, never on an async worker.
    pub async fn build(self) -> Result<AsyncTeentopsSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = TeentopsSdk::builder()
                .language(self.language)
                .persist_cart(self.persist_cart);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncTeentopsSdk {
                inner: Arc::new(RwLock::new(sdk)),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncTeentopsSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`TeentopsSdk`].
///
/// Cheap to clone; clones share one SDK. Reads run concurrently, only
/// [`set_language`](Self::set_language) takes the write lock.
#[derive(Clone)]
pub struct AsyncTeentopsSdk {
    inner: Arc<RwLock<TeentopsSdk>>,
}

impl AsyncTeentopsSdk {
    pub fn builder() -> AsyncTeentopsSdkBuilder {
        AsyncTeentopsSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use teentops_sdk::AsyncTeentopsSdk;
    /// # async fn example() -> teentops_sdk::Result<()> {
    /// # let sdk = AsyncTeentopsSdk::builder().build().await?;
    /// let reviews = sdk.run(|s| s.reviews().featured()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&TeentopsSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .read()
                .map_err(|_| StorefrontError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(join_error)?
    }

    pub async fn product(&self, slug: &str) -> Result<Product> {
        let slug = slug.to_string();
        self.run(move |s| s.products().get(&slug)).await
    }

    pub async fn products(&self, params: ListProductsParams) -> Result<Vec<ProductSummary>> {
        self.run(move |s| s.products().list(&params)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.run(|s| s.categories().list()).await
    }

    pub async fn create_order(&self, payload: OrderPayload) -> Result<Order> {
        self.run(move |s| s.orders().create(&payload)).await
    }

    pub async fn submit_contact(&self, message: ContactMessage) -> Result<ContactAck> {
        self.run(move |s| s.contact().submit(&message)).await
    }

    pub async fn set_language(&self, language: Language) -> Result<()> {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sdk
                .write()
                .map_err(|_| StorefrontError::InvalidArgument("SDK lock poisoned".into()))?;
            guard.set_language(language);
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    /// Drop this handle on the blocking pool, so the last reference to the
    /// blocking HTTP client is never released on an async worker.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self))
            .await
            .map_err(join_error)
    }
}

fn join_error(e: tokio::task::JoinError) -> StorefrontError {
    StorefrontError::InvalidArgument(format!("Task join error: {e}"))
}
