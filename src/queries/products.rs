//! Product queries against `/products/`.

use rust_decimal::Decimal;

use crate::client::{ApiClient, Backend};
use crate::error::Result;
use crate::models::{Product, ProductSummary, Variant};

// ---------------------------------------------------------------------------
// SortOption
// ---------------------------------------------------------------------------

/// Sort orders offered by the catalog, mapped onto the backend `ordering` param.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    #[default]
    Newest,
    PriceLowHigh,
    PriceHighLow,
    NameAz,
}

impl SortOption {
    pub fn ordering(&self) -> &'static str {
        match self {
            SortOption::Newest => "-created_at",
            SortOption::PriceLowHigh => "base_price",
            SortOption::PriceHighLow => "-base_price",
            SortOption::NameAz => "name",
        }
    }

    /// Translation key for the option label.
    pub fn label_key(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest_first",
            SortOption::PriceLowHigh => "price_low_high",
            SortOption::PriceHighLow => "price_high_low",
            SortOption::NameAz => "name_az",
        }
    }

    pub fn all() -> [SortOption; 4] {
        [
            SortOption::Newest,
            SortOption::PriceLowHigh,
            SortOption::PriceHighLow,
            SortOption::NameAz,
        ]
    }
}

// ---------------------------------------------------------------------------
// Params
// ---------------------------------------------------------------------------

/// Parameters for [`ProductQuery::list`].
#[derive(Debug, Clone, Default)]
pub struct ListProductsParams {
    pub sort: Option<SortOption>,
    /// Category primary key, as a string. The list endpoint filters on the
    /// id, unlike search which takes the slug.
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl ListProductsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("ordering", self.sort.unwrap_or_default().ordering().to_string())];
        if let Some(ref category) = self.category {
            query.push(("category", category.clone()));
        }
        if let Some(featured) = self.featured {
            query.push(("featured", featured.to_string()));
        }
        query
    }
}

/// Parameters for [`ProductQuery::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchProductsParams {
    pub q: String,
    /// Category slug.
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SearchProductsParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("q", self.q.trim().to_string())];
        if let Some(ref category) = self.category {
            query.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            query.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("max_price", max.to_string()));
        }
        query
    }
}

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for the product catalog.
pub struct ProductQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List active products, newest first unless another sort is given.
    pub fn list(&self, params: &ListProductsParams) -> Result<Vec<ProductSummary>> {
        let path = self.client.endpoint("products")?;
        self.client.get_list(path, &params.to_query())
    }

    /// Fetch full product detail (variants, images, sizes, colors) by slug.
    pub fn get(&self, slug: &str) -> Result<Product> {
        self.client.get_product(slug)
    }

    /// List active variants of a product by numeric id.
    ///
    /// Used when a cart entry needs a variant but the detail has not been
    /// loaded.
    pub fn variants(&self, product_id: u64) -> Result<Vec<Variant>> {
        self.client.list_variants(product_id)
    }

    pub fn featured(&self) -> Result<Vec<ProductSummary>> {
        let path = self.client.endpoint("featured_products")?;
        self.client.get_list(path, &[])
    }

    /// Search by free text across name, description and category name.
    pub fn search(&self, params: &SearchProductsParams) -> Result<Vec<ProductSummary>> {
        let path = self.client.endpoint("search_products")?;
        self.client.get_list(path, &params.to_query())
    }
}
