//! Product listing view model: category filter, sort and search.

use tracing::warn;

use crate::error::Result;
use crate::models::{Category, ProductSummary};
use crate::queries::{ListProductsParams, SearchProductsParams, SortOption};
use crate::TeentopsSdk;

/// What the catalog should fetch next.
#[derive(Debug, Clone)]
pub enum CatalogRequest {
    List(ListProductsParams),
    Search(SearchProductsParams),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductSummary>,
    categories: Vec<Category>,
    category: Option<Category>,
    sort: SortOption,
    search: String,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// `None` shows every category.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// A non-blank search goes to the search endpoint; otherwise the plain
    /// list is reloaded with the current filter and sort. The list endpoint
    /// filters on the category id, search on its slug.
    pub fn request(&self) -> CatalogRequest {
        if self.search.trim().is_empty() {
            CatalogRequest::List(ListProductsParams {
                sort: Some(self.sort),
                category: self.category.as_ref().map(|c| c.id.to_string()),
                featured: None,
            })
        } else {
            CatalogRequest::Search(SearchProductsParams {
                category: self.category.as_ref().map(|c| c.slug.clone()),
                ..SearchProductsParams::new(self.search.trim())
            })
        }
    }

    /// Store a fetch result. Failures become an empty list.
    pub fn apply_products(&mut self, result: Result<Vec<ProductSummary>>) {
        self.products = result.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load products");
            Vec::new()
        });
    }

    pub fn apply_categories(&mut self, result: Result<Vec<Category>>) {
        self.categories = result.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load categories");
            Vec::new()
        });
    }

    /// Fetch products for the current request plus the category list.
    pub fn refresh(&mut self, sdk: &TeentopsSdk) {
        let products = match self.request() {
            CatalogRequest::List(params) => sdk.products().list(&params),
            CatalogRequest::Search(params) => sdk.products().search(&params),
        };
        self.apply_products(products);
        self.apply_categories(sdk.categories().list());
    }
}
