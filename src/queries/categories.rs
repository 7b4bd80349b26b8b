//! Category queries against `/products/categories/`.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Category;

/// Query interface for product categories.
pub struct CategoryQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoryQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All categories, ordered by name on the backend.
    pub fn list(&self) -> Result<Vec<Category>> {
        let path = self.client.endpoint("categories")?;
        self.client.get_list(path, &[])
    }

    /// Look up a category by slug among the listed categories.
    pub fn get(&self, slug: &str) -> Result<Option<Category>> {
        Ok(self.list()?.into_iter().find(|c| c.slug == slug))
    }
}
