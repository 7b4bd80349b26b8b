//! Review queries against `/reviews/`.

use crate::client::ApiClient;
use crate::error::{Result, StorefrontError};
use crate::models::{NewReview, Review, MAX_RATING};

/// Query interface for customer reviews.
pub struct ReviewQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> ReviewQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All approved reviews.
    pub fn list(&self) -> Result<Vec<Review>> {
        let path = self.client.endpoint("reviews")?;
        self.client.get_list(path, &[])
    }

    pub fn featured(&self) -> Result<Vec<Review>> {
        let path = self.client.endpoint("featured_reviews")?;
        self.client.get_list(path, &[])
    }

    pub fn for_product(&self, product_id: u64) -> Result<Vec<Review>> {
        self.client
            .get_list(&format!("/reviews/product/{}/", product_id), &[])
    }

    /// Submit a review. Ratings outside 1..=5 are rejected before any request.
    pub fn create(&self, review: &NewReview) -> Result<Review> {
        if !(1..=MAX_RATING).contains(&review.rating) {
            return Err(StorefrontError::InvalidArgument(format!(
                "Rating must be between 1 and {}, got {}",
                MAX_RATING, review.rating
            )));
        }
        let path = self.client.endpoint("create_review")?;
        self.client.post_json(path, review)
    }
}
