use serde::{Deserialize, Serialize};

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub product: Option<u64>,
    #[serde(default)]
    pub product_name: String,
    pub customer_name: String,
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: Option<String>,
}

impl Review {
    /// Filled and empty stars, e.g. `★★★★☆` for a rating of 4.
    pub fn stars(&self) -> String {
        let filled = self.rating.min(MAX_RATING) as usize;
        let empty = MAX_RATING as usize - filled;
        format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(empty))
    }
}

/// Body for `POST /reviews/create/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub product: u64,
    pub customer_name: String,
    pub customer_email: String,
    pub rating: u8,
    pub title: String,
    pub review_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_clamp_to_five() {
        let mut review: Review = serde_json::from_value(serde_json::json!({
            "id": 1,
            "product": 2,
            "customer_name": "Yasmine",
            "rating": 4
        }))
        .unwrap();
        assert_eq!(review.stars(), "★★★★☆");
        review.rating = 9;
        assert_eq!(review.stars(), "★★★★★");
    }
}
