use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// ProductSummary: Minimal product data returned by list/search endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub base_price: Decimal,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub main_image: Option<String>,
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<String>,
}

impl ProductSummary {
    /// Best image to show in a listing: the absolute URL if the backend
    /// built one, else the raw path.
    pub fn image(&self) -> Option<&str> {
        self.main_image_url
            .as_deref()
            .or(self.main_image.as_deref())
    }

    /// Lowest price across variants, falling back to the base price.
    pub fn display_price(&self) -> Decimal {
        self.min_price.unwrap_or(self.base_price)
    }
}

// ---------------------------------------------------------------------------
// ProductImage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: u64,
    #[serde(default)]
    pub image: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub alt_text: String,
    /// Color this image depicts. Blank means the image applies to every color.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub order: u32,
}

impl ProductImage {
    pub fn color_tag(&self) -> Option<&str> {
        let color = self.color.trim();
        (!color.is_empty()).then_some(color)
    }

    pub fn src(&self) -> &str {
        self.image_url.as_deref().unwrap_or(&self.image)
    }
}

// ---------------------------------------------------------------------------
// Variant: A purchasable size/color combination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: u64,
    pub size: String,
    pub color: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price_modifier: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Variant {
    /// Stock comes from `stock_quantity` alone; the backend's `is_in_stock`
    /// flag is the same rule and is not decoded.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

// ---------------------------------------------------------------------------
// Product: Full product detail including variants and images
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<Category>,
    pub base_price: Decimal,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub available_sizes: Vec<String>,
    #[serde(default)]
    pub available_colors: Vec<String>,
}

impl Product {
    pub fn variant(&self, id: u64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Primary image if one is flagged, else the first in display order.
    pub fn main_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|i| i.is_primary)
            .or_else(|| self.images.first())
            .map(ProductImage::src)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_detail_with_string_and_number_prices() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Oversized Hoodie",
            "slug": "oversized-hoodie",
            "description": "Soft fleece",
            "category": {"id": 1, "name": "Hoodies", "slug": "hoodies"},
            "base_price": "39.90",
            "min_price": 35,
            "max_price": "44.90",
            "images": [
                {"id": 1, "image": "/media/a.jpg", "image_url": null, "color": ""},
                {"id": 2, "image": "/media/b.jpg", "image_url": "http://x/b.jpg", "color": "black", "is_primary": true}
            ],
            "variants": [
                {"id": 11, "size": "M", "color": "black", "price": "39.90", "stock_quantity": 3}
            ],
            "available_sizes": ["M"],
            "available_colors": ["black"]
        }))
        .unwrap();

        assert_eq!(product.base_price, Decimal::new(3990, 2));
        assert_eq!(product.min_price, Some(Decimal::from(35)));
        assert_eq!(product.category_name(), Some("Hoodies"));
        assert_eq!(product.main_image(), Some("http://x/b.jpg"));
        assert_eq!(product.images[0].color_tag(), None);
        assert_eq!(product.images[1].color_tag(), Some("black"));
        assert!(product.variant(11).unwrap().is_in_stock());
        assert!(product.variant(12).is_none());
    }

    #[test]
    fn variant_stock_follows_quantity() {
        let variant: Variant = serde_json::from_value(serde_json::json!({
            "id": 11,
            "size": "M",
            "color": "Red",
            "sku": "CT-M-RED",
            "price_modifier": "0.00",
            "price": "25.00",
            "stock_quantity": 0,
            "is_active": true,
            "is_in_stock": true
        }))
        .unwrap();
        assert!(!variant.is_in_stock());

        let restocked = Variant {
            stock_quantity: 1,
            ..variant
        };
        assert!(restocked.is_in_stock());
    }

    #[test]
    fn summary_prefers_absolute_image_url() {
        let summary: ProductSummary = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Tee",
            "slug": "tee",
            "base_price": "10.00",
            "min_price": null,
            "main_image": "/media/t.jpg",
            "main_image_url": "http://cdn/t.jpg"
        }))
        .unwrap();
        assert_eq!(summary.image(), Some("http://cdn/t.jpg"));
        assert_eq!(summary.display_price(), Decimal::new(1000, 2));
        assert!(summary.is_active);
    }
}
