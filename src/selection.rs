//! Size/color variant resolution for the product detail view.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::cart::{CartLineItem, CartStore};
use crate::client::Backend;
use crate::error::{Result, StorefrontError};
use crate::models::{Product, ProductImage, Variant};

// ---------------------------------------------------------------------------
// Selection outputs
// ---------------------------------------------------------------------------

/// A resolved choice handed to the cart or straight to checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub product: Product,
    pub variant: Variant,
    pub quantity: u32,
}

impl Selection {
    pub fn line_item(&self) -> CartLineItem {
        CartLineItem::new(&self.product, &self.variant, self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayedImage<'a> {
    Image(&'a ProductImage),
    /// Nothing matches the selected color: show the product initial.
    Placeholder { initial: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// No variant matches the current size and color.
    Unavailable,
    InStock(u32),
    OutOfStock,
}

// ---------------------------------------------------------------------------
// VariantSelector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct VariantSelector {
    product: Product,
    index: HashMap<(String, String), usize>,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
    image_index: usize,
}

impl VariantSelector {
    /// Build a selector over a fully loaded product and preselect the first
    /// listed size and color.
    pub fn new(product: Product) -> Self {
        let index = product
            .variants
            .iter()
            .enumerate()
            .map(|(i, v)| ((v.size.clone(), v.color.clone()), i))
            .collect();

        let size = product
            .available_sizes
            .first()
            .or_else(|| product.variants.first().map(|v| &v.size))
            .cloned();
        let color = product
            .available_colors
            .first()
            .or_else(|| product.variants.first().map(|v| &v.color))
            .cloned();

        debug!(product = %product.slug, ?size, ?color, "variant selector opened");
        Self {
            product,
            index,
            size,
            color,
            quantity: 1,
            image_index: 0,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selected_size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn select_size(&mut self, size: impl Into<String>) {
        self.size = Some(size.into());
    }

    /// Changing the color always returns the gallery to its first image.
    pub fn select_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
        self.image_index = 0;
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub fn increment_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub fn decrement_quantity(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Distinct colors offered in the selected size, first-seen order.
    pub fn available_colors(&self) -> Vec<&str> {
        let size = self.size.as_deref();
        distinct(
            self.product
                .variants
                .iter()
                .filter(|v| Some(v.size.as_str()) == size)
                .map(|v| v.color.as_str()),
        )
    }

    /// Distinct sizes offered in the selected color, first-seen order.
    pub fn available_sizes(&self) -> Vec<&str> {
        let color = self.color.as_deref();
        distinct(
            self.product
                .variants
                .iter()
                .filter(|v| Some(v.color.as_str()) == color)
                .map(|v| v.size.as_str()),
        )
    }

    /// The variant matching both selected size and color, if one exists.
    pub fn resolved_variant(&self) -> Option<&Variant> {
        let key = (self.size.clone()?, self.color.clone()?);
        self.index.get(&key).map(|&i| &self.product.variants[i])
    }

    pub fn stock_status(&self) -> StockStatus {
        match self.resolved_variant() {
            None => StockStatus::Unavailable,
            Some(v) if v.is_in_stock() => StockStatus::InStock(v.stock_quantity),
            Some(_) => StockStatus::OutOfStock,
        }
    }

    pub fn can_proceed(&self) -> bool {
        matches!(self.stock_status(), StockStatus::InStock(_))
    }

    /// Hand off the current choice, or `None` when nothing purchasable is
    /// selected.
    pub fn proceed(&self) -> Option<Selection> {
        let variant = self.resolved_variant().filter(|v| v.is_in_stock())?;
        Some(Selection {
            product: self.product.clone(),
            variant: variant.clone(),
            quantity: self.quantity,
        })
    }

    /// Proceed straight into the cart. Returns false when nothing was added.
    pub fn add_to_cart(&self, cart: &mut CartStore) -> bool {
        match self.proceed() {
            Some(selection) => {
                cart.add_line(selection.line_item());
                true
            }
            None => false,
        }
    }

    // -- Gallery -----------------------------------------------------------

    /// Images for the selected color plus untagged ones. With no color
    /// selected every image is shown.
    pub fn filtered_images(&self) -> Vec<&ProductImage> {
        match self.color.as_deref() {
            Some(color) => self
                .product
                .images
                .iter()
                .filter(|img| img.color_tag().map_or(true, |tag| tag == color))
                .collect(),
            None => self.product.images.iter().collect(),
        }
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn displayed_image(&self) -> DisplayedImage<'_> {
        let images = self.filtered_images();
        match images.get(self.image_index).or(images.first()) {
            Some(img) => DisplayedImage::Image(*img),
            None => DisplayedImage::Placeholder {
                initial: self.product.name.chars().next().unwrap_or('?'),
            },
        }
    }

    pub fn next_image(&mut self) {
        let len = self.filtered_images().len();
        if len > 0 {
            self.image_index = (self.image_index + 1) % len;
        }
    }

    pub fn previous_image(&mut self) {
        let len = self.filtered_images().len();
        if len > 0 {
            self.image_index = (self.image_index + len - 1) % len;
        }
    }

    pub fn show_image(&mut self, index: usize) {
        if index < self.filtered_images().len() {
            self.image_index = index;
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Fallback when the detail record is not loaded
// ---------------------------------------------------------------------------

/// Pick a variant for a product whose detail has not been fetched, using the
/// variants endpoint. Prefers the first in-stock variant.
pub fn first_variant_fallback<B: Backend>(backend: &B, product_id: u64) -> Result<Variant> {
    let variants = backend.list_variants(product_id)?;
    let chosen = variants
        .iter()
        .find(|v| v.is_in_stock())
        .or(variants.first())
        .cloned();
    chosen.ok_or_else(|| StorefrontError::NotFound(format!("No variants for product {}", product_id)))
}

// ---------------------------------------------------------------------------
// LoadGuard
// ---------------------------------------------------------------------------

/// Discards results of superseded fetches.
///
/// Take a ticket before starting a fetch; apply the result only if
/// [`LoadGuard::is_current`] still holds. Opening another product (or
/// closing the view) issues a new ticket, invalidating older ones.
#[derive(Debug, Clone, Default)]
pub struct LoadGuard {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Run `apply` with `value` only if the ticket is still current.
    pub fn apply<T>(&self, ticket: LoadTicket, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current(ticket) {
            apply(value);
            true
        } else {
            debug!(ticket = ticket.0, "discarding stale load");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Crop Top",
            "slug": "crop-top",
            "base_price": "20.00",
            "available_sizes": ["S", "M"],
            "available_colors": ["Red", "Blue"],
            "images": [
                {"id": 1, "image": "/red.jpg", "color": "Red"},
                {"id": 2, "image": "/blue.jpg", "color": "Blue"},
                {"id": 3, "image": "/any.jpg", "color": ""}
            ],
            "variants": [
                {"id": 10, "size": "S", "color": "Red", "price": "20.00", "stock_quantity": 3},
                {"id": 11, "size": "M", "color": "Red", "price": "22.00", "stock_quantity": 0},
                {"id": 12, "size": "S", "color": "Blue", "price": "20.00", "stock_quantity": 1}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn defaults_and_availability() {
        let mut sel = VariantSelector::new(product());
        assert_eq!(sel.selected_size(), Some("S"));
        assert_eq!(sel.selected_color(), Some("Red"));
        assert_eq!(sel.available_colors(), vec!["Red", "Blue"]);
        sel.select_size("M");
        assert_eq!(sel.available_colors(), vec!["Red"]);
        assert_eq!(sel.available_sizes(), vec!["S", "M"]);
    }

    #[test]
    fn unmatched_pair_resolves_nothing() {
        let mut sel = VariantSelector::new(product());
        sel.select_size("M");
        sel.select_color("Blue");
        assert!(sel.resolved_variant().is_none());
        assert_eq!(sel.stock_status(), StockStatus::Unavailable);
        assert!(sel.proceed().is_none());
    }

    #[test]
    fn out_of_stock_blocks_proceed() {
        let mut sel = VariantSelector::new(product());
        sel.select_size("M");
        assert_eq!(sel.resolved_variant().map(|v| v.id), Some(11));
        assert_eq!(sel.stock_status(), StockStatus::OutOfStock);
        assert!(sel.proceed().is_none());
    }

    #[test]
    fn image_gallery_follows_color() {
        let mut sel = VariantSelector::new(product());
        let ids: Vec<u64> = sel.filtered_images().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);

        sel.next_image();
        assert_eq!(sel.image_index(), 1);
        sel.next_image();
        assert_eq!(sel.image_index(), 0);
        sel.previous_image();
        assert_eq!(sel.image_index(), 1);

        sel.select_color("Blue");
        assert_eq!(sel.image_index(), 0);
    }

    #[test]
    fn placeholder_uses_initial() {
        let mut p = product();
        p.images.clear();
        let sel = VariantSelector::new(p);
        assert_eq!(sel.displayed_image(), DisplayedImage::Placeholder { initial: 'C' });
    }

    #[test]
    fn quantity_never_below_one() {
        let mut sel = VariantSelector::new(product());
        sel.set_quantity(0);
        assert_eq!(sel.quantity(), 1);
        sel.decrement_quantity();
        assert_eq!(sel.quantity(), 1);
        sel.increment_quantity();
        assert_eq!(sel.proceed().unwrap().quantity, 2);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let guard = LoadGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!guard.is_current(first));

        let mut applied = Vec::new();
        assert!(!guard.apply(first, "a", |v| applied.push(v)));
        assert!(guard.apply(second, "b", |v| applied.push(v)));
        assert_eq!(applied, vec!["b"]);

        guard.cancel();
        assert!(!guard.is_current(second));
    }
}
