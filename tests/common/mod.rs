//! Shared test fixtures for the TeenTops SDK integration tests.
//!
//! Provides an in-memory [`FakeBackend`] that records what the flows send and
//! can be told to fail, plus a few sample products.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use teentops_sdk::models::{
    ContactAck, ContactMessage, Order, OrderPayload, OrderStatus, Product, Variant,
};
use teentops_sdk::{Backend, Result, StorefrontError};

/// In-memory stand-in for the REST API.
#[derive(Default)]
pub struct FakeBackend {
    pub products: Vec<Product>,
    pub fail: bool,
    pub orders: Mutex<Vec<OrderPayload>>,
    pub messages: Mutex<Vec<ContactMessage>>,
    next_id: AtomicU64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            products: vec![crop_top(), graphic_tee()],
            ..Default::default()
        }
    }

    /// A backend whose every call answers HTTP 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn last_order(&self) -> Option<OrderPayload> {
        self.orders.lock().unwrap().last().cloned()
    }

    fn check(&self, path: &str) -> Result<()> {
        if self.fail {
            return Err(StorefrontError::Status {
                status: 500,
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

impl Backend for FakeBackend {
    fn get_product(&self, slug: &str) -> Result<Product> {
        self.check(&format!("/products/{}/", slug))?;
        self.products
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| StorefrontError::Status {
                status: 404,
                path: format!("/products/{}/", slug),
            })
    }

    fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>> {
        self.check(&format!("/products/{}/variants/", product_id))?;
        Ok(self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.variants.clone())
            .unwrap_or_default())
    }

    fn create_order(&self, payload: &OrderPayload) -> Result<Order> {
        self.check("/orders/create/")?;
        self.orders.lock().unwrap().push(payload.clone());
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Order {
            id: Some(n),
            order_id: format!("00000000-0000-4000-8000-{:012}", n),
            customer_name: payload.customer_name.clone(),
            customer_email: payload.customer_email.clone(),
            customer_phone: payload.customer_phone.clone(),
            address_line_1: payload.address_line_1.clone(),
            address_line_2: payload.address_line_2.clone(),
            city: payload.city.clone(),
            state: payload.state.clone(),
            postal_code: payload.postal_code.clone(),
            country: payload.country.clone(),
            status: OrderStatus::Pending,
            total_amount: None,
            notes: payload.notes.clone(),
            created_at: None,
            items: Vec::new(),
            full_address: None,
            total_items: Some(payload.order_items.iter().map(|i| i.quantity).sum()),
        })
    }

    fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck> {
        self.check("/orders/contact/")?;
        self.messages.lock().unwrap().push(message.clone());
        Ok(ContactAck {
            message: "Message sent".into(),
        })
    }
}

/// Variants `[{S,Red},{M,Red},{S,Blue}]`; `{M,Red}` is out of stock.
pub fn crop_top() -> Product {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "name": "Crop Top",
        "slug": "crop-top",
        "description": "Ribbed cotton crop top",
        "category": {"id": 2, "name": "Tops", "slug": "tops"},
        "base_price": "25.00",
        "min_price": "25.00",
        "max_price": "27.00",
        "available_sizes": ["S", "M"],
        "available_colors": ["Red", "Blue"],
        "images": [
            {"id": 1, "image": "/media/crop-red.jpg", "color": "Red", "is_primary": true},
            {"id": 2, "image": "/media/crop-blue.jpg", "color": "Blue"},
            {"id": 3, "image": "/media/crop-detail.jpg", "color": ""}
        ],
        "variants": [
            {"id": 10, "size": "S", "color": "Red", "sku": "CT-S-RED", "price": "25.00", "stock_quantity": 4},
            {"id": 11, "size": "M", "color": "Red", "sku": "CT-M-RED", "price": "27.00", "stock_quantity": 0},
            {"id": 12, "size": "S", "color": "Blue", "sku": "CT-S-BLUE", "price": "25.00", "stock_quantity": 2}
        ]
    }))
    .unwrap()
}

pub fn graphic_tee() -> Product {
    serde_json::from_value(serde_json::json!({
        "id": 2,
        "name": "Graphic Tee",
        "slug": "graphic-tee",
        "base_price": 19.99,
        "available_sizes": ["M"],
        "available_colors": ["Black"],
        "variants": [
            {"id": 20, "size": "M", "color": "Black", "price": "19.99", "stock_quantity": 10}
        ]
    }))
    .unwrap()
}
