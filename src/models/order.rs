use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Variant;

// ---------------------------------------------------------------------------
// OrderItemPayload / OrderPayload: Request body for `POST /orders/create/`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub product_variant_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub notes: String,
    pub order_items: Vec<OrderItemPayload>,
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Order: Order as echoed back by the backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub product_variant: Option<Variant>,
    pub quantity: u32,
    pub price: Decimal,
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<u64>,
    /// Public order identifier (a UUID string).
    pub order_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub address_line_1: String,
    #[serde(default)]
    pub address_line_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub full_address: Option<String>,
    pub total_items: Option<u32>,
}
