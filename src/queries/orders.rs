//! Order queries against `/orders/`.

use tracing::info;

use crate::client::{path_segment, ApiClient, Backend};
use crate::error::Result;
use crate::models::{Order, OrderPayload};

/// Query interface for orders (cash on delivery, no authentication).
pub struct OrderQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an order. The backend prices each line from the variant and
    /// decrements stock; a stock shortfall comes back as a non-2xx status.
    pub fn create(&self, payload: &OrderPayload) -> Result<Order> {
        let order = self.client.create_order(payload)?;
        info!(order_id = %order.order_id, items = payload.order_items.len(), "order created");
        Ok(order)
    }

    /// Fetch an order by its public identifier.
    pub fn get(&self, order_id: &str) -> Result<Order> {
        let path = format!("/orders/{}/", path_segment(order_id)?);
        self.client.get_json(&path, &[])
    }
}
