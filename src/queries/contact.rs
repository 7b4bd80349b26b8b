//! Contact form submission and store contact details.

use tracing::info;

use crate::client::{ApiClient, Backend};
use crate::error::Result;
use crate::models::{ContactAck, ContactInfo, ContactMessage};

pub struct ContactQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> ContactQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn submit(&self, message: &ContactMessage) -> Result<ContactAck> {
        let ack = self.client.submit_contact(message)?;
        info!(name = %message.name, "contact message sent");
        Ok(ack)
    }

    /// Public address, email, phone and opening hours.
    pub fn info(&self) -> Result<ContactInfo> {
        let path = self.client.endpoint("contact_info")?;
        self.client.get_json(path, &[])
    }
}
