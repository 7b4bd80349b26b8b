//! Contact form state and submission.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::client::Backend;
use crate::i18n::Translator;
use crate::models::ContactMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

/// Outcome text shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(m) | Feedback::Error(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFlow {
    form: ContactMessage,
    errors: BTreeMap<ContactField, String>,
    feedback: Option<Feedback>,
}

impl ContactFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactMessage {
        &self.form
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.form.name = value,
            ContactField::Email => self.form.email = value,
            ContactField::Phone => self.form.phone = value,
            ContactField::Message => self.form.message = value,
        }
        self.errors.remove(&field);
    }

    fn validate(&mut self, t: &Translator) -> bool {
        self.errors.clear();
        if self.form.name.trim().is_empty() {
            self.errors
                .insert(ContactField::Name, t.t("contact_name_required_error").to_string());
        }
        if self.form.message.trim().is_empty() {
            self.errors
                .insert(ContactField::Message, t.t("contact_message_required_error").to_string());
        }
        self.errors.is_empty()
    }

    /// Send the message. Name and message are required; an incomplete form
    /// never reaches the backend. A successful send clears the form, a failed
    /// one keeps it for resubmission. Returns whether the message was sent.
    pub fn submit<B: Backend>(&mut self, backend: &B, t: &Translator) -> bool {
        self.feedback = None;
        if !self.validate(t) {
            return false;
        }
        match backend.submit_contact(&self.form) {
            Ok(_) => {
                info!("contact message sent");
                self.form = ContactMessage::default();
                self.feedback = Some(Feedback::Success(t.t("contact_success").to_string()));
                true
            }
            Err(e) => {
                warn!(error = %e, "contact submission failed");
                self.feedback = Some(Feedback::Error(t.t("contact_error").to_string()));
                false
            }
        }
    }
}
