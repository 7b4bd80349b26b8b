use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::config::DEFAULT_COUNTRY;
use crate::error::{Result, StorefrontError};
use crate::i18n::Translator;
use crate::models::{OrderItemPayload, OrderPayload};

use super::phone::normalize_phone;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// An editable checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
    Notes,
}

impl Field {
    /// Fields that must be non-blank before review, in display order.
    pub const REQUIRED: [Field; 7] = [
        Field::CustomerName,
        Field::CustomerPhone,
        Field::AddressLine1,
        Field::City,
        Field::State,
        Field::PostalCode,
        Field::Country,
    ];

    /// Wire name, matching the order payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::CustomerEmail => "customer_email",
            Field::CustomerPhone => "customer_phone",
            Field::AddressLine1 => "address_line_1",
            Field::AddressLine2 => "address_line_2",
            Field::City => "city",
            Field::State => "state",
            Field::PostalCode => "postal_code",
            Field::Country => "country",
            Field::Notes => "notes",
        }
    }

    /// Translation key for the "required" error, if the field is required.
    pub fn required_error_key(&self) -> Option<&'static str> {
        match self {
            Field::CustomerName => Some("name_required_error"),
            Field::CustomerPhone => Some("phone_required_error"),
            Field::AddressLine1 => Some("address_required_error"),
            Field::City => Some("city_required_error"),
            Field::State => Some("state_required_error"),
            Field::PostalCode => Some("postal_code_required_error"),
            Field::Country => Some("country_required_error"),
            Field::CustomerEmail | Field::AddressLine2 | Field::Notes => None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required_error_key().is_some()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Localized validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OrderDraft
// ---------------------------------------------------------------------------

/// Customer and delivery details collected before an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
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
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            address_line_1: String::new(),
            address_line_2: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            notes: String::new(),
        }
    }
}

impl OrderDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CustomerName => &self.customer_name,
            Field::CustomerEmail => &self.customer_email,
            Field::CustomerPhone => &self.customer_phone,
            Field::AddressLine1 => &self.address_line_1,
            Field::AddressLine2 => &self.address_line_2,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::PostalCode => &self.postal_code,
            Field::Country => &self.country,
            Field::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::CustomerName => &mut self.customer_name,
            Field::CustomerEmail => &mut self.customer_email,
            Field::CustomerPhone => &mut self.customer_phone,
            Field::AddressLine1 => &mut self.address_line_1,
            Field::AddressLine2 => &mut self.address_line_2,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::PostalCode => &mut self.postal_code,
            Field::Country => &mut self.country,
            Field::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Check every required field, producing one localized message per
    /// blank field.
    pub fn validate(&self, t: &Translator) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in Field::REQUIRED {
            if self.get(field).trim().is_empty() {
                if let Some(key) = field.required_error_key() {
                    errors.insert(field, t.t(key));
                }
            }
        }
        errors
    }

    /// [`validate`](Self::validate) as a `Result`, for callers that build
    /// payloads without going through [`Checkout`](super::Checkout).
    pub fn ensure_valid(&self, t: &Translator) -> Result<()> {
        let errors = self.validate(t);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StorefrontError::Validation(errors))
        }
    }

    /// Wire payload: the draft with a normalized phone plus one
    /// `{product_variant_id, quantity}` pair per line item.
    pub fn to_payload(&self, items: &[CartLineItem]) -> OrderPayload {
        OrderPayload {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            customer_phone: normalize_phone(&self.customer_phone),
            address_line_1: self.address_line_1.trim().to_string(),
            address_line_2: self.address_line_2.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
            notes: self.notes.trim().to_string(),
            order_items: items
                .iter()
                .map(|item| OrderItemPayload {
                    product_variant_id: item.variant_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn filled() -> OrderDraft {
        OrderDraft {
            customer_name: "Amira".into(),
            customer_phone: "58 055 337".into(),
            address_line_1: "12 Rue de Djerba".into(),
            city: "Medenine".into(),
            state: "Medenine".into(),
            postal_code: "4100".into(),
            ..OrderDraft::default()
        }
    }

    #[test]
    fn default_country_is_tunisia() {
        assert_eq!(OrderDraft::default().country, "Tunisia");
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let t = Translator::new(Language::Fr);
        let mut draft = filled();
        draft.city = "   ".into();
        draft.country.clear();
        let errors = draft.validate(&t);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(Field::City));
        assert!(errors.contains(Field::Country));
        assert_eq!(errors.get(Field::City), Some(t.t("city_required_error")));
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let t = Translator::default();
        assert!(filled().validate(&t).is_empty());
    }

    #[test]
    fn ensure_valid_reports_validation_error() {
        let t = Translator::default();
        assert!(filled().ensure_valid(&t).is_ok());
        let err = OrderDraft::default().ensure_valid(&t).unwrap_err();
        match err {
            StorefrontError::Validation(errors) => assert_eq!(errors.len(), 6),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn payload_normalizes_phone() {
        let payload = filled().to_payload(&[]);
        assert_eq!(payload.customer_phone, "+21658055337");
        assert_eq!(payload.country, "Tunisia");
        assert!(payload.order_items.is_empty());
    }

    #[test]
    fn errors_display_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::City, "required");
        errors.insert(Field::CustomerName, "required");
        assert_eq!(errors.to_string(), "customer_name: required; city: required");
    }
}
