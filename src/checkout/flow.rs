use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::cart::{CartLineItem, CartStore};
use crate::client::Backend;
use crate::error::{Result, StorefrontError};
use crate::i18n::Translator;
use crate::models::{format_price, Order, OrderPayload};
use crate::selection::Selection;

use super::form::{Field, FieldErrors, OrderDraft};

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Collecting customer and delivery details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details {
    errors: FieldErrors,
}

/// Read-only summary before submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    submit_error: Option<String>,
}

/// The backend accepted the order.
#[derive(Debug, Clone, PartialEq)]
pub struct Success {
    order: Order,
}

/// One row of the review summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLine {
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub subtotal: Decimal,
}

// ---------------------------------------------------------------------------
// Checkout<S>
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Checkout<S> {
    items: Vec<CartLineItem>,
    draft: OrderDraft,
    state: S,
}

impl<S> Checkout<S> {
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Σ price × quantity over the items being ordered.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    pub fn formatted_total(&self) -> String {
        format_price(self.total())
    }

    fn into_state<T>(self, state: T) -> Checkout<T> {
        Checkout {
            items: self.items,
            draft: self.draft,
            state,
        }
    }
}

impl Checkout<Details> {
    /// Start a checkout for the given items. An empty list is rejected.
    pub fn new(items: Vec<CartLineItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        Ok(Self {
            items,
            draft: OrderDraft::default(),
            state: Details::default(),
        })
    }

    /// Check out everything currently in the cart.
    pub fn from_cart(cart: &CartStore) -> Result<Self> {
        Self::new(cart.items().to_vec())
    }

    /// One-item checkout straight from the product detail view.
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            items: vec![selection.line_item()],
            draft: OrderDraft::default(),
            state: Details::default(),
        }
    }

    /// Prefill the form, e.g. from a previous order.
    pub fn with_draft(mut self, draft: OrderDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Update a field. Its error, if any, is cleared right away.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.state.errors.remove(field);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.state.errors.get(field)
    }

    /// Validate and move to review. On failure the errors are stored and the
    /// checkout comes back unchanged otherwise.
    pub fn continue_to_review(mut self, t: &Translator) -> std::result::Result<Checkout<Review>, Self> {
        let errors = self.draft.validate(t);
        if !errors.is_empty() {
            debug!(fields = errors.len(), "checkout details incomplete");
            self.state.errors = errors;
            return Err(self);
        }
        Ok(self.into_state(Review::default()))
    }
}

impl Checkout<Review> {
    pub fn lines(&self) -> Vec<CheckoutLine> {
        self.items
            .iter()
            .map(|item| CheckoutLine {
                product_name: item.product_name.clone(),
                size: item.size.clone(),
                color: item.color.clone(),
                quantity: item.quantity,
                subtotal: item.subtotal(),
            })
            .collect()
    }

    /// Localized message from the last failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        self.state.submit_error.as_deref()
    }

    pub fn payload(&self) -> OrderPayload {
        self.draft.to_payload(&self.items)
    }

    /// Return to the form with everything entered so far.
    pub fn back_to_details(self) -> Checkout<Details> {
        self.into_state(Details::default())
    }

    /// Place the order. On success the cart is cleared; on failure the
    /// checkout stays in review with a localized message and can be
    /// resubmitted.
    pub fn submit<B: Backend>(
        mut self,
        backend: &B,
        cart: &mut CartStore,
        t: &Translator,
    ) -> std::result::Result<Checkout<Success>, SubmitFailure> {
        let payload = self.payload();
        match backend.create_order(&payload) {
            Ok(order) => {
                info!(order_id = %order.order_id, items = payload.order_items.len(), "order placed");
                cart.clear();
                Ok(self.into_state(Success { order }))
            }
            Err(error) => {
                warn!(error = %error, "order submission failed");
                let message = t.t("failed_to_create_order").to_string();
                self.state.submit_error = Some(message.clone());
                Err(SubmitFailure {
                    checkout: self,
                    message,
                    error,
                })
            }
        }
    }
}

impl Checkout<Success> {
    pub fn order(&self) -> &Order {
        &self.state.order
    }

    pub fn order_id(&self) -> &str {
        &self.state.order.order_id
    }

    /// Leave the confirmation screen. The checkout is consumed, so its items
    /// and form are gone; the placed order is handed back as the completion
    /// notice. A new purchase starts from a fresh `Checkout::new`.
    pub fn close(self) -> Order {
        self.state.order
    }
}

/// A rejected submission. The checkout is handed back in review.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SubmitFailure {
    pub checkout: Checkout<Review>,
    /// Localized text for the user.
    pub message: String,
    #[source]
    pub error: StorefrontError,
}

// ---------------------------------------------------------------------------
// CheckoutFlow
// ---------------------------------------------------------------------------

/// The checkout in whichever step it is in.
///
/// Transition methods consume the flow and return the next one; a
/// transition that does not apply to the current step returns it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutFlow {
    Details(Checkout<Details>),
    Review(Checkout<Review>),
    Success(Checkout<Success>),
}

impl CheckoutFlow {
    pub fn new(items: Vec<CartLineItem>) -> Result<Self> {
        Checkout::new(items).map(CheckoutFlow::Details)
    }

    pub fn step_number(&self) -> u8 {
        match self {
            CheckoutFlow::Details(_) => 1,
            CheckoutFlow::Review(_) => 2,
            CheckoutFlow::Success(_) => 3,
        }
    }

    /// Translation key for the step heading.
    pub fn title_key(&self) -> &'static str {
        match self {
            CheckoutFlow::Details(_) => "checkout_details_title",
            CheckoutFlow::Review(_) => "review_order_title",
            CheckoutFlow::Success(_) => "order_confirmed_title",
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        match self {
            CheckoutFlow::Details(c) => c.draft(),
            CheckoutFlow::Review(c) => c.draft(),
            CheckoutFlow::Success(c) => c.draft(),
        }
    }

    /// Edit a field; only meaningful while collecting details.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self {
            CheckoutFlow::Details(c) => {
                c.set_field(field, value);
                true
            }
            _ => false,
        }
    }

    pub fn next(self, t: &Translator) -> Self {
        match self {
            CheckoutFlow::Details(c) => match c.continue_to_review(t) {
                Ok(review) => CheckoutFlow::Review(review),
                Err(details) => CheckoutFlow::Details(details),
            },
            other => other,
        }
    }

    pub fn back(self) -> Self {
        match self {
            CheckoutFlow::Review(c) => CheckoutFlow::Details(c.back_to_details()),
            other => other,
        }
    }

    pub fn submit<B: Backend>(self, backend: &B, cart: &mut CartStore, t: &Translator) -> Self {
        match self {
            CheckoutFlow::Review(c) => match c.submit(backend, cart, t) {
                Ok(success) => CheckoutFlow::Success(success),
                Err(failure) => CheckoutFlow::Review(failure.checkout),
            },
            other => other,
        }
    }

    /// Finish a completed flow. Any other step is handed back unchanged.
    pub fn close(self) -> std::result::Result<Order, Self> {
        match self {
            CheckoutFlow::Success(c) => Ok(c.close()),
            other => Err(other),
        }
    }
}
