//! Three-step checkout: Details, Review, Success.
//!
//! [`Checkout`] is a typestate machine; only the legal transitions exist as
//! methods. [`CheckoutFlow`] wraps the three states in an enum for callers
//! that keep the current step in a single field.

mod flow;
mod form;
mod phone;

pub use flow::{
    Checkout, CheckoutFlow, CheckoutLine, Details, Review, SubmitFailure, Success,
};
pub use form::{Field, FieldErrors, OrderDraft};
pub use phone::normalize_phone;
