//! Query modules for the TeenTops SDK.
//!
//! Each module provides a query struct that borrows from an
//! [`ApiClient`](crate::client::ApiClient) and exposes typed methods for one
//! REST resource, returning `Result<T>` with models from [`crate::models`].

pub mod categories;
pub mod contact;
pub mod orders;
pub mod products;
pub mod reviews;

pub use categories::CategoryQuery;
pub use contact::ContactQuery;
pub use orders::OrderQuery;
pub use products::{ListProductsParams, ProductQuery, SearchProductsParams, SortOption};
pub use reviews::ReviewQuery;
