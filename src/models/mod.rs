pub mod contact;
pub mod order;
pub mod price;
pub mod product;
pub mod review;

pub use contact::*;
pub use order::*;
pub use price::*;
pub use product::*;
pub use review::*;
