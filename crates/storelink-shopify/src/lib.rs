pub mod client;
pub mod error;
pub mod pagination;
pub mod transport;
pub mod types;

pub use client::ShopifyClient;
pub use error::ShopifyError;
pub use types::{Collection, Image, Product, Variant};
