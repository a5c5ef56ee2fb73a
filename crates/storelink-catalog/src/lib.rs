pub mod classify;
pub mod merge;
pub mod mock;
pub mod service;
pub mod view;

pub use service::{CatalogError, CatalogService};
pub use view::{CollectionSummary, ProductView};
