//! Admin-API payload types for the products and collections endpoints.
//!
//! These types both deserialize Shopify responses and serialize into the
//! aggregated catalog view, so image and variant objects pass through to the
//! consumer unchanged.
//!
//! Observed quirks worth keeping in mind:
//! - `body_html` may be `null`, absent, or an empty string.
//! - `product_type` is a plain string; empty string means "no type" and is
//!   treated as absent by classification.
//! - Collection member lists arrive inline as `products: [{id}, ...]` on both
//!   the curated (`custom_collections`) and rule-derived (`smart_collections`)
//!   endpoints.

use serde::{Deserialize, Serialize};

/// Top-level response from `GET .../products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
}

/// Top-level response from `GET .../custom_collections.json`.
#[derive(Debug, Deserialize)]
pub struct CustomCollectionsPage {
    pub custom_collections: Vec<Collection>,
}

/// Top-level response from `GET .../smart_collections.json`.
#[derive(Debug, Deserialize)]
pub struct SmartCollectionsPage {
    pub smart_collections: Vec<Collection>,
}

/// A single product from the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product ID; stringified wherever it is used as a key.
    pub id: i64,

    pub title: String,

    /// Raw HTML product description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,

    /// Free-text category string; empty string is treated as absent.
    #[serde(default)]
    pub product_type: Option<String>,

    /// URL slug for the product page.
    #[serde(default)]
    pub handle: Option<String>,

    #[serde(default)]
    pub vendor: Option<String>,

    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A single purchasable variant of a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,

    /// Display title, e.g. a size or finish; `"Default Title"` for
    /// single-variant products.
    pub title: String,

    /// Stock-keeping unit. Present but may be an empty string on some stores.
    #[serde(default)]
    pub sku: Option<String>,

    /// Current price as a decimal string (e.g. `"129.00"`). Passed through
    /// verbatim; this service does no price arithmetic.
    pub price: String,

    #[serde(default)]
    pub compare_at_price: Option<String>,

    /// 1-based position; `1` is the storefront-default variant.
    #[serde(default)]
    pub position: Option<i32>,
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub id: Option<i64>,
    /// Canonical CDN URL.
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

/// A named grouping of catalog items, curated or rule-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub title: String,
    pub handle: String,
    /// Inline member references. Absent on collections with no products.
    #[serde(default)]
    pub products: Vec<CollectionMember>,
}

/// A member reference inside a [`Collection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMember {
    pub id: i64,
}
