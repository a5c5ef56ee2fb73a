//! The merged per-product output records.

use serde::Serialize;

use storelink_core::LinkRecord;
use storelink_shopify::{Image, Variant};

/// Summary of one collection a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
}

/// One product as served to the consumer: the transient catalog item zipped
/// with its resolved category, collection memberships, and overlay links.
///
/// Field names are camelCase on the wire — the shape the storefront consumer
/// already binds to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    /// Product identifier, stringified for stable keying across systems.
    pub id: String,
    pub title: String,
    /// Raw HTML description; empty string when the source had none.
    pub description: String,
    pub images: Vec<Image>,
    pub variants: Vec<Variant>,
    pub category: String,
    pub collections: Vec<CollectionSummary>,
    pub platform_links: LinkRecord,
}
