//! Merging of curated and rule-derived collection sets into a per-product
//! membership index.

use std::collections::HashMap;

use storelink_shopify::Collection;

use crate::view::CollectionSummary;

/// Builds the product-id → collection-memberships index.
///
/// Curated collections are concatenated before rule-derived ones, and that
/// order is what each product's membership list preserves: when the category
/// falls back to "first collection the product belongs to", a curated
/// grouping always beats a rule-derived one. Duplicate memberships in the
/// source data are kept as-is — no implicit de-duplication.
#[must_use]
pub fn merge_collections(
    curated: &[Collection],
    rule_derived: &[Collection],
) -> HashMap<String, Vec<CollectionSummary>> {
    let mut index: HashMap<String, Vec<CollectionSummary>> = HashMap::new();

    for collection in curated.iter().chain(rule_derived) {
        let summary = CollectionSummary {
            id: collection.id.to_string(),
            title: collection.title.clone(),
            handle: collection.handle.clone(),
        };
        for member in &collection.products {
            index
                .entry(member.id.to_string())
                .or_default()
                .push(summary.clone());
        }
    }

    index
}
