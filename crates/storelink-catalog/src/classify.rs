//! Category resolution for catalog items.
//!
//! Precedence, first non-empty signal wins:
//! 1. the item's explicit `product_type`, if non-blank;
//! 2. the title of the first collection the item belongs to (curated sets
//!    come first in the merge order);
//! 3. a case-insensitive keyword scan of the item title against
//!    [`TITLE_RULES`];
//! 4. [`DEFAULT_CATEGORY`].
//!
//! The keyword table is a deliberately simple, order-sensitive rule chain —
//! the first matching row wins, so "Outdoor Floor Lamp" classifies as
//! `Outdoor`, not `Floor Lamps`. Consumers depend on these exact labels;
//! changing a row changes the served catalog.

use crate::view::CollectionSummary;

/// Label applied when no other signal matches.
pub const DEFAULT_CATEGORY: &str = "Home Decor";

/// Categories the title heuristic can produce that are always offered to the
/// consumer, whether or not the current catalog happens to contain them.
pub const INFERRED_CATEGORIES: &[&str] = &[
    "Lighting",
    "Furniture",
    "Outdoor",
    "Floor Lamps",
    "Pendants",
    "Home Decor",
];

/// Ordered (keywords, label) rules for the title scan. Evaluated
/// top-to-bottom; a row matches when any of its keywords occurs in the
/// lowercased title.
const TITLE_RULES: &[(&[&str], &str)] = &[
    (&["lamp", "light", "chandelier", "sconce"], "Lighting"),
    (&["table", "desk"], "Furniture"),
    (&["outdoor", "wall"], "Outdoor"),
    (&["floor"], "Floor Lamps"),
    (&["pendant"], "Pendants"),
    (&["ceiling"], "Ceiling Lights"),
    (&["bedroom", "nightstand"], "Bedroom"),
    (&["bathroom"], "Bathroom"),
    (&["kitchen"], "Kitchen"),
];

/// Scans the title against [`TITLE_RULES`] and returns the first matching
/// label, or [`DEFAULT_CATEGORY`].
#[must_use]
pub fn infer_from_title(title: &str) -> &'static str {
    let lowered = title.to_lowercase();
    TITLE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or(DEFAULT_CATEGORY, |(_, label)| label)
}

/// Resolves the category for one item through the full precedence chain.
#[must_use]
pub fn resolve_category(
    product_type: Option<&str>,
    collections: &[CollectionSummary],
    title: &str,
) -> String {
    if let Some(explicit) = product_type {
        if !explicit.trim().is_empty() {
            return explicit.to_owned();
        }
    }

    if let Some(first) = collections.first() {
        return first.title.clone();
    }

    infer_from_title(title).to_owned()
}
