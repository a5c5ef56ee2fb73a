//! The fixed mock catalog.
//!
//! Served when no access token is configured, and under the lenient failure
//! policy when the remote fetch fails. The content is deterministic so that
//! consumers (and tests) can rely on stable ids and categories.

use storelink_shopify::types::{Image, Product, Variant};

fn product(id: i64, title: &str, product_type: Option<&str>, price: &str) -> Product {
    Product {
        id,
        title: title.to_owned(),
        body_html: Some(format!("<p>{title} from the demonstration catalog.</p>")),
        product_type: product_type.map(str::to_owned),
        handle: Some(title.to_lowercase().replace(' ', "-")),
        vendor: Some("Goldian".to_owned()),
        images: vec![Image {
            id: Some(id * 10),
            src: format!("https://cdn.example.com/mock/{id}.jpg"),
            alt: Some(title.to_owned()),
            position: Some(1),
        }],
        variants: vec![Variant {
            id: id * 100,
            title: "Default Title".to_owned(),
            sku: Some(format!("MOCK-{id}")),
            price: price.to_owned(),
            compare_at_price: None,
            position: Some(1),
        }],
    }
}

/// Returns the mock catalog. Same items, same order, every call.
#[must_use]
pub fn mock_products() -> Vec<Product> {
    vec![
        product(9001, "Crystal Chandelier", Some("Lighting"), "489.00"),
        product(9002, "Brass Wall Sconce", Some("Lighting"), "129.00"),
        product(9003, "Marble Side Table", Some("Furniture"), "349.00"),
        product(9004, "Outdoor Lantern Pendant", Some("Outdoor"), "199.00"),
        product(9005, "Linen Floor Lamp", None, "259.00"),
        product(9006, "Woven Basket Set", None, "79.00"),
    ]
}
