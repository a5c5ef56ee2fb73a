//! Platform-link key sets and the overlay record shape.
//!
//! The set of recognized reseller-platform keys differs across deployments:
//! the original storefront uses a 7-key short form, while a second deployment
//! carries paired primary/secondary slots per platform (13 keys). The key set
//! is therefore configuration data, not a hardcoded struct — both shapes are
//! expressed through [`PlatformKeySet`] and every stored record is sanitized
//! against the configured set on both write and read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The 7-key short-form platform set.
const SHORT_KEYS: &[&str] = &[
    "wayfair",
    "amazon",
    "overstock",
    "homeDepot",
    "lowes",
    "target",
    "kohls",
];

/// The 13-key paired deployment shape: a primary and secondary link slot per
/// platform, with a single slot for Kohl's.
const PAIRED_KEYS: &[&str] = &[
    "wayfair1",
    "wayfair2",
    "amazon1",
    "amazon2",
    "overstock1",
    "overstock2",
    "homeDepot1",
    "homeDepot2",
    "lowes1",
    "lowes2",
    "target1",
    "target2",
    "kohls1",
];

/// An explicit, ordered enumeration of recognized platform-link keys.
///
/// Sanitization drops any key outside the set and defaults any missing key to
/// the empty string, so a [`LinkRecord`] always carries exactly these keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformKeySet {
    keys: Vec<String>,
}

impl PlatformKeySet {
    /// The 7-key short form used by the primary storefront deployment.
    #[must_use]
    pub fn short() -> Self {
        Self::from_keys(SHORT_KEYS.iter().copied())
    }

    /// The 13-key paired form used by the secondary deployment.
    #[must_use]
    pub fn paired() -> Self {
        Self::from_keys(PAIRED_KEYS.iter().copied())
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sanitizes a caller-supplied JSON value against this key set.
    ///
    /// Every recognized key appears in the output: present string values are
    /// kept, anything else (missing key, non-string value) defaults to `""`.
    /// Unrecognized keys are dropped silently. A non-object input sanitizes to
    /// the all-empty map.
    #[must_use]
    pub fn sanitize(&self, raw: &serde_json::Value) -> BTreeMap<String, String> {
        let fields = raw.as_object();
        self.keys()
            .map(|key| {
                let value = fields
                    .and_then(|f| f.get(key))
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default();
                (key.to_owned(), value.to_owned())
            })
            .collect()
    }
}

/// The overlay record for one product: its platform links plus the moment the
/// record was last written. `updated_at` is `None` for the synthesized
/// default record of a product that has never been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(flatten)]
    pub links: BTreeMap<String, String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// A record with every recognized key present and empty, and no
    /// last-modified stamp.
    #[must_use]
    pub fn empty(key_set: &PlatformKeySet) -> Self {
        Self {
            links: key_set.sanitize(&serde_json::Value::Null),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_key_set_has_seven_keys() {
        assert_eq!(PlatformKeySet::short().len(), 7);
    }

    #[test]
    fn paired_key_set_has_thirteen_keys() {
        assert_eq!(PlatformKeySet::paired().len(), 13);
    }

    #[test]
    fn sanitize_drops_unrecognized_keys() {
        let set = PlatformKeySet::short();
        let raw = json!({"amazon": "https://amazon.example/p/1", "bogusKey": "y"});
        let clean = set.sanitize(&raw);
        assert_eq!(
            clean.get("amazon").map(String::as_str),
            Some("https://amazon.example/p/1")
        );
        assert!(!clean.contains_key("bogusKey"));
    }

    #[test]
    fn sanitize_defaults_missing_keys_to_empty_string() {
        let set = PlatformKeySet::short();
        let clean = set.sanitize(&json!({"wayfair": "x"}));
        assert_eq!(clean.len(), 7);
        assert_eq!(clean.get("wayfair").map(String::as_str), Some("x"));
        for key in ["amazon", "overstock", "homeDepot", "lowes", "target", "kohls"] {
            assert_eq!(clean.get(key).map(String::as_str), Some(""), "key: {key}");
        }
    }

    #[test]
    fn sanitize_treats_non_string_values_as_unset() {
        let set = PlatformKeySet::short();
        let clean = set.sanitize(&json!({"amazon": 42, "target": null}));
        assert_eq!(clean.get("amazon").map(String::as_str), Some(""));
        assert_eq!(clean.get("target").map(String::as_str), Some(""));
    }

    #[test]
    fn sanitize_of_non_object_yields_all_empty() {
        let set = PlatformKeySet::paired();
        let clean = set.sanitize(&json!("not an object"));
        assert_eq!(clean.len(), 13);
        assert!(clean.values().all(String::is_empty));
    }

    #[test]
    fn empty_record_contains_every_key_and_no_timestamp() {
        let set = PlatformKeySet::paired();
        let record = LinkRecord::empty(&set);
        assert_eq!(record.links.len(), 13);
        assert!(record.links.contains_key("amazon1"));
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn link_record_serializes_flat_with_camel_case_timestamp() {
        let set = PlatformKeySet::short();
        let mut record = LinkRecord::empty(&set);
        record
            .links
            .insert("amazon".to_owned(), "https://a.example".to_owned());
        record.updated_at = Some(Utc::now());

        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["amazon"], "https://a.example");
        assert_eq!(value["wayfair"], "");
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("links").is_none(), "links map must be flattened");
    }

    #[test]
    fn empty_record_omits_updated_at_in_json() {
        let record = LinkRecord::empty(&PlatformKeySet::short());
        let value = serde_json::to_value(&record).expect("serialize");
        assert!(value.get("updatedAt").is_none());
    }
}
