//! Overlay-store operations for the `platform_links` table.
//!
//! Records are keyed by product identifier. The JSONB column stores the
//! sanitized link map; sanitization also runs on every read so a record
//! always presents exactly the configured key set, even if the key-set
//! configuration changed after the row was written.
//!
//! Upserts rely on the primary key and `ON CONFLICT ... DO UPDATE`, which
//! gives last-write-wins semantics per key without interleaving; writes to
//! distinct product ids are independent. Bulk upserts make no atomicity claim
//! across the batch — each per-id upsert stands on its own.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storelink_core::{LinkRecord, PlatformKeySet};

use crate::DbError;

/// A row from the `platform_links` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LinkRow {
    pub product_id: String,
    pub links: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl LinkRow {
    fn into_record(self, key_set: &PlatformKeySet) -> LinkRecord {
        LinkRecord {
            links: key_set.sanitize(&self.links),
            updated_at: Some(self.updated_at),
        }
    }
}

/// Returns every stored link record, keyed by product identifier.
///
/// An empty store yields an empty map.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_all_links(
    pool: &PgPool,
    key_set: &PlatformKeySet,
) -> Result<HashMap<String, LinkRecord>, DbError> {
    let rows = sqlx::query_as::<_, LinkRow>(
        "SELECT product_id, links, updated_at FROM platform_links",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.product_id.clone(), row.into_record(key_set)))
        .collect())
}

/// Returns the link record for one product.
///
/// An unknown identifier yields a fully-populated record with every field
/// empty and no timestamp — never an error and never a "missing" marker.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_link(
    pool: &PgPool,
    key_set: &PlatformKeySet,
    product_id: &str,
) -> Result<LinkRecord, DbError> {
    let row = sqlx::query_as::<_, LinkRow>(
        "SELECT product_id, links, updated_at FROM platform_links WHERE product_id = $1",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map_or_else(
        || LinkRecord::empty(key_set),
        |row| row.into_record(key_set),
    ))
}

/// Sanitizes `raw` against the key set and replaces (or creates) the stored
/// record, stamping the write time. Returns the sanitized record as stored.
///
/// Unrecognized keys in `raw` are dropped silently; missing keys default to
/// the empty string. A non-object `raw` stores the all-empty record.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_link(
    pool: &PgPool,
    key_set: &PlatformKeySet,
    product_id: &str,
    raw: &serde_json::Value,
) -> Result<LinkRecord, DbError> {
    let sanitized = key_set.sanitize(raw);
    let links_json = serde_json::json!(sanitized);

    let updated_at: DateTime<Utc> = sqlx::query_scalar(
        "INSERT INTO platform_links (product_id, links, updated_at) \
         VALUES ($1, $2::jsonb, NOW()) \
         ON CONFLICT (product_id) DO UPDATE SET \
             links      = EXCLUDED.links, \
             updated_at = NOW() \
         RETURNING updated_at",
    )
    .bind(product_id)
    .bind(&links_json)
    .fetch_one(pool)
    .await?;

    Ok(LinkRecord {
        links: sanitized,
        updated_at: Some(updated_at),
    })
}

/// Upserts many records at once, tolerating partial failure.
///
/// `payload` must be a JSON object mapping product ids to link-field objects.
/// Entries whose value is not an object are skipped, and a per-entry store
/// failure is logged and skipped rather than aborting the batch. Returns the
/// number of records actually written; partial success is the normal case and
/// the caller gets no per-entry diagnostics.
///
/// # Errors
///
/// Returns [`DbError::InvalidPayload`] if `payload` itself is not an object.
pub async fn upsert_bulk_links(
    pool: &PgPool,
    key_set: &PlatformKeySet,
    payload: &serde_json::Value,
) -> Result<u64, DbError> {
    let entries = payload.as_object().ok_or(DbError::InvalidPayload)?;

    let mut updated: u64 = 0;
    for (product_id, raw) in entries {
        if !raw.is_object() {
            tracing::debug!(product_id, "skipping bulk entry with non-object value");
            continue;
        }
        match upsert_link(pool, key_set, product_id, raw).await {
            Ok(_) => updated += 1,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "bulk upsert entry failed; skipping");
            }
        }
    }

    Ok(updated)
}
