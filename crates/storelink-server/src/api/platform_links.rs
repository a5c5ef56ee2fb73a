use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use storelink_core::LinkRecord;
use storelink_db::{get_all_links, upsert_bulk_links, upsert_link};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BulkUpdateData {
    updated_count: u64,
}

pub(super) async fn list_links(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<HashMap<String, LinkRecord>>>, ApiError> {
    let data = get_all_links(&state.pool, &state.key_set)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_link(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<LinkRecord>>, ApiError> {
    let data = storelink_db::get_link(&state.pool, &state.key_set, &product_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Replaces the stored record for one product. The body is an arbitrary JSON
/// object of link fields; unknown keys are dropped and missing ones default
/// to empty during sanitization.
pub(super) async fn update_link(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<LinkRecord>>, ApiError> {
    let data = upsert_link(&state.pool, &state.key_set, &product_id, &payload)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Upserts many records in one call. The body shape is
/// `{ "links": { "<product_id>": { ...fields }, ... } }`; the response
/// reports how many records were actually written.
pub(super) async fn bulk_update_links(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<BulkUpdateData>>, ApiError> {
    let Some(links) = payload.get("links") else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "body must carry a `links` object mapping product ids to link fields",
        ));
    };

    let updated_count = upsert_bulk_links(&state.pool, &state.key_set, links)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: BulkUpdateData { updated_count },
        meta: ResponseMeta::new(req_id.0),
    }))
}
