use axum::{extract::State, Extension, Json};

use storelink_catalog::ProductView;

use crate::middleware::RequestId;

use super::{map_catalog_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Serves the full merged catalog: every product with its resolved category,
/// collection memberships, and overlay links.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, ApiError> {
    let data = state
        .catalog
        .build_catalog_view()
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let data = state
        .catalog
        .list_categories()
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
