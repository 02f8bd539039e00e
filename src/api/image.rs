//! Image API handlers

use crate::api::{ApiResponse, PaginatedResponse, PaginationQuery, ValidatedJson};
use crate::domain::{CreateImageInput, StringUuid};
use crate::error::Result;
use crate::middleware::TenantScope;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List images of the active hotel
pub async fn list<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .image_service()
        .list(scope.hotel_id, pagination.current_page, pagination.per_page)
        .await?;
    Ok(Json(PaginatedResponse::from_page("取得成功", page)))
}

/// Register an uploaded image
pub async fn create<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    ValidatedJson(input): ValidatedJson<CreateImageInput>,
) -> Result<impl IntoResponse> {
    let image = state.image_service().create(scope.hotel_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("新增成功", image))))
}

/// Delete an image row (the stored file is the image provider's concern)
pub async fn remove<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    state.image_service().remove(id, scope.hotel_id).await?;
    Ok(Json(ApiResponse::message("刪除成功")))
}
