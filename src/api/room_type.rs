//! Room type API handlers

use crate::api::{ApiResponse, PaginatedResponse, PaginationQuery, ValidatedJson};
use crate::domain::{CreateRoomTypeInput, StringUuid, UpdateRoomTypeInput};
use crate::error::Result;
use crate::middleware::TenantScope;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List room types of the active hotel
pub async fn list<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .room_type_service()
        .list(scope.hotel_id, pagination.current_page, pagination.per_page)
        .await?;
    Ok(Json(PaginatedResponse::from_page("取得成功", page)))
}

/// Get a room type by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let room_type = state.room_type_service().get(id, scope.hotel_id).await?;
    Ok(Json(ApiResponse::ok("取得成功", room_type)))
}

/// Create a room type
pub async fn create<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    ValidatedJson(input): ValidatedJson<CreateRoomTypeInput>,
) -> Result<impl IntoResponse> {
    let room_type = state
        .room_type_service()
        .create(scope.hotel_id, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("新增成功", room_type)),
    ))
}

/// Update a room type
pub async fn update<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    Path(id): Path<StringUuid>,
    ValidatedJson(input): ValidatedJson<UpdateRoomTypeInput>,
) -> Result<impl IntoResponse> {
    let room_type = state
        .room_type_service()
        .update(id, scope.hotel_id, input)
        .await?;
    Ok(Json(ApiResponse::ok("更新成功", room_type)))
}

/// Soft-delete a room type
pub async fn remove<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    state.room_type_service().remove(id, scope.hotel_id).await?;
    Ok(Json(ApiResponse::message("刪除成功")))
}
