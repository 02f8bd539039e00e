//! Plan API handlers (public listing + admin management)

use crate::api::{ApiResponse, PaginatedResponse, PaginationQuery, ValidatedJson};
use crate::domain::{CreatePlanInput, StringUuid, UpdatePlanInput};
use crate::error::Result;
use crate::middleware::AdminGuard;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List active plans (public)
pub async fn list_active<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let plans = state.subscription_service().list_plans().await?;
    Ok(Json(ApiResponse::ok("取得成功", plans)))
}

/// List all plans (admin)
pub async fn admin_list<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .subscription_service()
        .list_plans_paged(pagination.current_page, pagination.per_page)
        .await?;
    Ok(Json(PaginatedResponse::from_page("取得成功", page)))
}

/// Create a plan (admin)
pub async fn admin_create<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    ValidatedJson(input): ValidatedJson<CreatePlanInput>,
) -> Result<impl IntoResponse> {
    let plan = state.subscription_service().create_plan(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("新增成功", plan))))
}

/// Update a plan (admin)
pub async fn admin_update<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    Path(id): Path<StringUuid>,
    ValidatedJson(input): ValidatedJson<UpdatePlanInput>,
) -> Result<impl IntoResponse> {
    let plan = state.subscription_service().update_plan(id, input).await?;
    Ok(Json(ApiResponse::ok("更新成功", plan)))
}

/// Deactivate a plan (admin)
pub async fn admin_remove<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    state.subscription_service().remove_plan(id).await?;
    Ok(Json(ApiResponse::message("刪除成功")))
}
