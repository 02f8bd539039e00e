//! Credit package and purchase API handlers

use crate::api::{ApiResponse, PaginatedResponse, PaginationQuery, ValidatedJson};
use crate::domain::{CreateCreditPackageInput, PurchaseInput, StringUuid, UpdateCreditPackageInput};
use crate::error::Result;
use crate::middleware::{AdminGuard, BrandScope};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List active credit packages (public)
pub async fn list_packages<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let packages = state.credit_service().list_packages().await?;
    Ok(Json(ApiResponse::ok("取得成功", packages)))
}

/// Purchase a credit package; returns checkout details
pub async fn purchase<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
    ValidatedJson(input): ValidatedJson<PurchaseInput>,
) -> Result<impl IntoResponse> {
    let checkout = state
        .credit_service()
        .purchase(scope.brand_id, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("訂單建立成功", checkout)),
    ))
}

/// The brand's purchase history
pub async fn list_purchases<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .credit_service()
        .list_purchases(scope.brand_id, pagination.current_page, pagination.per_page)
        .await?;
    Ok(Json(PaginatedResponse::from_page("取得成功", page)))
}

/// The brand's credit balance
pub async fn balance<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
) -> Result<impl IntoResponse> {
    let balance = state.credit_service().balance(scope.brand_id).await?;
    Ok(Json(ApiResponse::ok("取得成功", balance)))
}

/// List all credit packages (admin)
pub async fn admin_list<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .credit_service()
        .list_packages_paged(pagination.current_page, pagination.per_page)
        .await?;
    Ok(Json(PaginatedResponse::from_page("取得成功", page)))
}

/// Create a credit package (admin)
pub async fn admin_create<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    ValidatedJson(input): ValidatedJson<CreateCreditPackageInput>,
) -> Result<impl IntoResponse> {
    let package = state.credit_service().create_package(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("新增成功", package)),
    ))
}

/// Update a credit package (admin)
pub async fn admin_update<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    Path(id): Path<StringUuid>,
    ValidatedJson(input): ValidatedJson<UpdateCreditPackageInput>,
) -> Result<impl IntoResponse> {
    let package = state.credit_service().update_package(id, input).await?;
    Ok(Json(ApiResponse::ok("更新成功", package)))
}

/// Deactivate a credit package (admin)
pub async fn admin_remove<S: HasServices>(
    State(state): State<S>,
    _guard: AdminGuard,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    state.credit_service().remove_package(id).await?;
    Ok(Json(ApiResponse::message("刪除成功")))
}
