//! Hotel API handlers

use crate::api::{ApiResponse, ValidatedJson};
use crate::domain::{CreateHotelInput, UpdateHotelInput};
use crate::error::Result;
use crate::middleware::{BrandScope, TenantScope};
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Create a hotel for the caller's brand
///
/// Uses `BrandScope` because this is the one store route that must work
/// before any hotel exists.
pub async fn create<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
    ValidatedJson(input): ValidatedJson<CreateHotelInput>,
) -> Result<impl IntoResponse> {
    let hotel = state.hotel_service().create(scope.brand_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("新增成功", hotel))))
}

/// Get the active hotel's profile
pub async fn get<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
) -> Result<impl IntoResponse> {
    let hotel = state
        .hotel_service()
        .get(scope.hotel_id, scope.brand_id)
        .await?;
    Ok(Json(ApiResponse::ok("取得成功", hotel)))
}

/// Update the active hotel's profile
pub async fn update<S: HasServices>(
    State(state): State<S>,
    scope: TenantScope,
    ValidatedJson(input): ValidatedJson<UpdateHotelInput>,
) -> Result<impl IntoResponse> {
    let hotel = state
        .hotel_service()
        .update(scope.hotel_id, scope.brand_id, input)
        .await?;
    Ok(Json(ApiResponse::ok("更新成功", hotel)))
}
