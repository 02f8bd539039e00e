//! Subscription API handlers

use crate::api::{ApiResponse, ValidatedJson};
use crate::domain::SubscribeInput;
use crate::error::Result;
use crate::middleware::BrandScope;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Subscribe the caller's brand to a plan; returns checkout details
pub async fn subscribe<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
    ValidatedJson(input): ValidatedJson<SubscribeInput>,
) -> Result<impl IntoResponse> {
    let checkout = state
        .subscription_service()
        .subscribe(scope.brand_id, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("訂單建立成功", checkout)),
    ))
}

/// The brand's active subscription
pub async fn current<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
) -> Result<impl IntoResponse> {
    let subscription = state.subscription_service().current(scope.brand_id).await?;
    Ok(Json(ApiResponse::ok("取得成功", subscription)))
}

/// Cancel the brand's active subscription
pub async fn cancel<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
) -> Result<impl IntoResponse> {
    state.subscription_service().cancel(scope.brand_id).await?;
    Ok(Json(ApiResponse::message("取消成功")))
}
