//! Payment API handlers

use crate::api::{PaginatedResponse, PaginationQuery};
use crate::error::Result;
use crate::middleware::BrandScope;
use crate::payment::NotifyPayload;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

/// Payment notification callback from the gateway (public)
///
/// The provider retries on any non-"OK" reply, so idempotent replays answer
/// 200 with the same body.
pub async fn notify<S: HasServices>(
    State(state): State<S>,
    Json(payload): Json<NotifyPayload>,
) -> Result<impl IntoResponse> {
    state.payment_service().handle_notify(payload).await?;
    Ok("OK")
}

/// The brand's order history
pub async fn list_orders<S: HasServices>(
    State(state): State<S>,
    scope: BrandScope,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .payment_service()
        .list_orders(scope.brand_id, pagination.current_page, pagination.per_page)
        .await?;
    Ok(Json(PaginatedResponse::from_page("取得成功", page)))
}
