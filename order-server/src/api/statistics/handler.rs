//! Statistics API Handlers

use axum::{Json, extract::State};
use shared::models::OrderStats;

use crate::core::ServerState;
use crate::orders::pending_statistics;
use crate::utils::AppResult;

/// GET /api/statistics - 制作中饮品按品名/温度、按桌号计数
pub async fn get_statistics(State(state): State<ServerState>) -> AppResult<Json<OrderStats>> {
    let orders = state.orders.find_all().await?;
    Ok(Json(pending_statistics(&orders)))
}
