//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderBoard, OrderCreate, OrderUpdate, SortPolicy};

use crate::core::ServerState;
use crate::orders::{build_board, export};
use crate::utils::time::now_in;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Query params for the board
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub sort: Option<String>,
}

/// GET /api/orders - 当前全部订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<OrdersResponse>> {
    let orders = state.orders.find_all().await?;
    Ok(Json(OrdersResponse { orders }))
}

/// POST /api/orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let Json(payload) = payload?;
    let menu = state.menu.get().await?;
    let order = state
        .orders
        .create(payload, &menu, state.config.table_count)
        .await?;
    Ok((StatusCode::CREATED, Json(OrderResponse { order })))
}

/// PUT /api/orders/{id} - 替换饮品 / 备注
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<OrderUpdate>, JsonRejection>,
) -> AppResult<Json<OrderResponse>> {
    let Json(payload) = payload?;
    let menu = state.menu.get().await?;
    let order = state.orders.update(&id, payload, &menu).await?;
    Ok(Json(OrderResponse { order }))
}

/// DELETE /api/orders/{id} - 删除订单
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    state.orders.delete(&id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// PUT /api/orders/{id}/items/{index} - 切换单杯制作状态
pub async fn toggle_item(
    State(state): State<ServerState>,
    Path((id, index)): Path<(String, String)>,
) -> AppResult<Json<OrderResponse>> {
    let Ok(index) = index.parse::<usize>() else {
        return Err(
            AppError::validation(format!("Invalid item index: {}", index)).with_detail("index", index),
        );
    };
    let order = state.orders.toggle_item(&id, index).await?;
    Ok(Json(OrderResponse { order }))
}

/// GET /api/orders/board?sort=table|table_desc|time - 看板视图
pub async fn board(
    State(state): State<ServerState>,
    Query(query): Query<BoardQuery>,
) -> AppResult<Json<OrderBoard>> {
    let sort = match query.sort.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<SortPolicy>()
            .map_err(|e| AppError::validation(e).with_detail("sort", raw))?,
        _ => state.config.default_sort,
    };
    let orders = state.orders.find_all().await?;
    Ok(Json(build_board(&orders, sort)))
}

/// GET /api/orders/export - 导出纯文本统计报告
pub async fn export(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let orders = state.orders.find_all().await?;
    let exported_at = now_in(state.config.business_timezone);
    let report = export::render_report(&orders, exported_at)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::report_file_name(exported_at)
    );

    tracing::info!(orders = orders.len(), "Order report exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report,
    ))
}
