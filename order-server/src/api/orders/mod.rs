//! Order API 模块
//!
//! 当前(未结算)订单的增删改、单杯状态切换、看板与导出。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // 看板 (合并 / 排序后的视图)
        .route("/board", get(handler::board))
        // 纯文本统计报告
        .route("/export", get(handler::export))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/items/{index}", put(handler::toggle_item))
}
