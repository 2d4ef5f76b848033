//! Archive API 模块 (结算存档)
//!
//! | 路径 | 方法 | 说明 | 口令 |
//! |------|------|------|------|
//! | /api/archives | GET | 存档列表 (按日期倒序) | 无 |
//! | /api/archives | POST | 结算当前订单 | x-archive-token |
//! | /api/archives/{id} | DELETE | 删除存档 | x-archive-token |
//! | /api/archives/{id}/export | GET | 下载存档报告 (纯文本) | 无 |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/archives", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/export", get(handler::export))
}
