//! Menu API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    // 读取公开，修改需要 x-admin-token
    Router::new().route("/", get(handler::get_menu).post(handler::update_menu))
}
