//! Menu API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use shared::models::{MenuItem, MenuUpdate};

use crate::auth::MenuAdmin;
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub ok: bool,
}

/// GET /api/menu - 当前菜单 (首次读取写入默认菜单)
pub async fn get_menu(State(state): State<ServerState>) -> AppResult<Json<MenuResponse>> {
    let menu = state.menu.get().await?;
    Ok(Json(MenuResponse { menu }))
}

/// POST /api/menu - 替换菜单
pub async fn update_menu(
    State(state): State<ServerState>,
    _admin: MenuAdmin,
    payload: Result<Json<MenuUpdate>, JsonRejection>,
) -> AppResult<Json<UpdateResponse>> {
    let Json(payload) = payload?;
    state.menu.update(payload.menu).await?;
    Ok(Json(UpdateResponse { ok: true }))
}
