//! Archive API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use shared::models::{ArchiveCreated, ArchiveEntry};

use crate::archiving::{archive_file_name, render_archive_report};
use crate::auth::ArchiveAccess;
use crate::core::ServerState;
use crate::utils::AppResult;

const ARCHIVED_MESSAGE: &str = "数据已成功存档";

#[derive(Debug, Serialize)]
pub struct ArchivesResponse {
    pub archives: Vec<ArchiveEntry>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/archives - 存档列表 (不缓存)
pub async fn list(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let archives = state.archives.list().await?;
    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(ArchivesResponse { archives }),
    ))
}

/// POST /api/archives - 结算: 存档当前订单并清空
pub async fn create(
    State(state): State<ServerState>,
    _access: ArchiveAccess,
) -> AppResult<(StatusCode, Json<ArchiveCreated>)> {
    let archive = state
        .archives
        .archive_current(state.config.business_timezone)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ArchiveCreated {
            archive,
            message: ARCHIVED_MESSAGE.to_string(),
        }),
    ))
}

/// DELETE /api/archives/{id} - 删除存档
pub async fn delete(
    State(state): State<ServerState>,
    _access: ArchiveAccess,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    state.archives.delete(&id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// GET /api/archives/{id}/export - 下载存档报告
pub async fn export(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let archive = state.archives.get(&id).await?;
    let report = render_archive_report(&archive, state.config.business_timezone)?;
    let disposition = format!("attachment; filename=\"{}\"", archive_file_name(&archive));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report,
    ))
}
