//! 口令提取器

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{SecretKind, verify};
use crate::AppError;
use crate::core::ServerState;

/// 持有结算口令的请求
#[derive(Debug, Clone, Copy)]
pub struct ArchiveAccess;

/// 持有菜单管理口令的请求
#[derive(Debug, Clone, Copy)]
pub struct MenuAdmin;

impl FromRequestParts<ServerState> for ArchiveAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        verify(SecretKind::Archive, &parts.headers, &state.config)?;
        Ok(ArchiveAccess)
    }
}

impl FromRequestParts<ServerState> for MenuAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        verify(SecretKind::MenuAdmin, &parts.headers, &state.config)?;
        Ok(MenuAdmin)
    }
}
