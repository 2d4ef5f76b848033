//! 口令校验
//!
//! 结算与菜单管理各使用一个静态口令，通过请求头传递：
//!
//! | 操作 | 请求头 | 配置 |
//! |------|--------|------|
//! | 结算 / 删除存档 | `x-archive-token` | `ARCHIVE_SECRET` |
//! | 修改菜单 | `x-admin-token` | `MENU_ADMIN_TOKEN` |
//!
//! 在 handler 参数中声明 [`ArchiveAccess`] / [`MenuAdmin`] 即完成校验。

mod extractor;

pub use extractor::{ArchiveAccess, MenuAdmin};

use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::AppError;
use crate::core::Config;
use crate::security_log;

pub const ARCHIVE_TOKEN_HEADER: &str = "x-archive-token";
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// 受口令保护的操作类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Archive,
    MenuAdmin,
}

impl SecretKind {
    pub fn header(&self) -> &'static str {
        match self {
            SecretKind::Archive => ARCHIVE_TOKEN_HEADER,
            SecretKind::MenuAdmin => ADMIN_TOKEN_HEADER,
        }
    }

    fn expected<'a>(&self, config: &'a Config) -> &'a SecretString {
        match self {
            SecretKind::Archive => &config.archive_secret,
            SecretKind::MenuAdmin => &config.menu_admin_token,
        }
    }
}

/// 校验请求头中的口令
///
/// 缺少请求头返回 `NotAuthenticated`，口令不符返回 `InvalidCredentials`，均为 401。
pub fn verify(kind: SecretKind, headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let provided = headers
        .get(kind.header())
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let Some(provided) = provided else {
        security_log!("WARN", "secret_missing", header = kind.header());
        return Err(AppError::not_authenticated());
    };

    if !digest_eq(provided, kind.expected(config).expose_secret()) {
        security_log!("WARN", "secret_mismatch", header = kind.header());
        return Err(AppError::invalid_credentials());
    }

    Ok(())
}

/// 比较摘要，耗时与口令内容无关
fn digest_eq(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use shared::ErrorCode;

    fn headers(name: &'static str, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn test_verify() {
        let config = Config::for_testing();

        assert!(verify(SecretKind::Archive, &headers(ARCHIVE_TOKEN_HEADER, "settle-1234"), &config).is_ok());
        assert!(verify(SecretKind::MenuAdmin, &headers(ADMIN_TOKEN_HEADER, "abcd1234"), &config).is_ok());

        let err = verify(SecretKind::Archive, &HeaderMap::new(), &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err = verify(SecretKind::Archive, &headers(ARCHIVE_TOKEN_HEADER, "abcd1234"), &config)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        // 结算口令不能用于菜单
        let err = verify(SecretKind::MenuAdmin, &headers(ADMIN_TOKEN_HEADER, "settle-1234"), &config)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_digest_eq() {
        assert!(digest_eq("abc", "abc"));
        assert!(!digest_eq("abc", "abd"));
        assert!(!digest_eq("abc", "abcd"));
    }
}
