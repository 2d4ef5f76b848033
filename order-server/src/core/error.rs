use thiserror::Error;

use crate::store::StoreError;

/// 启动 / 运行期错误（请求级错误使用 `AppError`）
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
