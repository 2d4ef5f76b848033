//! 持久化适配层 - 哈希表语义的键值存储
//!
//! 每个集合 (collection) 是一张 `field → JSON 文本` 的哈希表，
//! 语义对应 `HGETALL` / `HGET` / `HSET` / `HDEL`。
//!
//! | 实现 | 说明 |
//! |------|------|
//! | [`RedbStore`] | redb 嵌入式数据库，每个集合一张表 |
//! | [`MemoryStore`] | 进程内存，重启即丢失 |
//!
//! 上层的订单、存档、菜单逻辑只依赖 [`HashStore`]，不关心具体实现。

mod memory;
mod redb_store;

#[cfg(test)]
pub(crate) mod gated;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use async_trait::async_trait;
use shared::AppError;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// 集合名称（与线上部署保持一致）
pub mod collections {
    /// 当前订单：order_id → Order
    pub const ORDERS: &str = "coffee:orders";
    /// 历史存档：archive_id → ArchiveEntry
    pub const ARCHIVES: &str = "coffee:archives";
    /// 统计缓存，存档时清空 `data` 字段
    pub const STATISTICS: &str = "coffee:statistics";
    pub const STATISTICS_FIELD: &str = "data";
    /// 菜单，单字段 `current`
    pub const MENU: &str = "coffee:statistics:menu";
    pub const MENU_FIELD: &str = "current";
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::database(err.to_string())
    }
}

/// 哈希表语义的存储接口
#[async_trait]
pub trait HashStore: Send + Sync {
    /// 读取集合中的全部字段，集合不存在时返回空表
    async fn get_all_fields(&self, collection: &str) -> StoreResult<HashMap<String, String>>;

    async fn get_field(&self, collection: &str, field: &str) -> StoreResult<Option<String>>;

    /// 写入多个字段（单次调用内原子）
    async fn set_fields(
        &self,
        collection: &str,
        fields: HashMap<String, String>,
    ) -> StoreResult<()>;

    /// 删除字段，返回是否确实删除了内容
    async fn delete_field(&self, collection: &str, field: &str) -> StoreResult<bool>;

    fn backend(&self) -> StoreBackend;

    async fn set_field(&self, collection: &str, field: &str, value: String) -> StoreResult<()> {
        self.set_fields(collection, HashMap::from([(field.to_string(), value)]))
            .await
    }
}

pub type SharedStore = Arc<dyn HashStore>;

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redb,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Redb => "redb",
            StoreBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(StoreBackend::Redb),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

/// 按配置打开存储
///
/// redb 文件位于 `<work_dir>/database/orders.redb`。
pub fn open_store(backend: StoreBackend, work_dir: &str) -> StoreResult<SharedStore> {
    match backend {
        StoreBackend::Redb => {
            let db_dir = Path::new(work_dir).join("database");
            std::fs::create_dir_all(&db_dir)?;
            let store = RedbStore::open(db_dir.join("orders.redb"))?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
