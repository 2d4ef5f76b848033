//! redb 存储实现
//!
//! # Tables
//!
//! 每个集合对应一张 `TableDefinition<&str, &str>`，表名即集合名：
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `coffee:orders` | order_id | `Order` JSON |
//! | `coffee:archives` | archive_id | `ArchiveEntry` JSON |
//! | `coffee:statistics` | `data` | 统计缓存 |
//! | `coffee:statistics:menu` | `current` | `Vec<MenuItem>` JSON |
//!
//! 表在首次写入时创建；读取不存在的表按空集合处理。

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, TableError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::{HashStore, StoreBackend, StoreResult};

fn table(collection: &str) -> TableDefinition<'_, &'static str, &'static str> {
    TableDefinition::new(collection)
}

/// redb 哈希表存储
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    ///
    /// redb 默认 `Durability::Immediate`，`commit()` 返回即已落盘。
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Ok(Self { db: Arc::new(db) })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl HashStore for RedbStore {
    async fn get_all_fields(&self, collection: &str) -> StoreResult<HashMap<String, String>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(table(collection)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut fields = HashMap::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            fields.insert(key.value().to_string(), value.value().to_string());
        }
        Ok(fields)
    }

    async fn get_field(&self, collection: &str, field: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(table(collection)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(field)?.map(|guard| guard.value().to_string()))
    }

    async fn set_fields(
        &self,
        collection: &str,
        fields: HashMap<String, String>,
    ) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table(collection))?;
            for (key, value) in &fields {
                table.insert(key.as_str(), value.as_str())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    async fn delete_field(&self, collection: &str, field: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(table(collection))?;
            table.remove(field)?.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Redb
    }
}
