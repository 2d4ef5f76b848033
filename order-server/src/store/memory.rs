//! 进程内存存储

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{HashStore, StoreBackend, StoreResult};

/// 内存哈希表存储
///
/// 由 `ServerState` 持有并注入，测试与 `STORE_BACKEND=memory` 时使用。
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HashStore for MemoryStore {
    async fn get_all_fields(&self, collection: &str) -> StoreResult<HashMap<String, String>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_field(&self, collection: &str, field: &str) -> StoreResult<Option<String>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|fields| fields.get(field).cloned()))
    }

    async fn set_fields(
        &self,
        collection: &str,
        fields: HashMap<String, String>,
    ) -> StoreResult<()> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .extend(fields);
        Ok(())
    }

    async fn delete_field(&self, collection: &str, field: &str) -> StoreResult<bool> {
        let mut collections = self.collections.write();
        let Some(fields) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let removed = fields.remove(field).is_some();
        if fields.is_empty() {
            collections.remove(collection);
        }
        Ok(removed)
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
