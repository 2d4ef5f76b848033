//! 测试用存储：可在下一次写入订单时暂停，用于构造并发交错

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

use super::{HashStore, MemoryStore, StoreBackend, StoreResult, collections};

#[derive(Default)]
pub struct GatedStore {
    inner: MemoryStore,
    armed: AtomicBool,
    /// 写入已到达闸门
    pub entered: Notify,
    /// 放行被拦住的写入
    pub release: Notify,
}

impl GatedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 拦截下一次订单写入
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HashStore for GatedStore {
    async fn get_all_fields(&self, collection: &str) -> StoreResult<HashMap<String, String>> {
        self.inner.get_all_fields(collection).await
    }

    async fn get_field(&self, collection: &str, field: &str) -> StoreResult<Option<String>> {
        self.inner.get_field(collection, field).await
    }

    async fn set_fields(
        &self,
        collection: &str,
        fields: HashMap<String, String>,
    ) -> StoreResult<()> {
        if collection == collections::ORDERS && self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.set_fields(collection, fields).await
    }

    async fn delete_field(&self, collection: &str, field: &str) -> StoreResult<bool> {
        self.inner.delete_field(collection, field).await
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
