//! 结算服务
//!
//! 结算 = 快照当前订单写入存档，再删除已快照的订单：
//!
//! 1. 持有订单写锁，读取全部订单；为空或存在无法解析的记录时直接报错，
//!    不做任何写入
//! 2. 计算全量统计与所在周，写入 `coffee:archives`
//! 3. 逐条删除快照中的订单，失败的重试一次
//! 4. 释放写锁，清除 `coffee:statistics` 的 `data` 缓存字段
//!
//! 步骤 2 与 3 之间没有事务。只删除快照内的订单，结算期间新下的
//! 订单会保留到下一个周期；清理仍失败时返回内部错误并列出残留订单。

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::{ArchiveEntry, Order};
use shared::{AppError, AppResult, ErrorCode};

use super::period::week_bounds_at;
use crate::orders::{MutationGuard, OrderRepository, total_statistics};
use crate::store::{SharedStore, collections};

#[derive(Clone)]
pub struct ArchiveService {
    store: SharedStore,
    orders: OrderRepository,
}

impl ArchiveService {
    pub fn new(store: SharedStore, orders: OrderRepository) -> Self {
        Self { store, orders }
    }

    /// 全部存档，按存档时间倒序
    pub async fn list(&self) -> AppResult<Vec<ArchiveEntry>> {
        let records = self.store.get_all_fields(collections::ARCHIVES).await?;

        let mut archives: Vec<ArchiveEntry> = records
            .into_iter()
            .filter_map(|(id, json)| match serde_json::from_str::<ArchiveEntry>(&json) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(archive_id = %id, error = %e, "Skipping corrupted archive record");
                    None
                }
            })
            .collect();

        archives.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(archives)
    }

    /// 结算当前周期
    pub async fn archive_current(&self, tz: Tz) -> AppResult<ArchiveEntry> {
        self.archive_at(Utc::now(), tz).await
    }

    pub async fn archive_at(&self, now: DateTime<Utc>, tz: Tz) -> AppResult<ArchiveEntry> {
        let guard = self.orders.lock_mutations().await;
        let orders = self.orders.snapshot(&guard).await?;
        if orders.is_empty() {
            return Err(AppError::new(ErrorCode::NothingToArchive));
        }

        let entry = summarize(orders, now, tz);
        let json = serde_json::to_string(&entry)
            .map_err(|e| AppError::internal(format!("Failed to encode archive: {}", e)))?;
        self.store
            .set_field(collections::ARCHIVES, &entry.id, json)
            .await?;

        tracing::info!(
            archive_id = %entry.id,
            total_orders = entry.total_orders,
            total_items = entry.total_items,
            week_start = %entry.week_start_date,
            "Archive saved"
        );

        self.sweep(&guard, &entry).await?;
        drop(guard);

        if let Err(e) = self
            .store
            .delete_field(collections::STATISTICS, collections::STATISTICS_FIELD)
            .await
        {
            tracing::warn!(error = %e, "Failed to clear statistics cache");
        }

        Ok(entry)
    }

    /// 删除快照中的订单
    async fn sweep(&self, guard: &MutationGuard<'_>, entry: &ArchiveEntry) -> AppResult<()> {
        let ids: Vec<String> = entry.original_data.iter().map(|o| o.id.clone()).collect();

        let failures = self.orders.delete_many(guard, &ids).await;
        if failures.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            archive_id = %entry.id,
            failed = failures.len(),
            "Retrying order cleanup after archive"
        );
        let retry_ids: Vec<String> = failures.into_keys().collect();
        let failures = self.orders.delete_many(guard, &retry_ids).await;
        if failures.is_empty() {
            return Ok(());
        }

        let mut remaining: Vec<String> = failures.keys().cloned().collect();
        remaining.sort();
        tracing::error!(
            archive_id = %entry.id,
            remaining = ?remaining,
            "Archive saved but some orders could not be cleared"
        );
        Err(AppError::internal(format!(
            "Archive {} saved but {} orders could not be cleared",
            entry.id,
            remaining.len()
        ))
        .with_detail("archive_id", entry.id.clone())
        .with_detail("remaining_order_ids", remaining))
    }

    /// 读取单个存档，不存在时返回 404
    pub async fn get(&self, id: &str) -> AppResult<ArchiveEntry> {
        let Some(json) = self.store.get_field(collections::ARCHIVES, id).await? else {
            return Err(AppError::archive_not_found(id));
        };
        serde_json::from_str(&json).map_err(|e| {
            AppError::storage_corrupted(format!("Archive {} cannot be decoded: {}", id, e))
                .with_detail("archive_id", id)
        })
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let removed = self.store.delete_field(collections::ARCHIVES, id).await?;
        if !removed {
            return Err(AppError::archive_not_found(id));
        }
        tracing::info!(archive_id = %id, "Archive deleted");
        Ok(())
    }
}

/// 计算存档内容（全部饮品，不区分状态）
pub fn summarize(orders: Vec<Order>, now: DateTime<Utc>, tz: Tz) -> ArchiveEntry {
    let stats = total_statistics(&orders);
    let (week_start_date, week_end_date) = week_bounds_at(now, tz);

    ArchiveEntry {
        id: uuid::Uuid::new_v4().to_string(),
        date: now,
        week_start_date,
        week_end_date,
        total_orders: orders.len(),
        total_items: orders.iter().map(|o| o.items.len()).sum(),
        coffee_counts: stats.coffee_counts,
        table_counts: stats.table_counts,
        original_data: orders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{HashStore, MemoryStore, StoreResult, StoreBackend};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use shared::models::{OrderCreate, OrderItemInput, Temperature, default_menu};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn service() -> (ArchiveService, OrderRepository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let orders = OrderRepository::new(store.clone());
        (
            ArchiveService::new(store.clone(), orders.clone()),
            orders,
            store,
        )
    }

    fn create(table: Option<u32>, drinks: &[(&str, Temperature)]) -> OrderCreate {
        OrderCreate {
            table_number: table,
            customer_name: table.is_none().then(|| "Amy".to_string()),
            remark: None,
            items: drinks
                .iter()
                .map(|(name, temperature)| OrderItemInput {
                    name: name.to_string(),
                    temperature: *temperature,
                    is_urgent: false,
                    remark: None,
                })
                .collect(),
        }
    }

    fn wednesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 8, 6, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_archive_empty_fails_without_entry() {
        let (service, _, _) = service();
        let err = service
            .archive_current(chrono_tz::Asia::Shanghai)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingToArchive);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archive_round_trip() {
        let (service, orders, store) = service();
        let menu = default_menu();
        let a = orders
            .create(
                create(Some(12), &[("White 拿铁", Temperature::Hot), ("Mocha 摩卡", Temperature::Iced)]),
                &menu,
                20,
            )
            .await
            .unwrap();
        orders.toggle_item(&a.id, 0).await.unwrap();
        orders
            .create(create(Some(2), &[("White 拿铁", Temperature::Hot)]), &menu, 20)
            .await
            .unwrap();
        orders
            .create(create(None, &[("Piccolo", Temperature::Hot)]), &menu, 20)
            .await
            .unwrap();
        store
            .set_field(collections::STATISTICS, collections::STATISTICS_FIELD, "{}".into())
            .await
            .unwrap();

        let entry = service
            .archive_at(wednesday(), chrono_tz::Asia::Shanghai)
            .await
            .unwrap();

        assert_eq!(entry.total_orders, 3);
        assert_eq!(entry.total_items, 4);
        assert_eq!(entry.coffee_counts["White 拿铁 (Hot)"], 2);
        assert_eq!(entry.coffee_counts["Mocha 摩卡 (Iced)"], 1);
        assert_eq!(entry.coffee_counts["Piccolo (Hot)"], 1);
        assert_eq!(entry.table_counts.keys().copied().collect::<Vec<_>>(), vec![2, 12]);
        assert_eq!(entry.table_counts[&12], 2);
        assert_eq!(entry.week_start_date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(entry.week_end_date, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
        assert_eq!(entry.original_data.len(), 3);

        assert!(orders.find_all().await.unwrap().is_empty());
        assert!(
            store
                .get_field(collections::STATISTICS, collections::STATISTICS_FIELD)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(service.list().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_delete() {
        let (service, orders, _) = service();
        let menu = default_menu();
        let mut ids = Vec::new();
        for day in [6, 8, 7] {
            orders
                .create(create(Some(1), &[("Milk 牛奶", Temperature::Iced)]), &menu, 20)
                .await
                .unwrap();
            let at = Utc.with_ymd_and_hms(2024, 5, day, 6, 0, 0).unwrap();
            ids.push(service.archive_at(at, chrono_tz::UTC).await.unwrap().id);
        }

        let listed: Vec<String> = service.list().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(listed, vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);

        service.delete(&ids[1]).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 2);
        assert_eq!(
            service.delete(&ids[1]).await.unwrap_err().code,
            ErrorCode::ArchiveNotFound
        );
    }

    /// 删除订单总是失败的存储
    struct StuckDeletes(MemoryStore);

    #[async_trait]
    impl HashStore for StuckDeletes {
        async fn get_all_fields(&self, c: &str) -> StoreResult<HashMap<String, String>> {
            self.0.get_all_fields(c).await
        }
        async fn get_field(&self, c: &str, f: &str) -> StoreResult<Option<String>> {
            self.0.get_field(c, f).await
        }
        async fn set_fields(&self, c: &str, fields: HashMap<String, String>) -> StoreResult<()> {
            self.0.set_fields(c, fields).await
        }
        async fn delete_field(&self, c: &str, f: &str) -> StoreResult<bool> {
            if c == collections::ORDERS {
                return Err(std::io::Error::other("delete refused").into());
            }
            self.0.delete_field(c, f).await
        }
        fn backend(&self) -> StoreBackend {
            StoreBackend::Memory
        }
    }

    #[tokio::test]
    async fn test_partial_clear_reports_internal_error() {
        let store: SharedStore = Arc::new(StuckDeletes(MemoryStore::new()));
        let orders = OrderRepository::new(store.clone());
        let service = ArchiveService::new(store, orders.clone());
        orders
            .create(create(Some(1), &[("Milk 牛奶", Temperature::Hot)]), &default_menu(), 20)
            .await
            .unwrap();

        let err = service.archive_current(chrono_tz::UTC).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.details.as_ref().unwrap()["remaining_order_ids"].as_array().unwrap().len(), 1);

        // 存档已写入，订单仍在
        assert_eq!(service.list().await.unwrap().len(), 1);
        assert_eq!(orders.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_archive_waits_for_in_flight_toggle() {
        use crate::store::gated::GatedStore;
        use std::time::Duration;

        let store = Arc::new(GatedStore::new());
        let orders = OrderRepository::new(store.clone());
        let service = ArchiveService::new(store.clone(), orders.clone());
        let order = orders
            .create(create(Some(4), &[("Milk 牛奶", Temperature::Hot)]), &default_menu(), 20)
            .await
            .unwrap();

        store.arm();
        let toggle = tokio::spawn({
            let orders = orders.clone();
            let id = order.id.clone();
            async move { orders.toggle_item(&id, 0).await }
        });
        store.entered.notified().await;

        let archive = tokio::spawn({
            let service = service.clone();
            async move { service.archive_current(chrono_tz::UTC).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!archive.is_finished());

        store.release.notify_one();
        toggle.await.unwrap().unwrap();
        let entry = archive.await.unwrap().unwrap();

        // 存档拿到的是切换后的状态，且切换没有把订单写回
        assert!(entry.original_data[0].is_ready());
        assert!(orders.find_all().await.unwrap().is_empty());
        assert!(store.get_all_fields(collections::ORDERS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archive_refuses_corrupted_records() {
        let (service, orders, store) = service();
        orders
            .create(create(Some(1), &[("Milk 牛奶", Temperature::Hot)]), &default_menu(), 20)
            .await
            .unwrap();
        store
            .set_field(collections::ORDERS, "broken", "{oops".into())
            .await
            .unwrap();

        let err = service.archive_current(chrono_tz::UTC).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageCorrupted);

        // 没有任何写入
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(store.get_all_fields(collections::ORDERS).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_archive_only_corrupted_records_is_not_empty() {
        let (service, _, store) = service();
        store
            .set_field(collections::ORDERS, "broken", "{oops".into())
            .await
            .unwrap();

        let err = service.archive_current(chrono_tz::UTC).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageCorrupted);
    }
}
