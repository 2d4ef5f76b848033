//! Order Repository
//!
//! 订单以 JSON 文本存放在 `coffee:orders` 集合，key 为订单 ID。
//!
//! 改单与切换饮品状态都是「读取 → 修改 → 整单写回」。进程内由
//! `mutation_lock` 串行化，删除与结算清理也持有同一把锁，避免已删除的
//! 订单被进行中的切换写回；多进程共享同一存储时不提供保证。

use std::collections::HashMap;
use std::sync::Arc;

use shared::models::{
    CoffeeItem, ItemStatus, MenuItem, Order, OrderCreate, OrderItemInput, OrderStatus,
    OrderUpdate,
};
use shared::{AppError, AppResult, ErrorCode};
use tokio::sync::{Mutex, MutexGuard};

use super::validation::{normalize_text, validate_destination, validate_items};
use crate::store::{SharedStore, collections};

/// 订单写锁，持有期间改单、切换和删除都会等待
pub struct MutationGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

#[derive(Clone)]
pub struct OrderRepository {
    store: SharedStore,
    mutation_lock: Arc<Mutex<()>>,
}

impl OrderRepository {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 读取全部订单，按下单时间升序
    ///
    /// 无法解析的记录会被跳过并记录告警，不影响其它订单展示。
    pub async fn find_all(&self) -> AppResult<Vec<Order>> {
        let records = self.store.get_all_fields(collections::ORDERS).await?;

        let mut orders: Vec<Order> = records
            .into_iter()
            .filter_map(|(id, json)| match serde_json::from_str::<Order>(&json) {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "Skipping corrupted order record");
                    None
                }
            })
            .collect();

        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// 获取写锁（结算期间冻结订单集合）
    pub async fn lock_mutations(&self) -> MutationGuard<'_> {
        MutationGuard {
            _guard: self.mutation_lock.lock().await,
        }
    }

    /// 读取全部订单，任何一条无法解析都返回 `StorageCorrupted`
    pub async fn snapshot(&self, _guard: &MutationGuard<'_>) -> AppResult<Vec<Order>> {
        let records = self.store.get_all_fields(collections::ORDERS).await?;

        let mut orders = Vec::with_capacity(records.len());
        let mut corrupted = Vec::new();
        for (id, json) in records {
            match serde_json::from_str::<Order>(&json) {
                Ok(order) => orders.push(order),
                Err(_) => corrupted.push(id),
            }
        }

        if !corrupted.is_empty() {
            corrupted.sort();
            return Err(AppError::storage_corrupted(format!(
                "{} order records cannot be decoded",
                corrupted.len()
            ))
            .with_detail("order_ids", corrupted));
        }

        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        let Some(json) = self.store.get_field(collections::ORDERS, id).await? else {
            return Ok(None);
        };
        let order = serde_json::from_str(&json).map_err(|e| {
            AppError::storage_corrupted(format!("Order {} cannot be decoded: {}", id, e))
                .with_detail("order_id", id)
        })?;
        Ok(Some(order))
    }

    /// 读取订单，不存在时返回 404
    pub async fn get(&self, id: &str) -> AppResult<Order> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))
    }

    async fn save(&self, order: &Order) -> AppResult<()> {
        let json = serde_json::to_string(order)
            .map_err(|e| AppError::internal(format!("Failed to encode order: {}", e)))?;
        self.store
            .set_field(collections::ORDERS, &order.id, json)
            .await?;
        Ok(())
    }

    /// 创建订单，所有饮品初始为制作中
    pub async fn create(
        &self,
        payload: OrderCreate,
        menu: &[MenuItem],
        table_count: u32,
    ) -> AppResult<Order> {
        let customer_name = normalize_text(payload.customer_name);
        validate_destination(payload.table_number, customer_name.as_deref(), table_count)?;
        validate_items(&payload.items, menu)?;

        let mut order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            table_number: payload.table_number,
            customer_name,
            remark: normalize_text(payload.remark),
            items: build_items(payload.items),
            timestamp: shared::util::now_millis(),
            status: OrderStatus::Pending,
        };
        order.reindex_items();

        self.save(&order).await?;

        tracing::info!(
            order_id = %order.id,
            table_number = ?order.table_number,
            items = order.items.len(),
            "Order created"
        );
        Ok(order)
    }

    /// 整体替换饮品（全部重置为制作中），`remark` 为 `None` 时保留原备注
    pub async fn update(
        &self,
        id: &str,
        payload: OrderUpdate,
        menu: &[MenuItem],
    ) -> AppResult<Order> {
        validate_items(&payload.items, menu)?;

        let _guard = self.mutation_lock.lock().await;
        let mut order = self.get(id).await?;

        order.items = build_items(payload.items);
        if let Some(remark) = payload.remark {
            order.remark = normalize_text(Some(remark));
        }
        order.reindex_items();
        order.sync_status();

        self.save(&order).await?;

        tracing::info!(order_id = %order.id, items = order.items.len(), "Order updated");
        Ok(order)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.mutation_lock.lock().await;
        let removed = self.store.delete_field(collections::ORDERS, id).await?;
        if !removed {
            return Err(AppError::order_not_found(id));
        }
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    /// 切换单杯饮品状态 (preparing ⇄ ready)
    pub async fn toggle_item(&self, id: &str, index: usize) -> AppResult<Order> {
        let _guard = self.mutation_lock.lock().await;
        let mut order = self.get(id).await?;

        let len = order.items.len();
        let Some(item) = order.items.get_mut(index) else {
            return Err(AppError::with_message(
                ErrorCode::OrderItemNotFound,
                format!("Order {} has no item at index {}", id, index),
            )
            .with_detail("order_id", id)
            .with_detail("index", index)
            .with_detail("item_count", len));
        };
        item.status = item.status.toggled();
        let status = item.status;

        order.reindex_items();
        order.sync_status();
        self.save(&order).await?;

        tracing::debug!(order_id = %id, index, status = ?status, "Item status toggled");
        Ok(order)
    }

    /// 删除指定订单，返回删除失败的 ID 及原因
    ///
    /// 单条失败不会中断其余删除。调用方需持有 [`MutationGuard`]。
    pub async fn delete_many(
        &self,
        _guard: &MutationGuard<'_>,
        ids: &[String],
    ) -> HashMap<String, String> {
        let mut failures = HashMap::new();
        for id in ids {
            if let Err(e) = self.store.delete_field(collections::ORDERS, id).await {
                failures.insert(id.clone(), e.to_string());
            }
        }
        failures
    }
}

fn build_items(inputs: Vec<OrderItemInput>) -> Vec<CoffeeItem> {
    inputs
        .into_iter()
        .map(|input| CoffeeItem {
            id: String::new(),
            name: input.name,
            temperature: input.temperature,
            status: ItemStatus::Preparing,
            is_urgent: input.is_urgent,
            remark: normalize_text(input.remark),
            order_id: String::new(),
            original_index: 0,
        })
        .collect()
}
