use std::sync::Arc;

use crate::archiving::ArchiveService;
use crate::core::{Config, Result};
use crate::menu::MenuRepository;
use crate::orders::OrderRepository;
use crate::store::{SharedStore, open_store};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，作为 axum `State` 注入每个 handler。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | store | SharedStore | 哈希表存储 (redb / 内存) |
/// | orders | OrderRepository | 订单仓储 |
/// | menu | MenuRepository | 菜单 |
/// | archives | ArchiveService | 结算存档 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: SharedStore,
    pub orders: OrderRepository,
    pub menu: MenuRepository,
    pub archives: ArchiveService,
}

impl ServerState {
    /// 按配置打开存储并组装服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store = open_store(config.store_backend, &config.work_dir)?;
        tracing::info!(
            backend = %config.store_backend,
            work_dir = %config.work_dir,
            "Store opened"
        );
        Ok(Self::with_store(config.clone(), store))
    }

    /// 使用已有存储组装服务（测试中注入内存存储）
    pub fn with_store(config: Config, store: SharedStore) -> Self {
        let orders = OrderRepository::new(store.clone());
        Self {
            config: Arc::new(config),
            menu: MenuRepository::new(store.clone()),
            archives: ArchiveService::new(store.clone(), orders.clone()),
            orders,
            store,
        }
    }
}
