//! Coffee Order Server - 咖啡吧台订单看板服务
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 订单仓储、看板聚合、统计、导出报告
//! - **结算** (`archiving`): 按周存档并清空当前订单
//! - **菜单** (`menu`): 可选饮品及温度
//! - **存储** (`store`): 哈希表存储抽象 (redb / 内存)
//! - **口令** (`auth`): 结算口令、菜单管理口令
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── store/         # HashStore 抽象 + redb / 内存实现
//! ├── orders/        # 订单仓储、看板、统计、导出
//! ├── archiving/     # 结算存档
//! ├── menu/          # 菜单
//! ├── auth/          # 口令校验
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间
//! ```

pub mod api;
pub mod archiving;
pub mod auth;
pub mod core;
pub mod menu;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use archiving::ArchiveService;
pub use core::{Config, Server, ServerState};
pub use menu::MenuRepository;
pub use orders::OrderRepository;
pub use store::{HashStore, SharedStore, StoreBackend};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env`、读取配置并初始化日志
pub fn setup_environment() -> Config {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
   ______      ________
  / ____/___  / __/ __/__  ___
 / /   / __ \/ /_/ /_/ _ \/ _ \
/ /___/ /_/ / __/ __/  __/  __/
\____/\____/_/ /_/  \___/\___/
   ____          __
  / __ \________/ /__  __________
 / / / / ___/ __  / _ \/ ___/ ___/
/ /_/ / /  / /_/ /  __/ /  (__  )
\____/_/   \__,_/\___/_/  /____/
    "#
    );
}
