use chrono_tz::Tz;
use secrecy::SecretString;
use shared::models::SortPolicy;

use crate::store::StoreBackend;
use crate::utils::time::parse_timezone;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时会先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录（数据库、日志） |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORE_BACKEND | redb | 存储后端: redb / memory |
/// | TABLE_COUNT | 20 | 桌台数量（桌号 1..=N） |
/// | DEFAULT_SORT | table | 看板默认排序: table / table_desc / time |
/// | BUSINESS_TIMEZONE | Asia/Shanghai | 业务时区（存档周区间） |
/// | ARCHIVE_SECRET | settle-1234 | 结算口令 |
/// | MENU_ADMIN_TOKEN | abcd1234 | 菜单管理口令 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 设置后按天滚动写入文件 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/coffee HTTP_PORT=8080 STORE_BACKEND=memory cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    pub store_backend: StoreBackend,
    /// 最大桌号
    pub table_count: u32,
    pub default_sort: SortPolicy,
    pub business_timezone: Tz,
    /// 结算 / 删除存档口令 (`x-archive-token`)
    pub archive_secret: SecretString,
    /// 菜单管理口令 (`x-admin-token`)
    pub menu_admin_token: SecretString,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 环境变量缺失或无法解析时使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            table_count: std::env::var("TABLE_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(20),
            default_sort: std::env::var("DEFAULT_SORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            business_timezone: std::env::var("BUSINESS_TIMEZONE")
                .map(|v| parse_timezone(&v))
                .unwrap_or(chrono_tz::Asia::Shanghai),
            archive_secret: std::env::var("ARCHIVE_SECRET")
                .unwrap_or_else(|_| "settle-1234".into())
                .into(),
            menu_admin_token: std::env::var("MENU_ADMIN_TOKEN")
                .unwrap_or_else(|_| "abcd1234".into())
                .into(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// 内存存储 + 固定口令，常用于测试场景
    pub fn for_testing() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            environment: "test".into(),
            store_backend: StoreBackend::Memory,
            table_count: 20,
            default_sort: SortPolicy::Table,
            business_timezone: chrono_tz::Asia::Shanghai,
            archive_secret: "settle-1234".into(),
            menu_admin_token: "abcd1234".into(),
            log_level: "debug".into(),
            log_dir: None,
            request_timeout_ms: 30000,
            shutdown_timeout_ms: 1000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
