//! Logging Infrastructure
//!
//! `RUST_LOG` 优先，其次使用配置的日志级别。设置日志目录后按天滚动写入
//! `<log_dir>/order-server.YYYY-MM-DD`。

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_writer = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(log_path) {
            eprintln!("Failed to create log directory {}: {}", dir, e);
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "order-server"))
    });

    // 重复初始化（如多个测试）时忽略错误
    let result = match (file_writer, json.unwrap_or(false)) {
        (Some(writer), true) => builder.json().with_writer(writer).try_init(),
        (Some(writer), false) => builder.with_ansi(false).with_writer(writer).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}
