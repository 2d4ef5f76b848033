//! 结算存档
//!
//! - [`service`] - 快照、列表、删除
//! - [`period`] - 周一至周日的结算周期
//! - [`report`] - 单个存档的文本报告

pub mod period;
pub mod report;
pub mod service;

pub use period::{week_bounds, week_bounds_at};
pub use report::{archive_file_name, render_archive_report};
pub use service::ArchiveService;
