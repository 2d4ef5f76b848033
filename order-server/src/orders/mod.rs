//! 订单模块
//!
//! - [`repository`] - 订单增删改查、饮品状态切换
//! - [`validation`] - 下单校验（菜单、桌号）
//! - [`board`] - 看板分区与同桌合并
//! - [`stats`] - 待制作 / 全量统计
//! - [`export`] - 文本报告导出

pub mod board;
pub mod export;
pub mod repository;
pub mod stats;
pub mod validation;

pub use board::{build_board, group_items};
pub use repository::{MutationGuard, OrderRepository};
pub use stats::{pending_statistics, total_statistics};
