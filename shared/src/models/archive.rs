//! Archive Model

use super::order::Order;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 结算存档（创建后不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub id: String,
    /// 存档时间
    pub date: DateTime<Utc>,
    /// 所在周的周一（营业时区）
    pub week_start_date: NaiveDate,
    /// 所在周的周日
    pub week_end_date: NaiveDate,
    pub total_orders: usize,
    pub total_items: usize,
    /// 全部饮品（不区分状态）按 `"<name> (Hot|Iced)"` 计数
    pub coffee_counts: BTreeMap<String, u32>,
    /// 桌号 → 杯数，仅统计有桌号的订单
    pub table_counts: BTreeMap<u32, u32>,
    pub original_data: Vec<Order>,
}

/// `POST /api/archives` 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCreated {
    pub archive: ArchiveEntry,
    pub message: String,
}
