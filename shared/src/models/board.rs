//! Order Board Model
//!
//! 看板上的卡片是读取时的投影，不落库。

use super::order::{CoffeeItem, ItemStatus, Order, Temperature};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 非加急卡片的排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// 桌号升序
    #[default]
    Table,
    /// 桌号降序
    TableDesc,
    /// 下单时间升序
    Time,
}

impl SortPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortPolicy::Table => "table",
            SortPolicy::TableDesc => "table_desc",
            SortPolicy::Time => "time",
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(SortPolicy::Table),
            "table_desc" => Ok(SortPolicy::TableDesc),
            "time" => Ok(SortPolicy::Time),
            other => Err(format!("unknown sort policy: {}", other)),
        }
    }
}

/// 指向原订单中某杯饮品，用于在卡片上切换状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub order_id: String,
    pub original_index: usize,
    pub status: ItemStatus,
    pub is_urgent: bool,
}

/// 卡片内按 (名称, 温度) 分组的饮品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroup {
    pub name: String,
    pub temperature: Temperature,
    pub count: usize,
    pub ready_count: usize,
    pub all_ready: bool,
    pub has_urgent: bool,
    pub refs: Vec<ItemRef>,
}

/// 制作中列表的一张卡片（单个订单或同桌合并）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    /// 合并卡片沿用第一张订单的 id
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub items: Vec<CoffeeItem>,
    /// 合并卡片取最早的下单时间
    pub timestamp: i64,
    pub urgent: bool,
    pub merged: bool,
    pub source_order_ids: Vec<String>,
    pub item_groups: Vec<ItemGroup>,
}

impl OrderCard {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// 看板：制作中卡片 + 已完成订单
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBoard {
    pub preparing_orders: Vec<OrderCard>,
    pub ready_orders: Vec<Order>,
}
