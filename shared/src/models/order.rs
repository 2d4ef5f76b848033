//! Order Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 饮品温度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Iced,
}

impl Temperature {
    /// 统计键使用的英文标签 (`Hot` / `Iced`)
    pub fn label(&self) -> &'static str {
        match self {
            Temperature::Hot => "Hot",
            Temperature::Iced => "Iced",
        }
    }

    /// 导出报表使用的中文标签
    pub fn label_zh(&self) -> &'static str {
        match self {
            Temperature::Hot => "热",
            Temperature::Iced => "冰",
        }
    }
}

/// 单杯饮品制作状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Preparing,
    Ready,
}

impl ItemStatus {
    pub fn toggled(self) -> Self {
        match self {
            ItemStatus::Preparing => ItemStatus::Ready,
            ItemStatus::Ready => ItemStatus::Preparing,
        }
    }
}

/// 订单状态（仅作展示，`completed` 当且仅当所有饮品已完成）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

/// 订单中的一杯饮品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeItem {
    /// `<orderId>-<index>`
    pub id: String,
    pub name: String,
    pub temperature: Temperature,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub original_index: usize,
}

impl CoffeeItem {
    pub fn is_ready(&self) -> bool {
        self.status == ItemStatus::Ready
    }

    /// 统计键，例如 `Latte (Hot)`
    pub fn stat_key(&self) -> String {
        format!("{} ({})", self.name, self.temperature.label())
    }
}

/// 订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub items: Vec<CoffeeItem>,
    /// 创建时间（毫秒）
    pub timestamp: i64,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// 全部饮品已完成
    pub fn is_ready(&self) -> bool {
        self.items.iter().all(CoffeeItem::is_ready)
    }

    /// 加急：仍在制作中的饮品带加急标记，或没有桌号（按姓名取餐）
    pub fn is_urgent(&self) -> bool {
        self.table_number.is_none()
            || self
                .items
                .iter()
                .any(|item| !item.is_ready() && item.is_urgent)
    }

    /// 重写每杯饮品的 `id` / `orderId` / `originalIndex`
    pub fn reindex_items(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.id = format!("{}-{}", self.id, index);
            item.order_id = self.id.clone();
            item.original_index = index;
        }
    }

    /// 根据饮品状态刷新订单状态
    pub fn sync_status(&mut self) {
        self.status = if self.is_ready() {
            OrderStatus::Completed
        } else {
            OrderStatus::Pending
        };
    }
}

/// 下单时的单杯饮品
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub name: String,
    pub temperature: Temperature,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub remark: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default)]
    pub table_number: Option<u32>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Update order payload (整体替换饮品，`remark` 为空时保留原值)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub remark: Option<String>,
}

/// 待制作统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    /// `"<name> (Hot|Iced)"` → 杯数
    pub coffee_counts: BTreeMap<String, u32>,
    /// 桌号 → 杯数
    pub table_counts: BTreeMap<u32, u32>,
}

impl OrderStats {
    pub fn total_items(&self) -> u32 {
        self.coffee_counts.values().sum()
    }
}
