//! 看板分区
//!
//! 每次读取时由订单列表纯计算得到，结果不落库：
//!
//! 1. 全部饮品已完成的订单进入「已完成」，按下单时间倒序，不合并
//! 2. 加急订单（有未完成的加急饮品，或没有桌号）单独成卡，按时间升序
//! 3. 其余订单按桌号合并为一张卡片，时间取最早一单
//! 4. 制作中列表 = 加急卡片 + 按排序策略排列的合并卡片

use std::cmp::Reverse;
use std::collections::HashMap;

use shared::models::{
    CoffeeItem, ItemGroup, ItemRef, Order, OrderBoard, OrderCard, SortPolicy, Temperature,
};

/// 计算看板
pub fn build_board(orders: &[Order], sort: SortPolicy) -> OrderBoard {
    let mut urgent: Vec<OrderCard> = Vec::new();
    let mut merged: Vec<OrderCard> = Vec::new();
    let mut merged_index: HashMap<u32, usize> = HashMap::new();
    let mut ready: Vec<Order> = Vec::new();

    for order in orders {
        if order.is_ready() {
            ready.push(order.clone());
            continue;
        }

        let mut decorated = order.clone();
        decorated.reindex_items();

        match (decorated.is_urgent(), decorated.table_number) {
            (false, Some(table)) => match merged_index.get(&table) {
                Some(&slot) => merge_into(&mut merged[slot], decorated),
                None => {
                    merged_index.insert(table, merged.len());
                    merged.push(card_from(decorated, false));
                }
            },
            _ => urgent.push(card_from(decorated, true)),
        }
    }

    urgent.sort_by_key(|card| card.timestamp);
    match sort {
        SortPolicy::Table => merged.sort_by_key(|card| card.table_number),
        SortPolicy::TableDesc => merged.sort_by_key(|card| Reverse(card.table_number)),
        SortPolicy::Time => merged.sort_by_key(|card| card.timestamp),
    }
    ready.sort_by_key(|order| Reverse(order.timestamp));

    let mut preparing_orders = urgent;
    preparing_orders.extend(merged);
    for card in &mut preparing_orders {
        card.item_groups = group_items(&card.items);
    }

    OrderBoard {
        preparing_orders,
        ready_orders: ready,
    }
}

fn card_from(order: Order, urgent: bool) -> OrderCard {
    OrderCard {
        source_order_ids: vec![order.id.clone()],
        id: order.id,
        table_number: order.table_number,
        customer_name: order.customer_name,
        remark: order.remark,
        items: order.items,
        timestamp: order.timestamp,
        urgent,
        merged: false,
        item_groups: Vec::new(),
    }
}

fn merge_into(card: &mut OrderCard, order: Order) {
    card.items.extend(order.items);
    card.timestamp = card.timestamp.min(order.timestamp);
    card.source_order_ids.push(order.id);
    card.merged = true;

    // 合并备注，重复的只保留一次
    if let Some(remark) = order.remark {
        card.remark = match card.remark.take() {
            Some(existing) if existing.split(" / ").any(|r| r == remark) => Some(existing),
            Some(existing) => Some(format!("{} / {}", existing, remark)),
            None => Some(remark),
        };
    }
}

/// 按 (名称, 温度) 分组，保持首次出现的顺序
pub fn group_items(items: &[CoffeeItem]) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();
    let mut index: HashMap<(&str, Temperature), usize> = HashMap::new();

    for item in items {
        let slot = *index
            .entry((item.name.as_str(), item.temperature))
            .or_insert_with(|| {
                groups.push(ItemGroup {
                    name: item.name.clone(),
                    temperature: item.temperature,
                    count: 0,
                    ready_count: 0,
                    all_ready: false,
                    has_urgent: false,
                    refs: Vec::new(),
                });
                groups.len() - 1
            });

        let group = &mut groups[slot];
        group.count += 1;
        if item.is_ready() {
            group.ready_count += 1;
        }
        group.has_urgent |= item.is_urgent;
        group.refs.push(ItemRef {
            order_id: item.order_id.clone(),
            original_index: item.original_index,
            status: item.status,
            is_urgent: item.is_urgent,
        });
    }

    for group in &mut groups {
        group.all_ready = group.ready_count == group.count;
    }
    groups
}
