//! 饮品统计

use shared::models::{CoffeeItem, Order, OrderStats};

/// 待制作统计：只计入制作中的饮品
///
/// 没有桌号的订单只计入 `coffee_counts`。
pub fn pending_statistics(orders: &[Order]) -> OrderStats {
    count_items(orders, |item| !item.is_ready())
}

/// 全量统计：不区分状态，用于结算存档与导出
pub fn total_statistics(orders: &[Order]) -> OrderStats {
    count_items(orders, |_| true)
}

fn count_items(orders: &[Order], include: impl Fn(&CoffeeItem) -> bool) -> OrderStats {
    let mut stats = OrderStats::default();

    for order in orders {
        for item in order.items.iter().filter(|item| include(item)) {
            *stats.coffee_counts.entry(item.stat_key()).or_insert(0) += 1;
            if let Some(table) = order.table_number {
                *stats.table_counts.entry(table).or_insert(0) += 1;
            }
        }
    }

    stats
}
