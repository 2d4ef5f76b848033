//! 订单导出 - 纯文本统计报告
//!
//! ```text
//! 咖啡订单统计报告
//! 导出时间: 2024-05-08 14:30:00
//! ====================================
//!
//! ### 总计 ###
//! - Mocha 摩卡 (冰): 2 杯
//! ...
//! ### 按桌号分计 ###
//!
//! --- 桌号: 3 ---
//!   - Mocha 摩卡 (冰): 1 杯
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};

use chrono::DateTime;
use chrono_tz::Tz;
use shared::models::{CoffeeItem, Order};
use shared::{AppError, AppResult, ErrorCode};

const SEPARATOR: &str = "====================================";

fn report_key(item: &CoffeeItem) -> String {
    format!("{} ({})", item.name, item.temperature.label_zh())
}

/// 生成报告，包含所有状态的饮品；没有订单时返回错误
pub fn render_report(orders: &[Order], exported_at: DateTime<Tz>) -> AppResult<String> {
    if orders.is_empty() {
        return Err(AppError::new(ErrorCode::NothingToExport));
    }

    let mut totals: HashMap<String, u32> = HashMap::new();
    let mut by_table: BTreeMap<u32, HashMap<String, u32>> = BTreeMap::new();
    let mut by_customer: HashMap<String, HashMap<String, u32>> = HashMap::new();

    for order in orders {
        let bucket = match (order.table_number, order.customer_name.as_deref()) {
            (Some(table), _) => by_table.entry(table).or_default(),
            (None, name) => by_customer
                .entry(name.unwrap_or("-").to_string())
                .or_default(),
        };
        for item in &order.items {
            let key = report_key(item);
            *totals.entry(key.clone()).or_insert(0) += 1;
            *bucket.entry(key).or_insert(0) += 1;
        }
    }

    let mut out = String::new();
    write_report(&mut out, exported_at, &totals, &by_table, &by_customer)
        .map_err(|e| AppError::internal(format!("Failed to render report: {}", e)))?;
    Ok(out)
}

fn write_report(
    out: &mut String,
    exported_at: DateTime<Tz>,
    totals: &HashMap<String, u32>,
    by_table: &BTreeMap<u32, HashMap<String, u32>>,
    by_customer: &HashMap<String, HashMap<String, u32>>,
) -> fmt::Result {
    writeln!(out, "咖啡订单统计报告")?;
    writeln!(out, "导出时间: {}", exported_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "{}\n", SEPARATOR)?;

    writeln!(out, "### 总计 ###")?;
    for (name, count) in by_name(totals) {
        writeln!(out, "- {}: {} 杯", name, count)?;
    }
    writeln!(out, "\n{}\n", SEPARATOR)?;

    writeln!(out, "### 按桌号分计 ###")?;
    for (table, items) in by_table {
        writeln!(out, "\n--- 桌号: {} ---", table)?;
        write_items(out, items)?;
    }
    for (customer, items) in by_name(by_customer) {
        writeln!(out, "\n--- 顾客: {} ---", customer)?;
        write_items(out, items)?;
    }
    Ok(())
}

fn write_items(out: &mut String, items: &HashMap<String, u32>) -> fmt::Result {
    for (name, count) in by_name(items) {
        writeln!(out, "  - {}: {} 杯", name, count)?;
    }
    Ok(())
}

/// 按名称排序：忽略大小写，相同时再按原文
pub(crate) fn by_name<V>(map: &HashMap<String, V>) -> Vec<(&str, &V)> {
    let mut entries: Vec<(&str, &V)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    entries
}

/// 下载文件名，例如 `coffee-summary-2024-05-08T14-30-00.txt`
pub fn report_file_name(exported_at: DateTime<Tz>) -> String {
    format!(
        "coffee-summary-{}.txt",
        exported_at.format("%Y-%m-%dT%H-%M-%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::{ItemStatus, OrderStatus, Temperature};

    fn order(table: Option<u32>, customer: Option<&str>, items: &[(&str, Temperature, ItemStatus)]) -> Order {
        Order {
            id: "o".to_string(),
            table_number: table,
            customer_name: customer.map(str::to_string),
            remark: None,
            items: items
                .iter()
                .map(|(name, temperature, status)| CoffeeItem {
                    id: String::new(),
                    name: name.to_string(),
                    temperature: *temperature,
                    status: *status,
                    is_urgent: false,
                    remark: None,
                    order_id: String::new(),
                    original_index: 0,
                })
                .collect(),
            timestamp: 0,
            status: OrderStatus::Pending,
        }
    }

    fn at() -> DateTime<Tz> {
        chrono_tz::Asia::Shanghai
            .with_ymd_and_hms(2024, 5, 8, 14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_orders_rejected() {
        let err = render_report(&[], at()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingToExport);
    }

    #[test]
    fn test_report_layout() {
        use ItemStatus::*;
        use Temperature::*;
        let orders = vec![
            order(Some(10), None, &[("Mocha", Iced, Preparing)]),
            order(Some(3), None, &[("Latte", Hot, Ready), ("Mocha", Iced, Preparing)]),
            order(None, Some("Amy"), &[("Latte", Hot, Preparing)]),
        ];
        let report = render_report(&orders, at()).unwrap();

        assert!(report.starts_with("咖啡订单统计报告\n导出时间: 2024-05-08 14:30:00\n"));
        assert!(report.contains("### 总计 ###\n- Latte (热): 2 杯\n- Mocha (冰): 2 杯\n"));

        // 桌号按数值排序，3 在 10 之前
        let t3 = report.find("--- 桌号: 3 ---").unwrap();
        let t10 = report.find("--- 桌号: 10 ---").unwrap();
        let amy = report.find("--- 顾客: Amy ---").unwrap();
        assert!(t3 < t10 && t10 < amy);
        assert!(report.contains("--- 桌号: 3 ---\n  - Latte (热): 1 杯\n  - Mocha (冰): 1 杯\n"));
    }

    #[test]
    fn test_names_sort_ignoring_case() {
        use ItemStatus::*;
        use Temperature::*;
        let orders = vec![
            order(Some(1), None, &[("Mocha", Hot, Preparing), ("latte", Hot, Preparing)]),
            order(None, Some("Bob"), &[("americano", Iced, Preparing)]),
            order(None, Some("amy"), &[("americano", Iced, Preparing)]),
        ];
        let report = render_report(&orders, at()).unwrap();

        let americano = report.find("- americano (冰)").unwrap();
        let latte = report.find("- latte (热)").unwrap();
        let mocha = report.find("- Mocha (热)").unwrap();
        assert!(americano < latte && latte < mocha);
        assert!(report.find("--- 顾客: amy ---").unwrap() < report.find("--- 顾客: Bob ---").unwrap());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            report_file_name(at()),
            "coffee-summary-2024-05-08T14-30-00.txt"
        );
    }
}
