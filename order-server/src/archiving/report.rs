//! 单个存档的纯文本报告
//!
//! ```text
//! Coffee Orders Archive Report
//! Archived at: 2024-05-08 14:00:00
//! Period: 2024-05-06 - 2024-05-12
//! Total orders: 3
//! Total drinks: 4
//! ====================================
//!
//! ### Coffee Types ###
//! - White 拿铁 (Hot): 2
//! ...
//! ### By Table ###
//! - Table 2: 1
//! ```

use std::fmt::{self, Write};

use chrono_tz::Tz;
use shared::models::ArchiveEntry;
use shared::{AppError, AppResult};

const SEPARATOR: &str = "====================================";

/// 生成存档报告，存档时间按营业时区显示
pub fn render_archive_report(entry: &ArchiveEntry, tz: Tz) -> AppResult<String> {
    let mut out = String::new();
    write_archive_report(&mut out, entry, tz)
        .map_err(|e| AppError::internal(format!("Failed to render archive report: {}", e)))?;
    Ok(out)
}

fn write_archive_report(out: &mut String, entry: &ArchiveEntry, tz: Tz) -> fmt::Result {
    writeln!(out, "Coffee Orders Archive Report")?;
    writeln!(
        out,
        "Archived at: {}",
        entry.date.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "Period: {} - {}", entry.week_start_date, entry.week_end_date)?;
    writeln!(out, "Total orders: {}", entry.total_orders)?;
    writeln!(out, "Total drinks: {}", entry.total_items)?;
    writeln!(out, "{}\n", SEPARATOR)?;

    // 杯数多的在前，相同时按名称
    let mut coffee: Vec<(&String, &u32)> = entry.coffee_counts.iter().collect();
    coffee.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    writeln!(out, "### Coffee Types ###")?;
    for (name, count) in coffee {
        writeln!(out, "- {}: {}", name, count)?;
    }
    writeln!(out, "\n{}\n", SEPARATOR)?;

    writeln!(out, "### By Table ###")?;
    for (table, count) in &entry.table_counts {
        writeln!(out, "- Table {}: {}", table, count)?;
    }
    Ok(())
}

/// 下载文件名，例如 `coffee-archive-2024-05-06-2024-05-12.txt`
pub fn archive_file_name(entry: &ArchiveEntry) -> String {
    format!(
        "coffee-archive-{}-{}.txt",
        entry.week_start_date, entry.week_end_date
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn entry() -> ArchiveEntry {
        ArchiveEntry {
            id: "a1".to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 8, 6, 0, 0).unwrap(),
            week_start_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            week_end_date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            total_orders: 3,
            total_items: 6,
            coffee_counts: BTreeMap::from([
                ("Mocha 摩卡 (Iced)".to_string(), 1),
                ("Piccolo (Hot)".to_string(), 2),
                ("White 拿铁 (Hot)".to_string(), 3),
            ]),
            table_counts: BTreeMap::from([(12, 2), (2, 3)]),
            original_data: Vec::new(),
        }
    }

    #[test]
    fn test_archive_report_layout() {
        let report = render_archive_report(&entry(), chrono_tz::Asia::Shanghai).unwrap();

        assert!(report.starts_with(
            "Coffee Orders Archive Report\n\
             Archived at: 2024-05-08 14:00:00\n\
             Period: 2024-05-06 - 2024-05-12\n\
             Total orders: 3\n\
             Total drinks: 6\n"
        ));
        assert!(report.contains(
            "### Coffee Types ###\n\
             - White 拿铁 (Hot): 3\n\
             - Piccolo (Hot): 2\n\
             - Mocha 摩卡 (Iced): 1\n"
        ));
        assert!(report.ends_with("### By Table ###\n- Table 2: 3\n- Table 12: 2\n"));
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(
            archive_file_name(&entry()),
            "coffee-archive-2024-05-06-2024-05-12.txt"
        );
    }
}
