//! 结算周期：周一至周日

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// 日期所在周的周一与周日（周日归属前一个周一）
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// 某一时刻在业务时区内所在的周
pub fn week_bounds_at(instant: DateTime<Utc>, tz: Tz) -> (NaiveDate, NaiveDate) {
    week_bounds(instant.with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_wednesday() {
        // 2024-05-08 是周三
        assert_eq!(week_bounds(d(2024, 5, 8)), (d(2024, 5, 6), d(2024, 5, 12)));
    }

    #[test]
    fn test_monday_and_sunday() {
        assert_eq!(week_bounds(d(2024, 5, 6)), (d(2024, 5, 6), d(2024, 5, 12)));
        assert_eq!(week_bounds(d(2024, 5, 12)), (d(2024, 5, 6), d(2024, 5, 12)));
    }

    #[test]
    fn test_across_month_and_year() {
        // 2025-01-01 是周三
        assert_eq!(week_bounds(d(2025, 1, 1)), (d(2024, 12, 30), d(2025, 1, 5)));
    }

    #[test]
    fn test_business_timezone_decides_the_day() {
        // UTC 周日 20:00 = 上海周一 04:00
        let instant = Utc.with_ymd_and_hms(2024, 5, 12, 20, 0, 0).unwrap();
        assert_eq!(
            week_bounds_at(instant, chrono_tz::Asia::Shanghai),
            (d(2024, 5, 13), d(2024, 5, 19))
        );
        assert_eq!(
            week_bounds_at(instant, chrono_tz::UTC),
            (d(2024, 5, 6), d(2024, 5, 12))
        );
    }
}
