//! 时间工具函数 (业务时区)

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 当前业务时区时间
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// 解析 IANA 时区名，失败时回退到 UTC
pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|e| {
        tracing::warn!("Failed to parse timezone '{}': {}, falling back to UTC", name, e);
        chrono_tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Shanghai"), chrono_tz::Asia::Shanghai);
        assert_eq!(parse_timezone("Mars/Olympus"), chrono_tz::UTC);
    }

    #[test]
    fn test_now_in_uses_zone() {
        let now = now_in(chrono_tz::Asia::Shanghai);
        assert_eq!(now.timezone(), chrono_tz::Asia::Shanghai);
    }
}
