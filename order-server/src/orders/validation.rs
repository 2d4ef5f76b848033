//! 下单 / 改单校验
//!
//! 所有校验在写入之前完成，失败时不产生任何副作用。

use shared::models::{MenuItem, OrderItemInput};
use shared::{AppError, AppResult, ErrorCode};

/// 去除首尾空白，空字符串视为未填写
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 校验取餐位置：桌号在 1..=table_count 内，或提供顾客姓名
pub fn validate_destination(
    table_number: Option<u32>,
    customer_name: Option<&str>,
    table_count: u32,
) -> AppResult<()> {
    match table_number {
        Some(table) if table == 0 || table > table_count => Err(AppError::with_message(
            ErrorCode::TableNumberInvalid,
            format!("Table number must be between 1 and {}", table_count),
        )
        .with_detail("table_number", table)
        .with_detail("max", table_count)),
        Some(_) => Ok(()),
        None if customer_name.is_some_and(|name| !name.trim().is_empty()) => Ok(()),
        None => Err(AppError::new(ErrorCode::OrderDestinationMissing)),
    }
}

/// 校验饮品列表：非空、菜名在菜单中、温度可选
pub fn validate_items(items: &[OrderItemInput], menu: &[MenuItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    for (index, item) in items.iter().enumerate() {
        let Some(entry) = menu.iter().find(|m| m.name == item.name) else {
            return Err(AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("{} is not on the menu", item.name),
            )
            .with_detail("name", item.name.clone())
            .with_detail("index", index));
        };

        if !entry.allows(item.temperature) {
            return Err(AppError::with_message(
                ErrorCode::TemperatureNotAvailable,
                format!(
                    "{} is not available {}",
                    item.name,
                    item.temperature.label().to_lowercase()
                ),
            )
            .with_detail("name", item.name.clone())
            .with_detail("temperature", item.temperature.label().to_lowercase())
            .with_detail("index", index));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Temperature, default_menu};

    fn input(name: &str, temperature: Temperature) -> OrderItemInput {
        OrderItemInput {
            name: name.to_string(),
            temperature,
            is_urgent: false,
            remark: None,
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = validate_items(&[], &default_menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_unknown_drink_rejected() {
        let err =
            validate_items(&[input("Flat White", Temperature::Hot)], &default_menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
        assert_eq!(err.details.unwrap()["name"], "Flat White");
    }

    #[test]
    fn test_disabled_temperature_rejected() {
        let items = [
            input("White 拿铁", Temperature::Iced),
            input("Piccolo", Temperature::Iced),
        ];
        let err = validate_items(&items, &default_menu()).unwrap_err();
        assert_eq!(err.code, ErrorCode::TemperatureNotAvailable);
        assert_eq!(err.details.unwrap()["index"], 1);

        assert!(validate_items(&[input("Piccolo", Temperature::Hot)], &default_menu()).is_ok());
    }

    #[test]
    fn test_destination() {
        assert!(validate_destination(Some(1), None, 20).is_ok());
        assert!(validate_destination(Some(20), None, 20).is_ok());
        assert_eq!(
            validate_destination(Some(0), None, 20).unwrap_err().code,
            ErrorCode::TableNumberInvalid
        );
        assert_eq!(
            validate_destination(Some(21), Some("Amy"), 20).unwrap_err().code,
            ErrorCode::TableNumberInvalid
        );
        assert!(validate_destination(None, Some("Amy"), 20).is_ok());
        assert_eq!(
            validate_destination(None, Some("   "), 20).unwrap_err().code,
            ErrorCode::OrderDestinationMissing
        );
        assert_eq!(
            validate_destination(None, None, 20).unwrap_err().code,
            ErrorCode::OrderDestinationMissing
        );
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  oat milk ".into())).as_deref(), Some("oat milk"));
        assert_eq!(normalize_text(Some("   ".into())), None);
        assert_eq!(normalize_text(None), None);
    }
}
