//! 菜单
//!
//! 存放在 `coffee:statistics:menu` 集合的 `current` 字段，
//! 首次读取时写入默认菜单。

use std::collections::HashSet;

use shared::models::{MenuItem, default_menu};
use shared::{AppError, AppResult, ErrorCode};

use crate::store::{SharedStore, collections};

#[derive(Clone)]
pub struct MenuRepository {
    store: SharedStore,
}

impl MenuRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 读取当前菜单，未配置时写入并返回默认菜单
    pub async fn get(&self) -> AppResult<Vec<MenuItem>> {
        let stored = self
            .store
            .get_field(collections::MENU, collections::MENU_FIELD)
            .await?;

        if let Some(json) = stored {
            return serde_json::from_str(&json).map_err(|e| {
                AppError::storage_corrupted(format!("Menu cannot be decoded: {}", e))
            });
        }

        let menu = default_menu();
        self.save(&menu).await?;
        tracing::info!(items = menu.len(), "Default menu initialized");
        Ok(menu)
    }

    /// 替换菜单
    pub async fn update(&self, menu: Vec<MenuItem>) -> AppResult<Vec<MenuItem>> {
        let menu = validate_menu(menu)?;
        self.save(&menu).await?;
        tracing::info!(items = menu.len(), "Menu updated");
        Ok(menu)
    }

    async fn save(&self, menu: &[MenuItem]) -> AppResult<()> {
        let json = serde_json::to_string(menu)
            .map_err(|e| AppError::internal(format!("Failed to encode menu: {}", e)))?;
        self.store
            .set_field(collections::MENU, collections::MENU_FIELD, json)
            .await?;
        Ok(())
    }
}

/// 校验菜单：非空、名称非空且不重复、每项至少一种温度
fn validate_menu(menu: Vec<MenuItem>) -> AppResult<Vec<MenuItem>> {
    if menu.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::MenuInvalid,
            "Menu must contain at least one drink",
        ));
    }

    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(menu.len());
    for (index, mut item) in menu.into_iter().enumerate() {
        item.name = item.name.trim().to_string();
        if item.name.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::MenuInvalid,
                "Drink name must not be empty",
            )
            .with_detail("index", index));
        }
        if !item.hot && !item.iced {
            return Err(AppError::with_message(
                ErrorCode::MenuInvalid,
                format!("{} must be available hot or iced", item.name),
            )
            .with_detail("name", item.name.clone()));
        }
        if !seen.insert(item.name.clone()) {
            return Err(AppError::with_message(
                ErrorCode::MenuDuplicateItem,
                format!("{} is listed more than once", item.name),
            )
            .with_detail("name", item.name.clone()));
        }
        cleaned.push(item);
    }
    Ok(cleaned)
}
