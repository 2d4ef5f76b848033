//! Menu Model

use super::order::Temperature;
use serde::{Deserialize, Serialize};

/// 菜单条目：饮品名称及可选温度
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub hot: bool,
    pub iced: bool,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, hot: bool, iced: bool) -> Self {
        Self {
            name: name.into(),
            hot,
            iced,
        }
    }

    /// 该温度是否可点
    pub fn allows(&self, temperature: Temperature) -> bool {
        match temperature {
            Temperature::Hot => self.hot,
            Temperature::Iced => self.iced,
        }
    }
}

/// 默认菜单（首次读取时写入）
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Black 美式", true, true),
        MenuItem::new("White 拿铁", true, true),
        MenuItem::new("Mocha 摩卡", true, true),
        MenuItem::new("Choc 巧克力", true, true),
        MenuItem::new("Milk 牛奶", true, true),
        MenuItem::new("Piccolo", true, false),
    ]
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuUpdate {
    pub menu: Vec<MenuItem>,
}
