//! Data models shared by the server and its clients
//!
//! 所有模型以 camelCase JSON 传输与存储。

pub mod archive;
pub mod board;
pub mod menu;
pub mod order;

pub use archive::{ArchiveCreated, ArchiveEntry};
pub use board::{ItemGroup, ItemRef, OrderBoard, OrderCard, SortPolicy};
pub use menu::{MenuItem, MenuUpdate, default_menu};
pub use order::{
    CoffeeItem, ItemStatus, Order, OrderCreate, OrderItemInput, OrderStats, OrderStatus,
    OrderUpdate, Temperature,
};
