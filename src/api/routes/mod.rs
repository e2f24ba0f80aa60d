//! Routes 模块
//!
//! 定义 API 路由。

pub mod ingredient_routes;
pub mod item_routes;
pub mod menu_routes;
