//! DTO 模块
//!
//! API 请求和响应的数据传输对象。

pub mod ingredient_dto;
pub mod item_dto;
pub mod menu_dto;
