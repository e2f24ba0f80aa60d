//! Carte - 餐厅菜单管理服务
//!
//! 维护菜单、菜品和食材，决定哪些菜单当前可见以及它们的展示顺序，
//! 并在写入存储前执行校验策略。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod storage;
