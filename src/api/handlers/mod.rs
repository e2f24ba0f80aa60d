//! Handlers 模块
//!
//! 定义 API 请求处理器。

pub mod ingredient_handler;
pub mod item_handler;
pub mod menu_handler;

use crate::error::{AppError, Result};
use crate::observability::AppMetrics;

/// 记录写操作结果：成功计入写入计数，策略拒绝按种类计数
pub(crate) fn track_write<T>(
    metrics: &AppMetrics,
    entity: &str,
    operation: &str,
    result: Result<T>,
) -> Result<T> {
    match &result {
        Ok(_) => metrics.record_write(entity, operation),
        Err(AppError::Policy(rejection)) => metrics.record_rejection(rejection.kind()),
        Err(_) => {}
    }
    result
}
