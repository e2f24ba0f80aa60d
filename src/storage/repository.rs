use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// 可持久化的记录
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 表名
    const TABLE: &'static str;

    /// 记录 ID
    fn id(&self) -> &str;
}

/// 仓储 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// 创建实体
    async fn create(&self, entity: &T) -> Result<T>;

    /// 根据 ID 获取实体
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    /// 更新实体，记录不存在时返回 None
    async fn update(&self, id: &str, entity: &T) -> Result<Option<T>>;

    /// 删除实体
    async fn delete(&self, id: &str) -> Result<bool>;

    /// 按写入顺序列出所有实体
    async fn list(&self) -> Result<Vec<T>>;

    /// 统计数量
    async fn count(&self) -> Result<u64>;
}
