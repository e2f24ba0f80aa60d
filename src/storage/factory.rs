//! 存储工厂模块
//!
//! 根据配置创建相应的记录存储实例。

use tracing::info;

use crate::config::config::{DatabaseConfig, DatabaseType};
use crate::error::Result;
use crate::storage::store::RecordStore;

#[cfg(not(feature = "surrealdb"))]
use crate::error::AppError;

#[cfg(feature = "surrealdb")]
use crate::models::{Ingredient, Item, Menu};
#[cfg(feature = "surrealdb")]
use crate::storage::surrealdb::{SurrealPool, SurrealRepository};
#[cfg(feature = "surrealdb")]
use std::sync::Arc;

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建存储实例
    pub async fn create(config: &DatabaseConfig) -> Result<RecordStore> {
        info!("Creating record store (backend: {})", config.db_type);
        match config.db_type {
            DatabaseType::Memory => Ok(RecordStore::in_memory()),
            DatabaseType::SurrealDB => Self::create_surrealdb(config).await,
        }
    }

    /// 创建 SurrealDB 存储实例
    #[cfg(feature = "surrealdb")]
    async fn create_surrealdb(config: &DatabaseConfig) -> Result<RecordStore> {
        let pool = SurrealPool::new(config).await?;
        info!(
            "Connected to SurrealDB at {} ({}/{})",
            config.url, config.namespace, config.database
        );

        let menus = SurrealRepository::<Menu>::new(pool.clone());
        let items = SurrealRepository::<Item>::new(pool.clone());
        let ingredients = SurrealRepository::<Ingredient>::new(pool);
        menus.ensure_schema().await?;
        items.ensure_schema().await?;
        ingredients.ensure_schema().await?;

        Ok(RecordStore::new(
            Arc::new(menus),
            Arc::new(items),
            Arc::new(ingredients),
        ))
    }

    #[cfg(not(feature = "surrealdb"))]
    async fn create_surrealdb(_config: &DatabaseConfig) -> Result<RecordStore> {
        Err(AppError::Config(
            "SurrealDB feature is not enabled. Enable 'surrealdb' feature to use SurrealDB."
                .into(),
        ))
    }
}
