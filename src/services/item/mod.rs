//! 菜品服务
//!
//! 提供菜品的 CRUD 操作。删除菜品时会同时从引用它的菜单中移除。

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::item::{Item, ItemDraft};
use crate::services::validation::{ValidationPolicy, validate_item};
use crate::storage::store::RecordStore;

/// 菜品服务 trait
#[async_trait]
pub trait ItemService: Send + Sync {
    /// 列出所有菜品，按名称排序
    async fn list(&self) -> Result<Vec<Item>>;

    /// 菜品详情
    async fn get(&self, id: &str) -> Result<Item>;

    /// 创建菜品
    async fn create(&self, draft: ItemDraft) -> Result<Item>;

    /// 编辑菜品
    async fn update(&self, id: &str, draft: ItemDraft) -> Result<Item>;

    /// 删除菜品
    async fn delete(&self, id: &str) -> Result<()>;
}

/// 菜品服务实现
pub struct ItemServiceImpl {
    store: RecordStore,
    validation: ValidationPolicy,
}

impl ItemServiceImpl {
    pub fn new(store: RecordStore, validation: ValidationPolicy) -> Self {
        Self { store, validation }
    }

    async fn check(&self, draft: ItemDraft) -> Result<ItemDraft> {
        let missing = self.store.missing_ingredients(&draft.ingredients).await?;
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Unknown ingredients: {}",
                missing.join(", ")
            )));
        }

        match validate_item(draft, &self.validation) {
            Ok(validated) => Ok(validated.into_inner()),
            Err(e) => {
                warn!("Item rejected: {}", e);
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl ItemService for ItemServiceImpl {
    async fn list(&self) -> Result<Vec<Item>> {
        let mut items = self.store.fetch_all_items().await?;
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<Item> {
        self.store
            .items()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item not found: {}", id)))
    }

    async fn create(&self, draft: ItemDraft) -> Result<Item> {
        let draft = self.check(draft).await?;
        let item = self.store.items().create(&Item::from_draft(draft)).await?;
        info!("Item created: {} ({})", item.id, item.name);
        Ok(item)
    }

    async fn update(&self, id: &str, draft: ItemDraft) -> Result<Item> {
        let mut item = self.get(id).await?;
        item.apply(self.check(draft).await?);

        let item = self
            .store
            .items()
            .update(id, &item)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item not found: {}", id)))?;
        info!("Item updated: {}", item.id);
        Ok(item)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_item(id).await? {
            return Err(AppError::NotFound(format!("Item not found: {}", id)));
        }
        info!("Item deleted: {}", id);
        Ok(())
    }
}

/// 创建菜品服务
pub fn create_item_service(store: RecordStore, validation: ValidationPolicy) -> Box<dyn ItemService> {
    Box::new(ItemServiceImpl::new(store, validation))
}
