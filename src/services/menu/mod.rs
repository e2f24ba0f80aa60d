//! 菜单服务
//!
//! 提供菜单的 CRUD 操作以及当前菜单列表。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::menu::{Menu, MenuDraft, MenuWithItems};
use crate::services::clock::Clock;
use crate::services::validation::{ValidationPolicy, validate_menu};
use crate::services::visibility::{MenuListing, VisibilityPolicy, classify_and_order};
use crate::storage::store::RecordStore;

/// 菜单服务 trait
#[async_trait]
pub trait MenuService: Send + Sync {
    /// 当前菜单列表：有效菜单、无日期菜单（以及按配置保留的过期菜单）
    async fn list_current(&self) -> Result<MenuListing<MenuWithItems>>;

    /// 菜单详情
    async fn get(&self, id: &str) -> Result<MenuWithItems>;

    /// 创建菜单
    async fn create(&self, draft: MenuDraft) -> Result<Menu>;

    /// 编辑菜单，重新校验全部规则
    async fn update(&self, id: &str, draft: MenuDraft) -> Result<Menu>;

    /// 删除菜单
    async fn delete(&self, id: &str) -> Result<()>;
}

/// 菜单服务实现
pub struct MenuServiceImpl {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    validation: ValidationPolicy,
    visibility: VisibilityPolicy,
}

impl MenuServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        store: RecordStore,
        clock: Arc<dyn Clock>,
        validation: ValidationPolicy,
        visibility: VisibilityPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            validation,
            visibility,
        }
    }

    /// 引用检查 + 策略校验
    async fn check(&self, draft: MenuDraft) -> Result<MenuDraft> {
        let missing = self.store.missing_items(&draft.items).await?;
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Unknown items: {}",
                missing.join(", ")
            )));
        }

        let today = self.visibility.reference_date(self.clock.now());
        match validate_menu(draft, today, &self.validation) {
            Ok(validated) => Ok(validated.into_inner()),
            Err(e) => {
                warn!("Menu rejected: {}", e);
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl MenuService for MenuServiceImpl {
    async fn list_current(&self) -> Result<MenuListing<MenuWithItems>> {
        let menus = self.store.fetch_all_menus_with_items().await?;
        Ok(classify_and_order(&menus, self.clock.now(), &self.visibility))
    }

    async fn get(&self, id: &str) -> Result<MenuWithItems> {
        self.store
            .fetch_menu_with_items(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu not found: {}", id)))
    }

    async fn create(&self, draft: MenuDraft) -> Result<Menu> {
        let draft = self.check(draft).await?;
        let menu = self.store.menus().create(&Menu::from_draft(draft)).await?;
        info!("Menu created: {} ({})", menu.id, menu.season);
        Ok(menu)
    }

    async fn update(&self, id: &str, draft: MenuDraft) -> Result<Menu> {
        let mut menu = self
            .store
            .menus()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu not found: {}", id)))?;

        menu.apply(self.check(draft).await?);

        let menu = self
            .store
            .menus()
            .update(id, &menu)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu not found: {}", id)))?;
        info!("Menu updated: {}", menu.id);
        Ok(menu)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.menus().delete(id).await? {
            return Err(AppError::NotFound(format!("Menu not found: {}", id)));
        }
        info!("Menu deleted: {}", id);
        Ok(())
    }
}

/// 创建菜单服务
pub fn create_menu_service(
    store: RecordStore,
    clock: Arc<dyn Clock>,
    validation: ValidationPolicy,
    visibility: VisibilityPolicy,
) -> Box<dyn MenuService> {
    Box::new(MenuServiceImpl::new(store, clock, validation, visibility))
}
