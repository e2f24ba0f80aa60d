//! 记录存储
//!
//! 组合菜单、菜品、食材三个仓储，提供预加载查询以及多对多引用的维护。

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::models::{Ingredient, Item, Menu, MenuWithItems};
use crate::storage::memory::InMemoryRepository;
use crate::storage::repository::Repository;

#[derive(Clone)]
pub struct RecordStore {
    menus: Arc<dyn Repository<Menu>>,
    items: Arc<dyn Repository<Item>>,
    ingredients: Arc<dyn Repository<Ingredient>>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("menus", &"Arc<dyn Repository<Menu>>")
            .field("items", &"Arc<dyn Repository<Item>>")
            .field("ingredients", &"Arc<dyn Repository<Ingredient>>")
            .finish()
    }
}

impl RecordStore {
    pub fn new(
        menus: Arc<dyn Repository<Menu>>,
        items: Arc<dyn Repository<Item>>,
        ingredients: Arc<dyn Repository<Ingredient>>,
    ) -> Self {
        Self {
            menus,
            items,
            ingredients,
        }
    }

    /// 创建内存存储
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<Menu>::new()),
            Arc::new(InMemoryRepository::<Item>::new()),
            Arc::new(InMemoryRepository::<Ingredient>::new()),
        )
    }

    pub fn menus(&self) -> &Arc<dyn Repository<Menu>> {
        &self.menus
    }

    pub fn items(&self) -> &Arc<dyn Repository<Item>> {
        &self.items
    }

    pub fn ingredients(&self) -> &Arc<dyn Repository<Ingredient>> {
        &self.ingredients
    }

    /// 获取所有菜单并预加载菜品
    pub async fn fetch_all_menus_with_items(&self) -> Result<Vec<MenuWithItems>> {
        let menus = self.menus.list().await?;
        let items: HashMap<String, Item> = self
            .items
            .list()
            .await?
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        Ok(menus
            .into_iter()
            .map(|menu| resolve_items(menu, &items))
            .collect())
    }

    /// 获取单个菜单并预加载菜品
    pub async fn fetch_menu_with_items(&self, id: &str) -> Result<Option<MenuWithItems>> {
        let Some(menu) = self.menus.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut items = HashMap::new();
        for item_id in &menu.items {
            if let Some(item) = self.items.get_by_id(item_id).await? {
                items.insert(item.id.clone(), item);
            }
        }
        Ok(Some(resolve_items(menu, &items)))
    }

    /// 获取所有菜品
    pub async fn fetch_all_items(&self) -> Result<Vec<Item>> {
        self.items.list().await
    }

    /// 获取所有食材
    pub async fn fetch_all_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.ingredients.list().await
    }

    /// 返回不存在的菜品 ID
    pub async fn missing_items(&self, ids: &[String]) -> Result<Vec<String>> {
        let mut missing = Vec::new();
        for id in ids {
            if self.items.get_by_id(id).await?.is_none() {
                missing.push(id.clone());
            }
        }
        Ok(missing)
    }

    /// 返回不存在的食材 ID
    pub async fn missing_ingredients(&self, ids: &[String]) -> Result<Vec<String>> {
        let mut missing = Vec::new();
        for id in ids {
            if self.ingredients.get_by_id(id).await?.is_none() {
                missing.push(id.clone());
            }
        }
        Ok(missing)
    }

    /// 删除菜品，并从所有引用它的菜单中移除
    ///
    /// 先解除引用再删除记录，中途失败时不会留下指向已删除菜品的引用。
    pub async fn delete_item(&self, id: &str) -> Result<bool> {
        if self.items.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        for mut menu in self.menus.list().await? {
            if menu.detach_item(id) {
                debug!("Detaching item {} from menu {}", id, menu.id);
                self.menus.update(&menu.id, &menu).await?;
            }
        }
        self.items.delete(id).await
    }

    /// 删除食材，并从所有引用它的菜品中移除
    pub async fn delete_ingredient(&self, id: &str) -> Result<bool> {
        if self.ingredients.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        for mut item in self.items.list().await? {
            if item.detach_ingredient(id) {
                debug!("Detaching ingredient {} from item {}", id, item.id);
                self.items.update(&item.id, &item).await?;
            }
        }
        self.ingredients.delete(id).await
    }

    /// 检查存储是否可用
    pub async fn health_check(&self) -> Result<bool> {
        self.menus.count().await.map(|_| true)
    }
}

fn resolve_items(menu: Menu, items: &HashMap<String, Item>) -> MenuWithItems {
    let resolved = menu
        .items
        .iter()
        .filter_map(|id| items.get(id).cloned())
        .collect();
    MenuWithItems {
        menu,
        items: resolved,
    }
}
