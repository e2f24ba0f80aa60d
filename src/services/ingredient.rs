//! 食材服务

use async_trait::async_trait;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::ingredient::Ingredient;
use crate::storage::store::RecordStore;

#[async_trait]
pub trait IngredientService: Send + Sync {
    /// 列出所有食材，按名称排序
    async fn list(&self) -> Result<Vec<Ingredient>>;

    async fn create(&self, name: &str) -> Result<Ingredient>;

    /// 删除食材，并从引用它的菜品中移除
    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct IngredientServiceImpl {
    store: RecordStore,
}

impl IngredientServiceImpl {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IngredientService for IngredientServiceImpl {
    async fn list(&self) -> Result<Vec<Ingredient>> {
        let mut ingredients = self.store.fetch_all_ingredients().await?;
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ingredients)
    }

    async fn create(&self, name: &str) -> Result<Ingredient> {
        let ingredient = self.store.ingredients().create(&Ingredient::new(name)).await?;
        info!("Ingredient created: {} ({})", ingredient.id, ingredient.name);
        Ok(ingredient)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_ingredient(id).await? {
            return Err(AppError::NotFound(format!("Ingredient not found: {}", id)));
        }
        info!("Ingredient deleted: {}", id);
        Ok(())
    }
}

/// 创建食材服务
pub fn create_ingredient_service(store: RecordStore) -> Box<dyn IngredientService> {
    Box::new(IngredientServiceImpl::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sorted_and_delete() {
        let service = IngredientServiceImpl::new(RecordStore::in_memory());
        service.create("salt").await.unwrap();
        let pepper = service.create("pepper").await.unwrap();

        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["pepper", "salt"]);

        service.delete(&pepper.id).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);
        assert!(matches!(service.delete(&pepper.id).await, Err(AppError::NotFound(_))));
    }
}
