use async_trait::async_trait;
use serde::Deserialize;
use std::marker::PhantomData;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};

use crate::config::config::DatabaseConfig;
use crate::error::{AppError, Result};
use crate::storage::repository::{Record, Repository};

/// SurrealDB 连接池
#[derive(Clone)]
pub struct SurrealPool {
    /// 数据库连接，克隆后共享同一底层连接
    db: Surreal<Any>,
}

impl SurrealPool {
    /// 创建新的连接池
    pub async fn new(config: &DatabaseConfig) -> std::result::Result<Self, surrealdb::Error> {
        let db: Surreal<Any> = connect(&config.url).await?;

        // 嵌入式引擎（mem://、rocksdb://）不需要认证
        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        // 选择命名空间和数据库
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Ok(Self { db })
    }

    /// 获取内部数据库实例
    pub fn inner(&self) -> &Surreal<Any> {
        &self.db
    }
}

/// 只取记录 ID 的查询行
#[derive(Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: String,
}

/// 计数查询行
#[derive(Deserialize)]
struct CountRow {
    count: u64,
}

/// SurrealDB 仓储实现
///
/// 记录 ID 存放在 SurrealDB 的 record id 中，读取时用 `meta::id` 还原成字符串。
/// 每条记录还带有数据库生成的 `_created` 时间戳，`list` 按它返回写入顺序。
#[derive(Clone)]
pub struct SurrealRepository<T: Record> {
    pool: SurrealPool,
    _marker: PhantomData<T>,
}

impl<T: Record> SurrealRepository<T> {
    pub fn new(pool: SurrealPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// 定义写入顺序字段，可重复执行
    pub async fn ensure_schema(&self) -> Result<()> {
        self.pool
            .inner()
            .query(format!(
                "DEFINE FIELD IF NOT EXISTS _created ON TABLE {} TYPE datetime DEFAULT time::now()",
                T::TABLE
            ))
            .await?
            .check()?;
        Ok(())
    }

    /// 序列化实体并去掉 id 字段，id 由 record id 承载
    fn content(entity: &T) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(entity)?;
        if let Some(object) = value.as_object_mut() {
            object.remove("id");
        }
        Ok(value)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for SurrealRepository<T> {
    async fn create(&self, entity: &T) -> Result<T> {
        let created: Vec<IdRow> = self
            .pool
            .inner()
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN meta::id(id) AS id")
            .bind(("tb", T::TABLE))
            .bind(("id", entity.id().to_string()))
            .bind(("data", Self::content(entity)?))
            .await?
            .take(0)?;

        if created.is_empty() {
            return Err(AppError::Database(format!(
                "Failed to create {}: {}",
                T::TABLE,
                entity.id()
            )));
        }
        Ok(entity.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        let mut rows: Vec<T> = self
            .pool
            .inner()
            .query("SELECT *, meta::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", T::TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.pop())
    }

    async fn update(&self, id: &str, entity: &T) -> Result<Option<T>> {
        // MERGE keeps `_created`; every entity field is always present in the content.
        let updated: Vec<IdRow> = self
            .pool
            .inner()
            .query("UPDATE type::thing($tb, $id) MERGE $data RETURN meta::id(id) AS id")
            .bind(("tb", T::TABLE))
            .bind(("id", id.to_string()))
            .bind(("data", Self::content(entity)?))
            .await?
            .take(0)?;

        Ok((!updated.is_empty()).then(|| entity.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        if self.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.pool
            .inner()
            .query("DELETE type::thing($tb, $id)")
            .bind(("tb", T::TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<T>> {
        let rows: Vec<T> = self
            .pool
            .inner()
            .query("SELECT *, meta::id(id) AS id FROM type::table($tb) ORDER BY _created ASC")
            .bind(("tb", T::TABLE))
            .await?
            .take(0)?;
        Ok(rows)
    }

    async fn count(&self) -> Result<u64> {
        let rows: Vec<CountRow> = self
            .pool
            .inner()
            .query("SELECT count() FROM type::table($tb) GROUP ALL")
            .bind(("tb", T::TABLE))
            .await?
            .take(0)?;
        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::DatabaseType;
    use crate::models::{Ingredient, Item, ItemDraft, Menu, MenuDraft};
    use crate::storage::store::RecordStore;
    use std::sync::Arc;

    async fn embedded_pool(database: &str) -> SurrealPool {
        let config = DatabaseConfig {
            db_type: DatabaseType::SurrealDB,
            url: "mem://".to_string(),
            namespace: "carte".to_string(),
            database: database.to_string(),
            ..Default::default()
        };
        SurrealPool::new(&config).await.unwrap()
    }

    async fn repository<T: Record>(pool: &SurrealPool) -> SurrealRepository<T> {
        let repo = SurrealRepository::<T>::new(pool.clone());
        repo.ensure_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let pool = embedded_pool("crud").await;
        let repo = repository::<Ingredient>(&pool).await;

        let salt = repo.create(&Ingredient::new("salt")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get_by_id(&salt.id).await.unwrap(), Some(salt.clone()));
        assert_eq!(repo.get_by_id("ghost").await.unwrap(), None);

        let mut renamed = salt.clone();
        renamed.name = "sea salt".to_string();
        assert_eq!(repo.update(&salt.id, &renamed).await.unwrap(), Some(renamed.clone()));
        assert_eq!(repo.get_by_id(&salt.id).await.unwrap(), Some(renamed));

        let ghost = Ingredient::new("ghost");
        assert_eq!(repo.update(&ghost.id, &ghost).await.unwrap(), None);
        assert_eq!(repo.get_by_id(&ghost.id).await.unwrap(), None);

        assert!(repo.delete(&salt.id).await.unwrap());
        assert!(!repo.delete(&salt.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_across_updates() {
        let pool = embedded_pool("order").await;
        let repo = repository::<Ingredient>(&pool).await;

        let mut created = Vec::new();
        for name in ["salt", "pepper", "basil", "thyme"] {
            created.push(repo.create(&Ingredient::new(name)).await.unwrap());
        }

        let mut first = created[0].clone();
        first.name = "sea salt".to_string();
        repo.update(&first.id, &first).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["sea salt", "pepper", "basil", "thyme"]);
    }

    #[tokio::test]
    async fn test_menu_fields_survive_storage() {
        let pool = embedded_pool("menus").await;
        let repo = repository::<Menu>(&pool).await;

        let mut draft = MenuDraft::new("Summer").with_items(["a", "b"]);
        draft.expiration_date = chrono::NaiveDate::from_ymd_opt(2024, 9, 1);
        let menu = Menu::from_draft(draft);
        repo.create(&menu).await.unwrap();

        let stored = repo.get_by_id(&menu.id).await.unwrap().unwrap();
        assert_eq!(stored, menu);

        let mut undated = stored.clone();
        undated.expiration_date = None;
        repo.update(&menu.id, &undated).await.unwrap();
        assert_eq!(repo.get_by_id(&menu.id).await.unwrap(), Some(undated));
    }

    #[tokio::test]
    async fn test_delete_item_detaches_from_menus() {
        let pool = embedded_pool("detach").await;
        let store = RecordStore::new(
            Arc::new(repository::<Menu>(&pool).await),
            Arc::new(repository::<Item>(&pool).await),
            Arc::new(repository::<Ingredient>(&pool).await),
        );

        let soup = Item::from_draft(ItemDraft::new("Soup", "tomika").with_description("Chicken soup"));
        let stew = Item::from_draft(ItemDraft::new("Stew", "tomika").with_description("Beef and carrots"));
        store.items().create(&soup).await.unwrap();
        store.items().create(&stew).await.unwrap();
        let menu = Menu::from_draft(MenuDraft::new("Fall").with_items([soup.id.clone(), stew.id.clone()]));
        store.menus().create(&menu).await.unwrap();

        let loaded = store.fetch_all_menus_with_items().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].items, vec![soup.clone(), stew.clone()]);

        assert!(store.delete_item(&soup.id).await.unwrap());

        let menu = store.fetch_menu_with_items(&menu.id).await.unwrap().unwrap();
        assert_eq!(menu.menu.items, vec![stew.id.clone()]);
        assert_eq!(menu.items, vec![stew]);
        assert_eq!(store.items().count().await.unwrap(), 1);
    }
}
