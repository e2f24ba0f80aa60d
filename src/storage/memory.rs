//! 内存存储
//!
//! 基于 DashMap 的仓储实现，用于开发环境和测试。

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{AppError, Result};
use crate::storage::repository::{Record, Repository};

/// 内存仓储
///
/// 每条记录附带写入序号，`list` 按序号返回，模拟数据库的插入顺序。
pub struct InMemoryRepository<T: Record> {
    records: DashMap<String, (u64, T)>,
    sequence: AtomicU64,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> Result<T> {
        match self.records.entry(entity.id().to_string()) {
            Entry::Occupied(entry) => Err(AppError::Database(format!(
                "{} already exists: {}",
                T::TABLE,
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                entry.insert((seq, entity.clone()));
                Ok(entity.clone())
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.records.get(id).map(|entry| entry.value().1.clone()))
    }

    async fn update(&self, id: &str, entity: &T) -> Result<Option<T>> {
        match self.records.get_mut(id) {
            Some(mut entry) => {
                entry.value_mut().1 = entity.clone();
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let mut entries: Vec<(u64, T)> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, record)| record).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ingredient::Ingredient;

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let repo = InMemoryRepository::<Ingredient>::new();
        let salt = repo.create(&Ingredient::new("salt")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get_by_id(&salt.id).await.unwrap(), Some(salt.clone()));

        let mut renamed = salt.clone();
        renamed.name = "sea salt".to_string();
        assert!(repo.update(&salt.id, &renamed).await.unwrap().is_some());
        assert_eq!(
            repo.get_by_id(&salt.id).await.unwrap().map(|i| i.name),
            Some("sea salt".to_string())
        );

        assert!(repo.delete(&salt.id).await.unwrap());
        assert!(!repo.delete(&salt.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryRepository::<Ingredient>::new();
        let ghost = Ingredient::new("ghost");
        assert!(repo.update(&ghost.id, &ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let repo = InMemoryRepository::<Ingredient>::new();
        let salt = Ingredient::new("salt");
        repo.create(&salt).await.unwrap();

        let err = repo.create(&salt).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryRepository::<Ingredient>::new();
        for name in ["salt", "pepper", "basil", "thyme"] {
            repo.create(&Ingredient::new(name)).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["salt", "pepper", "basil", "thyme"]);
    }
}
