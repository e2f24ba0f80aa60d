//! 食材数据模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 食材实体，被多个菜品共享引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

impl Record for Ingredient {
    const TABLE: &'static str = "ingredient";

    fn id(&self) -> &str {
        &self.id
    }
}
