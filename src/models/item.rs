//! 菜品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::unique_ids;
use crate::storage::repository::Record;

/// 菜品实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// 菜品唯一标识
    pub id: String,

    /// 菜品名称
    pub name: String,

    /// 菜品描述
    pub description: String,

    /// 负责的厨师（用户/账号标识）
    pub chef: String,

    /// 是否为常规菜品（否则为特色菜）
    #[serde(default)]
    pub standard: bool,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 关联的食材 ID
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Item {
    /// 创建新菜品
    pub fn new(name: &str, description: &str, chef: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            chef: chef.to_string(),
            standard: false,
            created_at: Utc::now(),
            ingredients: Vec::new(),
        }
    }

    /// 由已校验的草稿创建菜品
    pub fn from_draft(draft: ItemDraft) -> Self {
        let mut item = Self::new(&draft.name, "", &draft.chef);
        item.apply(draft);
        item
    }

    /// 用草稿覆盖可编辑字段，保留 id 与创建时间
    pub fn apply(&mut self, draft: ItemDraft) {
        self.name = draft.name;
        self.description = draft.description.unwrap_or_default();
        self.chef = draft.chef;
        self.standard = draft.standard;
        self.ingredients = unique_ids(draft.ingredients);
    }

    /// 移除对某个食材的引用，返回是否发生变化
    pub fn detach_ingredient(&mut self, ingredient_id: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|id| id != ingredient_id);
        self.ingredients.len() != before
    }
}

impl Record for Item {
    const TABLE: &'static str = "item";

    fn id(&self) -> &str {
        &self.id
    }
}

/// 菜品草稿
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    /// 描述可能缺失，由校验策略决定是否接受
    pub description: Option<String>,
    pub chef: String,
    pub standard: bool,
    pub ingredients: Vec<String>,
}

impl ItemDraft {
    pub fn new(name: &str, chef: &str) -> Self {
        Self {
            name: name.to_string(),
            chef: chef.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn standard(mut self, standard: bool) -> Self {
        self.standard = standard;
        self
    }

    /// 设置食材引用，重复的 ID 只保留一次
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = unique_ids(ingredients.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_draft() {
        let draft = ItemDraft::new("Soup", "tomika")
            .with_description("Chicken soup")
            .standard(true)
            .with_ingredients(["salt", "pepper", "salt"]);
        let item = Item::from_draft(draft);

        assert_eq!(item.name, "Soup");
        assert_eq!(item.description, "Chicken soup");
        assert_eq!(item.chef, "tomika");
        assert!(item.standard);
        assert_eq!(item.ingredients, vec!["salt".to_string(), "pepper".to_string()]);
    }

    #[test]
    fn test_detach_ingredient() {
        let mut item = Item::from_draft(
            ItemDraft::new("Soup", "tomika").with_ingredients(["salt", "pepper"]),
        );

        assert!(item.detach_ingredient("salt"));
        assert!(!item.detach_ingredient("salt"));
        assert_eq!(item.ingredients, vec!["pepper".to_string()]);
    }
}
