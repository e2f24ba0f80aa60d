//! 菜品 DTO
//!
//! 名称长度等请求级约束在这里校验，业务规则（描述长度、食材数量）由校验策略负责。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::item::{Item, ItemDraft};

/// 创建/编辑菜品请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemRequest {
    /// 菜品名称
    #[validate(length(min = 1, max = 20))]
    pub name: String,

    /// 描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 厨师标识
    #[validate(length(min = 1))]
    pub chef: String,

    /// 是否为常规菜品
    #[serde(default)]
    pub standard: bool,

    /// 食材 ID
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl ItemRequest {
    /// 去掉名称和厨师标识首尾空白，描述由校验策略处理
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.chef = self.chef.trim().to_string();
        self
    }
}

impl From<ItemRequest> for ItemDraft {
    fn from(request: ItemRequest) -> Self {
        let mut draft = ItemDraft::new(&request.name, &request.chef)
            .standard(request.standard)
            .with_ingredients(request.ingredients);
        draft.description = request.description;
        draft
    }
}

/// 菜品响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub chef: String,
    pub standard: bool,
    pub created_at: DateTime<Utc>,
    pub ingredients: Vec<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            chef: item.chef,
            standard: item.standard,
            created_at: item.created_at,
            ingredients: item.ingredients,
        }
    }
}

/// 菜品列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemResponse>,
    pub total: usize,
}

impl From<Vec<Item>> for ListItemsResponse {
    fn from(items: Vec<Item>) -> Self {
        let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}
