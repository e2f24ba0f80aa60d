//! 菜单 DTO

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::item_dto::ItemResponse;
use crate::models::menu::{Menu, MenuDraft, MenuWithItems};
use crate::services::visibility::MenuListing;

/// 创建/编辑菜单请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuRequest {
    /// 季节标签
    #[validate(length(min = 1, max = 20))]
    pub season: String,

    /// 过期日期（YYYY-MM-DD）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,

    /// 菜品 ID
    #[serde(default)]
    pub items: Vec<String>,
}

impl MenuRequest {
    /// 去掉文本字段首尾空白，长度校验基于处理后的值
    pub fn trimmed(mut self) -> Self {
        self.season = self.season.trim().to_string();
        self
    }
}

impl From<MenuRequest> for MenuDraft {
    fn from(request: MenuRequest) -> Self {
        let mut draft = MenuDraft::new(&request.season).with_items(request.items);
        draft.expiration_date = request.expiration_date;
        draft
    }
}

/// 菜单响应（写操作返回，仅包含菜品 ID）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub id: String,
    pub season: String,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<NaiveDate>,
    pub items: Vec<String>,
}

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            season: menu.season,
            created_at: menu.created_at,
            expiration_date: menu.expiration_date,
            items: menu.items,
        }
    }
}

/// 菜单详情响应（包含解析后的菜品）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDetailResponse {
    pub id: String,
    pub season: String,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<NaiveDate>,
    pub items: Vec<ItemResponse>,
}

impl From<MenuWithItems> for MenuDetailResponse {
    fn from(loaded: MenuWithItems) -> Self {
        let MenuWithItems { menu, items } = loaded;
        Self {
            id: menu.id,
            season: menu.season,
            created_at: menu.created_at,
            expiration_date: menu.expiration_date,
            items: items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

/// 当前菜单列表响应
///
/// `expired` 只有在配置为保留过期菜单时才会有内容。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMenusResponse {
    pub menus: Vec<MenuDetailResponse>,
    pub no_date: Vec<MenuDetailResponse>,
    pub expired: Vec<MenuDetailResponse>,
}

impl From<MenuListing<MenuWithItems>> for ListMenusResponse {
    fn from(listing: MenuListing<MenuWithItems>) -> Self {
        let convert = |menus: Vec<MenuWithItems>| -> Vec<MenuDetailResponse> {
            menus.into_iter().map(MenuDetailResponse::from).collect()
        };
        Self {
            menus: convert(listing.active),
            no_date: convert(listing.undated),
            expired: convert(listing.expired),
        }
    }
}
