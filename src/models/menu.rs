//! 菜单数据模型
//!
//! 菜单引用（而非拥有）菜品，同一菜品可以出现在多个菜单上。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::item::Item;
use crate::models::unique_ids;
use crate::services::visibility::ListedMenu;
use crate::storage::repository::Record;

/// 菜单实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// 菜单唯一标识
    pub id: String,

    /// 季节标签
    pub season: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 过期日期（为空表示长期有效）
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,

    /// 关联的菜品 ID
    #[serde(default)]
    pub items: Vec<String>,
}

impl Menu {
    /// 创建新菜单
    pub fn new(season: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            season: season.to_string(),
            created_at: Utc::now(),
            expiration_date: None,
            items: Vec::new(),
        }
    }

    /// 由已校验的草稿创建菜单
    pub fn from_draft(draft: MenuDraft) -> Self {
        let mut menu = Self::new(&draft.season);
        menu.apply(draft);
        menu
    }

    /// 用草稿覆盖可编辑字段，保留 id 与创建时间
    pub fn apply(&mut self, draft: MenuDraft) {
        self.season = draft.season;
        self.expiration_date = draft.expiration_date;
        self.items = unique_ids(draft.items);
    }

    /// 移除对某个菜品的引用，返回是否发生变化
    pub fn detach_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|id| id != item_id);
        self.items.len() != before
    }
}

impl Record for Menu {
    const TABLE: &'static str = "menu";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ListedMenu for Menu {
    fn season(&self) -> &str {
        &self.season
    }

    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 菜单草稿
///
/// 创建或编辑时提交的候选数据，写入存储前必须经过校验。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuDraft {
    pub season: String,
    pub expiration_date: Option<NaiveDate>,
    pub items: Vec<String>,
}

impl MenuDraft {
    pub fn new(season: &str) -> Self {
        Self {
            season: season.to_string(),
            ..Default::default()
        }
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// 设置菜品引用，重复的 ID 只保留一次
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = unique_ids(items.into_iter().map(Into::into));
        self
    }
}

/// 预加载了菜品的菜单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuWithItems {
    pub menu: Menu,
    /// 按菜单中的引用顺序解析出的菜品，已删除的引用被跳过
    pub items: Vec<Item>,
}

impl ListedMenu for MenuWithItems {
    fn season(&self) -> &str {
        &self.menu.season
    }

    fn expiration_date(&self) -> Option<NaiveDate> {
        self.menu.expiration_date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.menu.created_at
    }
}
