//! 核心数据模型模块
//!
//! 定义 Carte 的核心数据结构：Menu, Item, Ingredient。

pub mod ingredient;
pub mod item;
pub mod menu;

pub use ingredient::*;
pub use item::*;
pub use menu::*;

/// 按首次出现顺序去重，多对多引用按集合语义保存
pub(crate) fn unique_ids<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
