//! 菜单可见性与排序策略
//!
//! 将全部菜单划分为"有效"（未过期）与"无日期"两组，并分别排序用于展示。
//! 过期菜单按配置丢弃或单独归为一组。整个过程是纯函数，不修改输入。

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::config::config::PolicyConfig;

/// 过期日期的比较方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryComparison {
    /// 过期日期当天仍然有效（`>=`）
    #[default]
    Inclusive,
    /// 过期日期当天即视为失效（`>`）
    Exclusive,
}

impl ExpiryComparison {
    /// 判断过期日期相对参考日期是否仍然有效
    pub fn is_current(self, expiration_date: NaiveDate, reference_date: NaiveDate) -> bool {
        match self {
            ExpiryComparison::Inclusive => expiration_date >= reference_date,
            ExpiryComparison::Exclusive => expiration_date > reference_date,
        }
    }
}

/// 过期菜单的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpiredMenus {
    /// 静默丢弃
    #[default]
    Drop,
    /// 放入单独的 expired 分组
    Separate,
}

/// 有效菜单的排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActiveOrder {
    /// 按过期日期升序，最早过期的在前
    #[default]
    ExpirationAscending,
    /// 按创建时间降序，最新创建的在前
    CreatedDescending,
}

/// 可见性策略配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPolicy {
    pub comparison: ExpiryComparison,
    pub expired: ExpiredMenus,
    pub active_order: ActiveOrder,
    /// 计算"今天"时使用的时区偏移
    pub utc_offset: FixedOffset,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            comparison: ExpiryComparison::default(),
            expired: ExpiredMenus::default(),
            active_order: ActiveOrder::default(),
            utc_offset: Utc.fix(),
        }
    }
}

impl VisibilityPolicy {
    /// 参考时刻在配置时区下对应的日期
    pub fn reference_date(&self, reference_instant: DateTime<Utc>) -> NaiveDate {
        reference_instant
            .with_timezone(&self.utc_offset)
            .date_naive()
    }
}

impl From<&PolicyConfig> for VisibilityPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            comparison: config.expiry_comparison,
            expired: config.expired_menus,
            active_order: config.active_order,
            utc_offset: config.utc_offset(),
        }
    }
}

/// 可参与列表划分的菜单视图
pub trait ListedMenu {
    fn season(&self) -> &str;
    fn expiration_date(&self) -> Option<NaiveDate>;
    fn created_at(&self) -> DateTime<Utc>;
}

/// 划分结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuListing<M> {
    /// 未过期的菜单
    pub active: Vec<M>,
    /// 没有过期日期的菜单
    pub undated: Vec<M>,
    /// 已过期的菜单，仅在 `ExpiredMenus::Separate` 时非空
    pub expired: Vec<M>,
}

impl<M> Default for MenuListing<M> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            undated: Vec::new(),
            expired: Vec::new(),
        }
    }
}

impl<M> MenuListing<M> {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.undated.is_empty() && self.expired.is_empty()
    }
}

/// 划分并排序菜单
///
/// 所有排序都是稳定排序，键相同时保留输入顺序，因此相同输入总是得到相同输出。
pub fn classify_and_order<M>(
    all_menus: &[M],
    reference_instant: DateTime<Utc>,
    policy: &VisibilityPolicy,
) -> MenuListing<M>
where
    M: ListedMenu + Clone,
{
    let today = policy.reference_date(reference_instant);
    let mut listing = MenuListing::default();

    for menu in all_menus {
        match menu.expiration_date() {
            None => listing.undated.push(menu.clone()),
            Some(date) if policy.comparison.is_current(date, today) => {
                listing.active.push(menu.clone())
            }
            Some(_) => {
                if policy.expired == ExpiredMenus::Separate {
                    listing.expired.push(menu.clone());
                }
            }
        }
    }

    match policy.active_order {
        ActiveOrder::ExpirationAscending => listing.active.sort_by_key(|m| m.expiration_date()),
        ActiveOrder::CreatedDescending => listing
            .active
            .sort_by(|a, b| b.created_at().cmp(&a.created_at())),
    }
    listing.undated.sort_by(|a, b| a.season().cmp(b.season()));
    listing
        .expired
        .sort_by(|a, b| b.expiration_date().cmp(&a.expiration_date()));

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Fixture {
        name: &'static str,
        season: &'static str,
        expiration_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
    }

    impl ListedMenu for Fixture {
        fn season(&self) -> &str {
            self.season
        }

        fn expiration_date(&self) -> Option<NaiveDate> {
            self.expiration_date
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn menu(name: &'static str, season: &'static str, offset_days: Option<i64>) -> Fixture {
        Fixture {
            name,
            season,
            expiration_date: offset_days.map(|d| today() + Duration::days(d)),
            created_at: now(),
        }
    }

    fn names(menus: &[Fixture]) -> Vec<&'static str> {
        menus.iter().map(|m| m.name).collect()
    }

    #[test]
    fn test_reference_scenario() {
        let menus = vec![
            menu("A", "Summer", Some(5)),
            menu("B", "Winter", Some(-1)),
            menu("C", "Fall", None),
            menu("D", "Autumn", None),
        ];

        let listing = classify_and_order(&menus, now(), &VisibilityPolicy::default());

        assert_eq!(names(&listing.active), vec!["A"]);
        assert_eq!(names(&listing.undated), vec!["D", "C"]);
        assert!(listing.expired.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let listing = classify_and_order::<Fixture>(&[], now(), &VisibilityPolicy::default());
        assert!(listing.is_empty());
    }

    #[test]
    fn test_all_expired_input_is_dropped() {
        let menus = vec![menu("A", "Summer", Some(-3)), menu("B", "Winter", Some(-1))];
        let listing = classify_and_order(&menus, now(), &VisibilityPolicy::default());
        assert!(listing.is_empty());
    }

    #[test]
    fn test_undated_never_active() {
        let menus = vec![menu("C", "Fall", None)];

        for days in [-1000, 0, 1000] {
            let instant = now() + Duration::days(days);
            let listing = classify_and_order(&menus, instant, &VisibilityPolicy::default());
            assert_eq!(names(&listing.undated), vec!["C"]);
            assert!(listing.active.is_empty());
        }
    }

    #[rstest]
    #[case(ExpiryComparison::Inclusive, 1)]
    #[case(ExpiryComparison::Exclusive, 0)]
    fn test_expiring_today_boundary(#[case] comparison: ExpiryComparison, #[case] active: usize) {
        let menus = vec![menu("T", "Spring", Some(0))];
        let policy = VisibilityPolicy {
            comparison,
            ..Default::default()
        };

        let listing = classify_and_order(&menus, now(), &policy);
        assert_eq!(listing.active.len(), active);
    }

    #[test]
    fn test_active_sorted_by_expiration() {
        let menus = vec![
            menu("late", "a", Some(30)),
            menu("soon", "b", Some(1)),
            menu("mid", "c", Some(10)),
        ];

        let listing = classify_and_order(&menus, now(), &VisibilityPolicy::default());
        assert_eq!(names(&listing.active), vec!["soon", "mid", "late"]);
    }

    #[test]
    fn test_active_sorted_by_created_descending() {
        let mut older = menu("older", "a", Some(1));
        older.created_at = now() - Duration::days(2);
        let newer = menu("newer", "b", Some(30));

        let policy = VisibilityPolicy {
            active_order: ActiveOrder::CreatedDescending,
            ..Default::default()
        };
        let listing = classify_and_order(&[older, newer], now(), &policy);
        assert_eq!(names(&listing.active), vec!["newer", "older"]);
    }

    #[test]
    fn test_undated_sorted_case_sensitive() {
        let menus = vec![
            menu("x", "fall", None),
            menu("y", "Winter", None),
            menu("z", "Autumn", None),
        ];

        let listing = classify_and_order(&menus, now(), &VisibilityPolicy::default());
        assert_eq!(names(&listing.undated), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let menus = vec![menu("first", "Fall", None), menu("second", "Fall", None)];
        let listing = classify_and_order(&menus, now(), &VisibilityPolicy::default());
        assert_eq!(names(&listing.undated), vec!["first", "second"]);
    }

    #[test]
    fn test_separate_expired_partition() {
        let menus = vec![
            menu("old", "Winter", Some(-10)),
            menu("recent", "Spring", Some(-1)),
            menu("A", "Summer", Some(5)),
        ];
        let policy = VisibilityPolicy {
            expired: ExpiredMenus::Separate,
            ..Default::default()
        };

        let listing = classify_and_order(&menus, now(), &policy);
        assert_eq!(names(&listing.active), vec!["A"]);
        assert_eq!(names(&listing.expired), vec!["recent", "old"]);
    }

    #[test]
    fn test_idempotent() {
        let menus = vec![
            menu("A", "Summer", Some(5)),
            menu("B", "Winter", Some(-1)),
            menu("C", "Fall", None),
        ];
        let policy = VisibilityPolicy::default();

        let first = classify_and_order(&menus, now(), &policy);
        let second = classify_and_order(&menus, now(), &policy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reference_date_uses_offset() {
        // 2024-06-15 23:30 UTC 在 UTC+2 已经是 6 月 16 日
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 23, 30, 0).unwrap();
        let policy = VisibilityPolicy {
            utc_offset: FixedOffset::east_opt(2 * 3600).unwrap(),
            ..Default::default()
        };

        assert_eq!(
            policy.reference_date(instant),
            NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()
        );

        let menus = vec![menu("T", "Spring", Some(0))];
        let listing = classify_and_order(&menus, instant, &policy);
        assert!(listing.active.is_empty());
    }
}
