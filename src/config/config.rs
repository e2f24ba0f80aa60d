use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::validation::{
    DEFAULT_MIN_DESCRIPTION_CHARS, DEFAULT_MIN_INGREDIENTS, DEFAULT_MIN_MENU_ITEMS,
};
use crate::services::visibility::{ActiveOrder, ExpiredMenus, ExpiryComparison};

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// 进程内存储，重启后数据丢失
    #[default]
    Memory,
    /// SurrealDB
    SurrealDB,
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::Memory => write!(f, "memory"),
            DatabaseType::SurrealDB => write!(f, "surrealdb"),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 存储后端
    pub db_type: DatabaseType,
    /// SurrealDB 连接地址（如 ws://localhost:8000、mem://）
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名，为空时跳过登录
    pub username: String,
    /// 密码
    pub password: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 允许跨域的来源，为空时不启用 CORS
    pub cors_origins: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化（JSON）日志格式
    pub structured: bool,
    /// 日志文件目录，为空时只输出到标准输出
    pub log_dir: Option<PathBuf>,
}

/// 业务策略配置
///
/// 历史版本中这些阈值和比较方式多次变化，因此全部作为配置项注入。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// 菜单最少菜品数
    pub min_menu_items: usize,
    /// 菜品描述最少字符数
    pub min_description_chars: usize,
    /// 菜品最少食材数
    pub min_ingredients: usize,
    /// 是否拒绝没有任何食材的菜品
    pub reject_empty_ingredients: bool,
    /// 过期日期比较方式
    pub expiry_comparison: ExpiryComparison,
    /// 过期菜单处理方式
    pub expired_menus: ExpiredMenus,
    /// 有效菜单排序方式
    pub active_order: ActiveOrder,
    /// 计算"今天"所用的时区偏移（分钟）
    pub utc_offset_minutes: i32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_menu_items: DEFAULT_MIN_MENU_ITEMS,
            min_description_chars: DEFAULT_MIN_DESCRIPTION_CHARS,
            min_ingredients: DEFAULT_MIN_INGREDIENTS,
            reject_empty_ingredients: false,
            expiry_comparison: ExpiryComparison::default(),
            expired_menus: ExpiredMenus::default(),
            active_order: ActiveOrder::default(),
            utc_offset_minutes: 0,
        }
    }
}

impl PolicyConfig {
    /// 时区偏移，超出范围时退回 UTC
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 业务策略配置
    pub policy: PolicyConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                db_type: DatabaseType::Memory,
                url: "mem://".into(),
                namespace: "carte".into(),
                database: "menus".into(),
                username: String::new(),
                password: String::new(),
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                cors_origins: vec!["http://localhost:3000".into()],
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            policy: PolicyConfig::default(),
            app_name: "carte".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.database.db_type = DatabaseType::SurrealDB;
        config.database.url = "ws://localhost:8000".into();
        config.database.username = "root".into();
        config.database.password = "root".into();
        config.server.cors_origins = Vec::new();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config
    }
}
