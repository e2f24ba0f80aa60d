use crate::config::config::{AppConfig, DatabaseType};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 开发环境默认值
    /// 2. ./config.toml 或 ./config.yaml
    /// 3. CARTE_ 前缀的环境变量，如 CARTE_SERVER__PORT
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::figment(&default_config_path()).extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(&path).extract()
    }

    fn figment(path: &Path) -> Figment {
        let file = if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
            Figment::new().merge(Yaml::file(path))
        } else {
            Figment::new().merge(Toml::file(path))
        };

        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(file)
            .merge(Env::prefixed("CARTE_").split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.db_type == DatabaseType::SurrealDB && config.database.url.is_empty() {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        if config.policy.min_menu_items == 0 {
            return Err(ConfigValidationError::InvalidMinMenuItems);
        }

        let offset = config.policy.utc_offset_minutes;
        if offset.unsigned_abs() >= 24 * 60 {
            return Err(ConfigValidationError::InvalidUtcOffset(offset));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("菜单最少菜品数必须大于 0")]
    InvalidMinMenuItems,

    #[error("时区偏移无效: {0} 分钟")]
    InvalidUtcOffset(i32),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    let yaml = PathBuf::from("config.yaml");
    if yaml.exists() {
        yaml
    } else {
        PathBuf::from("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::visibility::ExpiredMenus;

    #[test]
    fn test_development_config_is_valid() {
        assert!(ConfigLoader::validate(&AppConfig::development()).is_ok());
        assert!(ConfigLoader::validate(&AppConfig::production()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_min_items() {
        let mut config = AppConfig::development();
        config.policy.min_menu_items = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidMinMenuItems)
        ));
    }

    #[test]
    fn test_validate_rejects_offset_out_of_range() {
        let mut config = AppConfig::development();
        config.policy.utc_offset_minutes = 24 * 60;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidUtcOffset(1440))
        ));
    }

    #[test]
    fn test_validate_requires_url_for_surrealdb() {
        let mut config = AppConfig::production();
        config.database.url.clear();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn test_load_from_toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "carte.toml",
                r#"
                [server]
                port = 9090

                [policy]
                min_menu_items = 4
                expired_menus = "separate"
                "#,
            )?;
            jail.set_env("CARTE_POLICY__MIN_INGREDIENTS", "3");

            let config = ConfigLoader::load_from(PathBuf::from("carte.toml"))?;
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.policy.min_menu_items, 4);
            assert_eq!(config.policy.min_ingredients, 3);
            assert_eq!(config.policy.expired_menus, ExpiredMenus::Separate);
            Ok(())
        });
    }
}
