use crate::config::config::{AppConfig, EngineConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
const ENV_PREFIX: &str = "MOODLOG_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序：
    /// 1. 内置默认值
    /// 2. ./moodlog.toml
    /// 3. 环境变量（MOODLOG_ENGINE__MOOD_REVERT_MS=1500）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    /// 仅加载引擎配置
    pub fn load_engine_config() -> Result<EngineConfig, figment::Error> {
        Self::figment(&default_config_path()).extract_inner("engine")
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        let engine = &config.engine;

        if engine.memory_trigger_threshold == 0 {
            return Err(ConfigValidationError::InvalidThreshold(
                "memory_trigger_threshold".into(),
            ));
        }

        let durations = [
            ("memory_display_ms", engine.memory_display_ms),
            ("attention_idle_ms", engine.attention_idle_ms),
            ("mood_revert_ms", engine.mood_revert_ms),
            ("ambient_period_ms", engine.ambient_period_ms),
            ("ambient_display_ms", engine.ambient_display_ms),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigValidationError::InvalidDuration(name.to_string()));
        }

        if engine.ambient_log_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity(
                "ambient_log_capacity".into(),
            ));
        }
        if engine.recent_words_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity(
                "recent_words_capacity".into(),
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("阈值无效，必须大于 0: {0}")]
    InvalidThreshold(String),

    #[error("时长无效，必须大于 0: {0}")]
    InvalidDuration(String),

    #[error("容量无效，必须大于 0: {0}")]
    InvalidCapacity(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("moodlog.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().expect("defaults load");
            assert_eq!(config.app_name, "moodlog");
            assert_eq!(config.engine.mood_revert_ms, 3_000);
            Ok(())
        });
    }

    #[test]
    fn test_toml_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "moodlog.toml",
                r#"
                    environment = "staging"

                    [engine]
                    ambient_period_ms = 9000
                    auto_revert_mood = false
                "#,
            )?;
            jail.set_env("MOODLOG_ENGINE__MOOD_REVERT_MS", "1200");

            let config = ConfigLoader::load().expect("merged load");
            assert_eq!(config.environment, "staging");
            assert_eq!(config.engine.ambient_period_ms, 9_000);
            assert!(!config.engine.auto_revert_mood);
            assert_eq!(config.engine.mood_revert_ms, 1_200);
            assert_eq!(config.engine.attention_idle_ms, 5_000);

            let engine = ConfigLoader::load_engine_config().expect("engine load");
            assert_eq!(engine.ambient_period_ms, 9_000);
            Ok(())
        });
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.engine.mood_revert_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidDuration(name)) if name == "mood_revert_ms"
        ));

        let mut config = AppConfig::development();
        config.engine.memory_trigger_threshold = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidThreshold(_))
        ));

        let mut config = AppConfig::development();
        config.engine.ambient_log_capacity = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidCapacity(_))
        ));
    }
}
