use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 分析引擎配置
///
/// 所有时长以毫秒为单位。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 触发情绪分析的最小草稿长度（字符数，严格大于）
    pub min_analysis_length: usize,
    /// 无关键词命中时，判定为 reflective 的词数阈值（严格大于）
    pub fallback_word_threshold: usize,
    /// 参与词频统计的最小词长（严格大于）
    pub memory_min_word_length: usize,
    /// 记忆触发阈值（出现次数）
    pub memory_trigger_threshold: u32,
    /// 记忆提示展示时长
    pub memory_display_ms: u64,
    /// 思考状态空闲超时
    pub attention_idle_ms: u64,
    /// 情绪颜色自动回退延迟
    pub mood_revert_ms: u64,
    /// 是否启用情绪自动回退
    pub auto_revert_mood: bool,
    /// 启动环境评论的最小草稿长度
    pub ambient_min_length: usize,
    /// 环境评论周期
    pub ambient_period_ms: u64,
    /// 环境评论展示时长
    pub ambient_display_ms: u64,
    /// 环境评论滚动日志容量
    pub ambient_log_capacity: usize,
    /// 最近词窗口容量
    pub recent_words_capacity: usize,
    /// 环境评论随机数种子（None 表示使用系统熵）
    pub ambient_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_analysis_length: 10,
            fallback_word_threshold: 50,
            memory_min_word_length: 4,
            memory_trigger_threshold: 3,
            memory_display_ms: 5_000,
            attention_idle_ms: 5_000,
            mood_revert_ms: 3_000,
            auto_revert_mood: true,
            ambient_min_length: 20,
            ambient_period_ms: 7_000,
            ambient_display_ms: 4_000,
            ambient_log_capacity: 5,
            recent_words_capacity: 10,
            ambient_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn memory_display(&self) -> Duration {
        Duration::from_millis(self.memory_display_ms)
    }

    pub fn attention_idle(&self) -> Duration {
        Duration::from_millis(self.attention_idle_ms)
    }

    pub fn mood_revert(&self) -> Duration {
        Duration::from_millis(self.mood_revert_ms)
    }

    pub fn ambient_period(&self) -> Duration {
        Duration::from_millis(self.ambient_period_ms)
    }

    pub fn ambient_display(&self) -> Duration {
        Duration::from_millis(self.ambient_display_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录（按天滚动）
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
            file_prefix: "moodlog.log".into(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 分析引擎配置
    pub engine: EngineConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            engine: EngineConfig::default(),
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
                file_prefix: "moodlog.log".into(),
            },
            app_name: "moodlog".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config
    }
}
