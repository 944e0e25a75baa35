//! 可观测性模块
//!
//! 提供结构化日志初始化：控制台输出（JSON 或人类可读），以及可选的按天滚动日志文件。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{AppError, Result};

/// 构建日志过滤器
///
/// `RUST_LOG` 优先，否则使用配置中的级别。
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// 初始化全局 tracing 订阅者
///
/// 返回的 guard 必须保持存活，否则文件日志会在后台线程退出时丢失。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = if config.structured {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(false).boxed()
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("tracing already initialized: {}", e)))?;

    Ok(guard)
}
