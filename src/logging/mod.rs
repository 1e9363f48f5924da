use crate::errors::LoggingError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未指定过滤指令且没有 `RUST_LOG` 时使用
pub const DEFAULT_DIRECTIVE: &str = "nebula_registry=info";

/// 日志格式配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人类可读格式
    Pretty,
    /// 紧凑格式
    Compact,
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 过滤指令；为 `None` 时读取 `RUST_LOG`，再退回 [`DEFAULT_DIRECTIVE`]
    pub directive: Option<String>,
    pub format: LogFormat,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: None,
            format: LogFormat::Compact,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// 输出注册表的每一次绑定与查找（查找事件为 trace 级别）
    pub fn verbose() -> Self {
        Self {
            directive: Some("nebula_registry=trace".to_string()),
            format: LogFormat::Pretty,
            ansi: true,
        }
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        let filter = match &self.directive {
            Some(directive) => EnvFilter::try_new(directive)?,
            None => match EnvFilter::try_from_default_env() {
                Ok(filter) => filter,
                Err(_) => EnvFilter::try_new(DEFAULT_DIRECTIVE)?,
            },
        };
        Ok(filter)
    }
}

/// 初始化日志系统
///
/// 全局订阅者只能安装一次，重复调用返回 [`LoggingError::Init`]。
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.filter()?;

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer().pretty().with_ansi(config.ansi);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer().compact().with_ansi(config.ansi);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    tracing::info!(
        directive = ?config.directive,
        format = ?config.format,
        "Logging system initialized"
    );

    Ok(())
}
