use crate::key::Key;
use thiserror::Error;

/// 容器层错误
#[derive(Debug, Error)]
pub enum ContainerError {
    /// 注册表中没有该类型的绑定
    #[error("No binding found for {type_name} in container '{container}'")]
    NoBinding {
        type_name: &'static str,
        container: Key,
    },
}

/// 非法的注册表键
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid registry key '{0}': keys must be non-empty and contain no whitespace")]
pub struct InvalidKeyError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),
    #[error("Initial capacity {0} exceeds the maximum of {max}", max = crate::config::MAX_INITIAL_CAPACITY)]
    InvalidCapacity(usize),
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to install global subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
