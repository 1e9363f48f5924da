//! 注册表标识
//!
//! 每个注册表携带一个 [`Key`]，用于在同级注册表之间区分彼此。

use crate::errors::InvalidKeyError;
use serde::Deserialize;
use std::fmt;

/// 默认注册表键
pub const DEFAULT_KEY: &str = "nebula:default";

/// 注册表键 - 非空且不含空白字符的字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Key(String);

impl Key {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidKeyError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(InvalidKeyError(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `namespace:value` 形式的命名空间部分
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(namespace, _)| namespace)
    }
}

impl Default for Key {
    fn default() -> Self {
        Self(DEFAULT_KEY.to_string())
    }
}

impl TryFrom<String> for Key {
    type Error = InvalidKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 具有标识的对象
pub trait Keyed {
    fn key(&self) -> &Key;

    /// 两个对象是否共享同一个键
    fn same_key<K: Keyed + ?Sized>(&self, other: &K) -> bool {
        self.key() == other.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(Key::new("nebula:core").is_ok());
        assert_eq!(Key::new(""), Err(InvalidKeyError(String::new())));
        assert!(Key::new("has space").is_err());
    }

    #[test]
    fn test_namespace() {
        let key = Key::new("nebula:core").unwrap();
        assert_eq!(key.namespace(), Some("nebula"));
        assert_eq!(Key::new("plain").unwrap().namespace(), None);
    }

    #[test]
    fn test_default_key() {
        assert_eq!(Key::default().as_str(), DEFAULT_KEY);
        assert_eq!(Key::default().to_string(), "nebula:default");
    }
}
