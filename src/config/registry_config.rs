use crate::errors::ConfigError;
use crate::key::Key;
use serde::Deserialize;
use std::{fs, path::Path};

// Configuration file name
pub const CONFIG_FILE_NAME: &str = "nebula.toml";

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Upper bound for preallocated binding slots
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Registry configuration, read from the `[registry]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub key: Key,
    pub initial_capacity: usize,
    /// Log replaced bindings at warn level instead of debug
    pub warn_on_rebind: bool,
}

/// Configuration file layout for loading from disk
#[derive(Deserialize, Debug, Default)]
struct PartialConfigFile {
    registry: Option<RegistryConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            key: Key::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            warn_on_rebind: false,
        }
    }
}

impl RegistryConfig {
    /// Create a default configuration with the given registry key
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        Self {
            key: Key::new(key)?,
            ..Self::default()
        }
        .validated()
    }

    /// Set the preallocated capacity, rejecting values above [`MAX_INITIAL_CAPACITY`]
    pub fn with_initial_capacity(self, initial_capacity: usize) -> Result<Self, ConfigError> {
        Self {
            initial_capacity,
            ..self
        }
        .validated()
    }

    /// Parse configuration from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Load `nebula.toml` from the given directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    fn parse(content: &str, source: &str) -> Result<Self, ConfigError> {
        let partial: PartialConfigFile = toml::from_str(content)
            .map_err(|e| ConfigError::TomlParse(source.to_string(), e))?;
        partial.registry.unwrap_or_default().validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidCapacity(self.initial_capacity));
        }
        Ok(self)
    }
}
