pub mod registry_config;

// Re-export commonly used types
pub use registry_config::{RegistryConfig, CONFIG_FILE_NAME, DEFAULT_INITIAL_CAPACITY, MAX_INITIAL_CAPACITY};
