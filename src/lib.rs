pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod key;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::RegistryConfig;
pub use errors::{ConfigError, ContainerError, InvalidKeyError, LoggingError};
pub use infrastructure::{
    bind, Container, InjectionRegistry, Instance, Instances, Registry, SharedRegistry, TypeKey,
};
pub use key::{Key, Keyed};
