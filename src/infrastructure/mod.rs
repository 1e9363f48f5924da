//! 基础设施层
//!
//! 提供依赖注入的存储实现，包括：
//! - 按类型绑定实例的注册表
//! - 拥有注册表的容器

pub mod container;
pub mod registry;

// 重新导出API
pub use container::Container;
pub use registry::{bind, InjectionRegistry, Instance, Instances, Registry, SharedRegistry, TypeKey};
