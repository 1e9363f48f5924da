//! 容器 - 注册表的唯一所有者
//!
//! 容器在构造时创建一个空注册表，解析时把自身作为查找上下文传入。
//! 依赖图解析、生命周期作用域不属于这一层。

use crate::config::RegistryConfig;
use crate::errors::{ContainerError, Result};
use crate::infrastructure::registry::{InjectionRegistry, Registry};
use crate::key::{Key, Keyed};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct Container {
    registry: Registry,
}

impl Container {
    pub fn new(key: Key) -> Self {
        Self::with_registry(Registry::new(key))
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_registry(Registry::from_config(config))
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// 绑定一个值，键由值的静态类型推断
    pub fn bind<T: Send + Sync + 'static>(&mut self, value: T) {
        self.registry.bind(value);
    }

    /// 绑定已有的共享句柄，可用于 `dyn Trait` 键
    pub fn bind_arc<T: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        self.registry.put::<T>(instance);
    }

    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.registry.get::<T>(Some(self))
    }

    /// 解析已绑定的实例，未绑定时返回 [`ContainerError::NoBinding`]
    pub fn resolve<T: ?Sized + 'static>(&self) -> Result<Arc<T>> {
        self.get::<T>().ok_or_else(|| {
            debug!(container = %self.key(), type_name = type_name::<T>(), "no binding found");
            ContainerError::NoBinding {
                type_name: type_name::<T>(),
                container: self.key().clone(),
            }
        })
    }

    pub fn is_bound<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains::<T>()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}

impl Keyed for Container {
    fn key(&self) -> &Key {
        self.registry.key()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Key::default())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("key", self.key())
            .field("bindings", &self.registry.len())
            .finish()
    }
}
