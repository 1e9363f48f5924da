//! 注入注册表
//!
//! 以类型标识为键保存实例，每个类型最多只有一个绑定：
//! - 后写入的绑定覆盖先前的绑定
//! - 查找不到不是错误，返回 `None`
//! - 迭代只产生实例，按插入顺序

mod instance;
pub mod shared;

pub use instance::{Instance, TypeKey};
pub use shared::SharedRegistry;

use crate::config::{RegistryConfig, MAX_INITIAL_CAPACITY};
use crate::infrastructure::container::Container;
use crate::key::{Key, Keyed};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 注册表契约 - 面向容器的存取接口
///
/// 普通调用方应使用 [`bind`]，`put`/`get`/`instances` 供容器解析依赖时使用。
pub trait InjectionRegistry: Keyed {
    /// 只读视图，反映当前的绑定状态
    fn instances(&self) -> Instances<'_>;

    /// 按类型查找实例
    ///
    /// `target` 表示发起解析的容器，仅用于诊断；注册表是扁平的，
    /// 它不会改变查找的映射。
    fn get<T: ?Sized + 'static>(&self, target: Option<&Container>) -> Option<Arc<T>>;

    /// 插入或替换 `T` 的绑定
    fn put<T: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<T>);
}

/// 以值的静态类型作为键绑定到注册表
///
/// 等价于 `registry.put::<T>(Arc::new(value))`。
pub fn bind<T, R>(registry: &mut R, value: T)
where
    T: Send + Sync + 'static,
    R: InjectionRegistry,
{
    registry.put::<T>(Arc::new(value));
}

/// 默认的注册表实现
pub struct Registry {
    key: Key,
    bindings: IndexMap<TypeKey, Instance>,
    warn_on_rebind: bool,
}

impl Registry {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            bindings: IndexMap::new(),
            warn_on_rebind: false,
        }
    }

    pub fn with_capacity(key: Key, capacity: usize) -> Self {
        Self {
            key,
            bindings: IndexMap::with_capacity(capacity),
            warn_on_rebind: false,
        }
    }

    /// 容量超过 [`MAX_INITIAL_CAPACITY`] 时按上限预分配
    pub fn from_config(config: &RegistryConfig) -> Self {
        let capacity = config.initial_capacity.min(MAX_INITIAL_CAPACITY);
        Self {
            warn_on_rebind: config.warn_on_rebind,
            ..Self::with_capacity(config.key.clone(), capacity)
        }
    }

    pub fn bind<T: Send + Sync + 'static>(&mut self, value: T) {
        bind(self, value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeKey::of::<T>())
    }

    /// 移除 `T` 的绑定，其余绑定保持原有顺序
    pub fn remove<T: ?Sized + 'static>(&mut self) -> Option<Instance> {
        let removed = self.bindings.shift_remove(&TypeKey::of::<T>());
        if removed.is_some() {
            debug!(registry = %self.key, type_name = std::any::type_name::<T>(), "removed binding");
        }
        removed
    }

    /// 每次调用都从当前状态重新开始
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.bindings.values(),
        }
    }
}

impl InjectionRegistry for Registry {
    fn instances(&self) -> Instances<'_> {
        Instances {
            bindings: &self.bindings,
        }
    }

    fn get<T: ?Sized + 'static>(&self, target: Option<&Container>) -> Option<Arc<T>> {
        let type_key = TypeKey::of::<T>();
        let found = self
            .bindings
            .get(&type_key)
            .and_then(|instance| instance.downcast::<T>());

        trace!(
            registry = %self.key,
            container = ?target.map(|container| container.key()),
            type_name = type_key.name(),
            hit = found.is_some(),
            "registry lookup"
        );
        found
    }

    fn put<T: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        let instance = Instance::new(instance);
        let type_key = instance.type_key();
        // IndexMap::insert 对已有的键保留原位置
        let replaced = self.bindings.insert(type_key, instance).is_some();

        if replaced && self.warn_on_rebind {
            warn!(registry = %self.key, type_name = type_key.name(), "replacing existing binding");
        } else {
            debug!(registry = %self.key, type_name = type_key.name(), replaced, "bound instance");
        }
    }
}

impl Keyed for Registry {
    fn key(&self) -> &Key {
        &self.key
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Key::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("key", &self.key)
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Instance;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 已绑定实例的迭代器
pub struct Iter<'a> {
    inner: indexmap::map::Values<'a, TypeKey, Instance>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Instance;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// 注册表内容的只读视图
///
/// 借用的是实时状态而不是副本；视图存活期间注册表无法被修改。
#[derive(Debug, Clone, Copy)]
pub struct Instances<'a> {
    bindings: &'a IndexMap<TypeKey, Instance>,
}

impl<'a> Instances<'a> {
    pub fn get(&self, key: &TypeKey) -> Option<&'a Instance> {
        self.bindings.get(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a TypeKey> + 'a {
        self.bindings.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a TypeKey, &'a Instance)> + 'a {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    #[derive(Debug, PartialEq)]
    struct TestService {
        id: usize,
    }

    /// 收集 fmt 订阅者输出的缓冲区
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 在局部订阅者下重复绑定同一类型，返回日志输出
    fn rebind_logs(warn_on_rebind: bool) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let config = RegistryConfig {
            warn_on_rebind,
            ..RegistryConfig::default()
        };

        tracing::subscriber::with_default(subscriber, || {
            let mut registry = Registry::from_config(&config);
            registry.bind(TestService { id: 1 });
            registry.bind(TestService { id: 2 });
        });
        logs.contents()
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::default();

        assert!(registry.is_empty());
        assert!(registry.get::<TestService>(None).is_none());
        assert_eq!(registry.iter().count(), 0);
        assert!(registry.instances().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = Registry::default();

        registry.put(Arc::new(TestService { id: 1 }));
        registry.put(Arc::new(TestService { id: 2 }));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get::<TestService>(None).unwrap().id, 2);
    }

    #[test]
    fn test_rebind_keeps_position() {
        let mut registry = Registry::default();

        registry.bind(String::from("x"));
        registry.bind(42_i32);
        registry.bind(String::from("y"));

        let names: Vec<_> = registry.iter().map(Instance::type_name).collect();
        assert_eq!(names, vec![std::any::type_name::<String>(), "i32"]);
        assert_eq!(registry.get::<String>(None).as_deref().map(String::as_str), Some("y"));
    }

    #[test]
    fn test_remove_binding() {
        let mut registry = Registry::default();
        registry.bind(1_u8);
        registry.bind(2_u16);
        registry.bind(3_u32);

        let removed = registry.remove::<u16>().unwrap();
        assert_eq!(removed.downcast::<u16>().as_deref(), Some(&2));
        assert!(!registry.contains::<u16>());
        assert!(registry.remove::<u16>().is_none());

        let order: Vec<_> = registry.iter().map(Instance::type_name).collect();
        assert_eq!(order, vec!["u8", "u32"]);
    }

    #[test]
    fn test_from_config() {
        let config = RegistryConfig {
            key: Key::new("nebula:configured").unwrap(),
            initial_capacity: 4,
            warn_on_rebind: true,
        };
        let mut registry = Registry::from_config(&config);
        registry.bind(TestService { id: 7 });
        registry.bind(TestService { id: 8 });

        assert_eq!(registry.key().as_str(), "nebula:configured");
        assert_eq!(registry.get::<TestService>(None).unwrap().id, 8);
    }

    #[test]
    fn test_rebind_warns_when_configured() {
        let logs = rebind_logs(true);

        assert!(logs.contains("WARN"), "logs: {}", logs);
        assert!(logs.contains("replacing existing binding"), "logs: {}", logs);
    }

    #[test]
    fn test_rebind_logs_debug_by_default() {
        let logs = rebind_logs(false);

        assert!(!logs.contains("WARN"), "logs: {}", logs);
        assert!(!logs.contains("replacing existing binding"), "logs: {}", logs);
        assert!(logs.contains("replaced=true"), "logs: {}", logs);
    }

    #[test]
    fn test_with_capacity() {
        let mut registry = Registry::with_capacity(Key::new("nebula:sized").unwrap(), 8);
        registry.bind(TestService { id: 1 });

        assert_eq!(registry.key().as_str(), "nebula:sized");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_config_clamps_capacity() {
        // 直接构造的配置绕过了校验
        let config = RegistryConfig {
            initial_capacity: usize::MAX,
            ..RegistryConfig::default()
        };

        let mut registry = Registry::from_config(&config);
        registry.bind(TestService { id: 3 });

        assert_eq!(registry.get::<TestService>(None).unwrap().id, 3);
    }
}
