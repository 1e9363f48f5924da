//! 线程安全的注册表包装
//!
//! [`Registry`] 本身需要 `&mut` 才能修改；跨线程共享时由读写锁
//! 串行化所有 `put`/`get`/迭代操作。

use super::{bind, InjectionRegistry, Instance, Registry};
use crate::infrastructure::container::Container;
use crate::key::{Key, Keyed};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn put<T: ?Sized + Send + Sync + 'static>(&self, instance: Arc<T>) {
        self.inner.write().put(instance);
    }

    pub fn bind<T: Send + Sync + 'static>(&self, value: T) {
        bind(&mut *self.inner.write(), value);
    }

    pub fn get<T: ?Sized + 'static>(&self, target: Option<&Container>) -> Option<Arc<T>> {
        self.inner.read().get::<T>(target)
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.inner.read().contains::<T>()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn key(&self) -> Key {
        self.inner.read().key().clone()
    }

    /// 复制当前的全部实例句柄，之后的修改不会反映到结果中
    pub fn snapshot(&self) -> Vec<Instance> {
        self.inner.read().iter().cloned().collect()
    }

    /// 持有读锁期间其它线程无法写入
    ///
    /// 持有守卫时不要再调用 `SharedRegistry` 的其它方法：读锁不可重入，
    /// 有写者排队时再次加读锁会死锁。
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read()
    }

    /// 持有守卫时同样不能调用其它方法，否则当前线程会自锁
    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
