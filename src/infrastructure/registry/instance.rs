//! 类型标识与类型擦除的实例句柄

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 类型标识 - 注册表的键
///
/// 相等性与哈希只依赖 `TypeId`，类型名称仅用于诊断信息。
/// `T` 可以是 `dyn Trait`，从而以接口作为绑定键。
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 已绑定的实例
///
/// 内部保存调用方提供的 `Arc<T>`，注册表只持有一个引用计数。
#[derive(Clone)]
pub struct Instance {
    key: TypeKey,
    handle: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub(crate) fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            handle: Arc::new(value),
        }
    }

    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    pub fn type_name(&self) -> &'static str {
        self.key.name()
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.key == TypeKey::of::<T>()
    }

    /// 以绑定时的类型取回实例
    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.handle.downcast_ref::<Arc<T>>().cloned()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.key.name())
            .finish()
    }
}
