//! 元数据定义
//!
//! 提供类型标识信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 提供者可返回的错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 类型键
///
/// 唯一标识一个语义类型。相等性与哈希只取决于 [`TypeId`]，
/// 类型名称仅用于诊断输出。
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// 从类型获取类型键
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 提供者第二个输出所需的错误形态
    pub fn error() -> Self {
        Self::of::<BoxError>()
    }

    /// 是否为错误形态
    pub fn is_error(&self) -> bool {
        *self == Self::error()
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称（包含模块路径）
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（去掉所有模块路径）
    ///
    /// `alloc::sync::Arc<app::db::Database>` 显示为 `Arc<Database>`。
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
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
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// 去掉类型名称中每一段路径的模块前缀
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    let flush = |segment: &mut String, out: &mut String| {
        let tail = segment.rsplit("::").next().unwrap_or(segment.as_str());
        out.push_str(tail);
        segment.clear();
    };

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            flush(&mut segment, &mut out);
            out.push(ch);
        }
    }
    flush(&mut segment, &mut out);

    out
}
