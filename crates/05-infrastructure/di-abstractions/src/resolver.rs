//! 依赖解析器抽象接口
//!
//! 提供依赖解析和值实例化的能力

use crate::provider::Value;
use infrastructure_common::{DependencyError, DependencyResult, TypeKey};
use std::sync::Arc;

/// 依赖解析器 trait
///
/// 负责解析依赖并产出值
pub trait DependencyResolver {
    /// 解析指定类型键
    fn resolve_key(&mut self, key: &TypeKey) -> DependencyResult<Value>;

    /// 检查是否存在指定类型的提供者
    fn can_resolve(&self, key: &TypeKey) -> bool;

    /// 解析指定类型，返回值的克隆
    fn resolve<T>(&mut self) -> DependencyResult<T>
    where
        T: Clone + 'static,
        Self: Sized,
    {
        let key = TypeKey::of::<T>();
        let value = self.resolve_key(&key)?;
        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or(DependencyError::TypeMismatch {
                provider: key.to_string(),
                expected: key,
            })
    }

    /// 解析指定类型，返回缓存中的共享实例
    fn resolve_shared<T>(&mut self) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
        Self: Sized,
    {
        let key = TypeKey::of::<T>();
        let value = self.resolve_key(&key)?;
        value
            .downcast::<T>()
            .map_err(|_| DependencyError::TypeMismatch {
                provider: key.to_string(),
                expected: key,
            })
    }
}

/// 解析上下文
///
/// 记录当前解析链，用于深度限制以及在未经校验的注册表上检测循环依赖。
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<(TypeKey, String)>,
    /// 最大解析深度
    max_depth: usize,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolution_chain: Vec::new(),
            max_depth,
        }
    }

    /// 不限制深度的解析上下文，仍会检测重入
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// 添加类型到解析链
    pub fn push_type(&mut self, key: TypeKey, provider: &str) -> DependencyResult<()> {
        if let Some(start) = self.resolution_chain.iter().position(|(k, _)| *k == key) {
            let mut cycle: Vec<String> = self.resolution_chain[start..]
                .iter()
                .map(|(_, name)| name.clone())
                .collect();
            cycle.push(provider.to_string());
            return Err(DependencyError::CircularDependency { cycle });
        }
        if self.resolution_chain.len() >= self.max_depth {
            return Err(DependencyError::MaxDepthExceeded {
                type_key: key,
                depth: self.max_depth,
            });
        }
        self.resolution_chain.push((key, provider.to_string()));
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(100)
    }
}
