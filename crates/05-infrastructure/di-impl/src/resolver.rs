//! 依赖解析器实现

use di_abstractions::{DependencyResolver, Registry, ResolveContext, Value};
use infrastructure_common::{ContainerConfig, DependencyError, DependencyResult, TypeKey};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 解析器
///
/// 一次解析会话：按需递归解析依赖，调用提供者并缓存结果。
/// 同一个解析器内每个提供者最多成功调用一次；失败不会被缓存。
///
/// 深度限制只作用于未经校验的注册表；校验通过的依赖图无环，链长不受限制。
#[derive(Debug)]
pub struct Resolver {
    registry: Arc<Registry>,
    resolved: HashMap<TypeKey, Value>,
    max_depth: usize,
}

impl Resolver {
    /// 创建新的解析器
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, &ContainerConfig::default())
    }

    /// 使用配置创建解析器
    pub fn with_config(registry: Arc<Registry>, config: &ContainerConfig) -> Self {
        Self {
            registry,
            resolved: HashMap::new(),
            max_depth: config.max_resolution_depth,
        }
    }

    /// 注册表
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// 指定类型是否已缓存
    pub fn is_resolved(&self, key: &TypeKey) -> bool {
        self.resolved.contains_key(key)
    }

    /// 已缓存的值数量
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    fn resolve_in(&mut self, key: &TypeKey, ctx: &mut ResolveContext) -> DependencyResult<Value> {
        if let Some(value) = self.resolved.get(key) {
            trace!(type_key = %key, "命中解析缓存");
            return Ok(Arc::clone(value));
        }

        let registry = Arc::clone(&self.registry);
        let descriptor = registry
            .get(key)
            .ok_or(DependencyError::NoProvider { type_key: *key })?;

        ctx.push_type(*key, &descriptor.name)?;

        let mut args = Vec::with_capacity(descriptor.depends_on.len());
        for dependency in &descriptor.depends_on {
            match self.resolve_in(dependency, ctx) {
                Ok(value) => args.push(value),
                Err(source) => {
                    ctx.pop_type();
                    return Err(DependencyError::DependencyFailed {
                        provider: descriptor.name.clone(),
                        dependency: *dependency,
                        source: Box::new(source),
                    });
                }
            }
        }
        ctx.pop_type();

        debug!(provider = %descriptor.name, produces = %key, "调用提供者");
        let value = descriptor.invoke(&args).map_err(|source| {
            warn!(provider = %descriptor.name, error = %source, "提供者调用失败");
            DependencyError::ProviderFailed {
                provider: descriptor.name.clone(),
                source,
            }
        })?;

        if (*value).type_id() != key.id() {
            return Err(DependencyError::TypeMismatch {
                provider: descriptor.name.clone(),
                expected: *key,
            });
        }

        self.resolved.insert(*key, Arc::clone(&value));
        Ok(value)
    }
}

impl DependencyResolver for Resolver {
    fn resolve_key(&mut self, key: &TypeKey) -> DependencyResult<Value> {
        let mut ctx = if self.registry.is_validated() {
            ResolveContext::unbounded()
        } else {
            ResolveContext::new(self.max_depth)
        };
        self.resolve_in(key, &mut ctx)
    }

    fn can_resolve(&self, key: &TypeKey) -> bool {
        self.resolved.contains_key(key) || self.registry.contains(key)
    }
}
