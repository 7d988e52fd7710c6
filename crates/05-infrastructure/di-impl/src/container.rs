//! 容器门面
//!
//! 把构建、校验、解析与注入串成一个入口。

use crate::builder::RegistryBuilder;
use crate::injector::Injector;
use crate::resolver::Resolver;
use crate::validator::GraphValidator;
use di_abstractions::{
    fallible, provider, DependencyResolver, Destination, FallibleProviderFn, Provider,
    ProviderFn, Registry, Value,
};
use infrastructure_common::{ContainerConfig, DependencyResult, TypeKey};
use std::sync::Arc;
use tracing::info;

/// 依赖注入容器
///
/// 持有校验通过的注册表和一个解析会话。
#[derive(Debug)]
pub struct DiContainer {
    config: ContainerConfig,
    resolver: Resolver,
}

impl DiContainer {
    /// 构建、校验并创建解析会话
    pub fn new(providers: Vec<Box<dyn Provider>>) -> DependencyResult<Self> {
        Self::with_config(providers, ContainerConfig::default())
    }

    /// 使用配置构建容器
    pub fn with_config(
        providers: Vec<Box<dyn Provider>>,
        config: ContainerConfig,
    ) -> DependencyResult<Self> {
        let mut registry = RegistryBuilder::build(providers)?;
        GraphValidator::new().validate(&mut registry)?;

        info!("构建容器完成，注册了 {} 个提供者", registry.len());
        let resolver = Resolver::with_config(Arc::new(registry), &config);
        Ok(Self { config, resolver })
    }

    /// 注册表
    pub fn registry(&self) -> &Registry {
        self.resolver.registry()
    }

    /// 配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 当前解析会话
    pub fn resolver(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    /// 基于同一注册表创建一个独立的解析会话
    pub fn new_resolver(&self) -> Resolver {
        Resolver::with_config(Arc::clone(self.resolver.registry()), &self.config)
    }

    /// 解析指定类型键
    pub fn resolve_key(&mut self, key: &TypeKey) -> DependencyResult<Value> {
        self.resolver.resolve_key(key)
    }

    /// 解析指定类型
    pub fn resolve<T: Clone + 'static>(&mut self) -> DependencyResult<T> {
        self.resolver.resolve::<T>()
    }

    /// 解析指定类型的共享实例
    pub fn resolve_shared<T: Send + Sync + 'static>(&mut self) -> DependencyResult<Arc<T>> {
        self.resolver.resolve_shared::<T>()
    }

    /// 注入目标
    pub fn inject<D: Destination + ?Sized>(&mut self, destination: &mut D) -> DependencyResult<()> {
        Injector::inject(&mut self.resolver, destination)
    }

    /// 创建并注入目标
    pub fn build_into<D: Destination + Default>(&mut self) -> DependencyResult<D> {
        let mut destination = D::default();
        self.inject(&mut destination)?;
        Ok(destination)
    }
}

/// 容器构建器
#[derive(Debug, Default)]
pub struct DiContainerBuilder {
    providers: Vec<Box<dyn Provider>>,
    config: ContainerConfig,
}

impl DiContainerBuilder {
    /// 创建空的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加不会失败的提供者函数
    pub fn provide<F, Args>(mut self, func: F) -> Self
    where
        F: ProviderFn<Args>,
        Args: 'static,
    {
        self.providers.push(Box::new(provider(func)));
        self
    }

    /// 添加带名称的提供者函数
    pub fn provide_named<F, Args>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: ProviderFn<Args>,
        Args: 'static,
    {
        self.providers.push(Box::new(provider(func).named(name)));
        self
    }

    /// 添加可能失败的提供者函数
    pub fn try_provide<F, Args>(mut self, func: F) -> Self
    where
        F: FallibleProviderFn<Args>,
        Args: 'static,
    {
        self.providers.push(Box::new(fallible(func)));
        self
    }

    /// 添加任意提供者
    pub fn provide_dyn(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// 设置配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 构建容器
    pub fn build(self) -> DependencyResult<DiContainer> {
        DiContainer::with_config(self.providers, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::{assign_cloned, DestinationShape, DynProvider, FieldSlot};
    use infrastructure_common::DependencyError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Port(u16);

    #[derive(Debug, Default)]
    struct App {
        port: Port,
        banner: String,
    }

    impl Destination for App {
        fn shape(&self) -> DestinationShape {
            DestinationShape::new()
                .field::<Port>("port")
                .field::<String>("banner")
        }

        fn assign(&mut self, field: &FieldSlot, value: Value) -> DependencyResult<()> {
            match field.name.as_str() {
                "port" => assign_cloned(&mut self.port, field, &value),
                "banner" => assign_cloned(&mut self.banner, field, &value),
                _ => Err(DependencyError::UnknownField {
                    field: field.name.clone(),
                }),
            }
        }
    }

    fn port() -> Port {
        Port(8080)
    }

    fn banner(port: Port) -> String {
        format!("listening on {}", port.0)
    }

    #[test]
    fn test_builder_and_build_into() {
        let mut container = DiContainerBuilder::new()
            .provide(port)
            .provide(banner)
            .build()
            .unwrap();

        let app: App = container.build_into().unwrap();
        assert_eq!(app.port, Port(8080));
        assert_eq!(app.banner, "listening on 8080");
        assert_eq!(container.registry().len(), 2);
    }

    #[test]
    fn test_build_rejects_missing_dependency() {
        let err = DiContainerBuilder::new().provide(banner).build().unwrap_err();
        assert!(matches!(err, DependencyError::MissingDependency { .. }));
    }

    #[test]
    fn test_build_rejects_non_callable() {
        let err = DiContainerBuilder::new()
            .provide_dyn(DynProvider::new().named("stub"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DependencyError::NotCallable { index: 0, .. }));
    }

    #[test]
    fn test_new_resolver_has_fresh_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut container = DiContainerBuilder::new()
            .provide_named("count", move || counter.fetch_add(1, Ordering::SeqCst))
            .build()
            .unwrap();

        assert_eq!(container.resolve::<usize>().unwrap(), 0);
        assert_eq!(container.resolve::<usize>().unwrap(), 0);
        assert_eq!(container.new_resolver().resolve::<usize>().unwrap(), 1);
    }

    #[test]
    fn test_validated_container_ignores_depth_limit() {
        let config = ContainerConfig::default().with_max_resolution_depth(1);
        let mut container = DiContainerBuilder::new()
            .provide(port)
            .provide(banner)
            .with_config(config)
            .build()
            .unwrap();

        assert_eq!(container.config().max_resolution_depth, 1);
        assert!(container.registry().is_validated());
        assert_eq!(container.resolve::<String>().unwrap(), "listening on 8080");
        assert_eq!(
            container.new_resolver().resolve::<String>().unwrap(),
            "listening on 8080"
        );
    }
}
