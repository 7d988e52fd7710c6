//! 失败即 panic 的便捷函数
//!
//! 适用于程序启动阶段：依赖缺失时没有继续运行的意义。

use crate::container::DiContainer;
use di_abstractions::{DependencyResolver, Destination, Provider};
use infrastructure_common::DependencyError;
use std::fmt::Write as _;

fn describe(err: &DependencyError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let _ = write!(message, "\n  caused by: {cause}");
        source = cause.source();
    }
    message
}

/// 构建容器，失败时 panic
pub fn must_build(providers: Vec<Box<dyn Provider>>) -> DiContainer {
    match DiContainer::new(providers) {
        Ok(container) => container,
        Err(err) => panic!("failed to build container: {}", describe(&err)),
    }
}

/// 解析指定类型，失败时 panic
pub fn must_resolve<T, R>(resolver: &mut R) -> T
where
    T: Clone + 'static,
    R: DependencyResolver,
{
    match resolver.resolve::<T>() {
        Ok(value) => value,
        Err(err) => panic!("failed to resolve value: {}", describe(&err)),
    }
}

/// 注入目标，失败时 panic
pub fn must_inject<D: Destination + ?Sized>(container: &mut DiContainer, destination: &mut D) {
    if let Err(err) = container.inject(destination) {
        panic!("failed to inject destination: {}", describe(&err));
    }
}
