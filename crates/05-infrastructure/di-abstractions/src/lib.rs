//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义提供者描述、依赖图与解析、注入的核心接口。
//!
//! ## 核心接口
//!
//! - [`Provider`] - 提供者能力接口（签名描述 + 调用）
//! - [`Registry`] - 以产出类型为键的提供者注册表
//! - [`CircularDependencyDetector`] - 循环依赖检测器
//! - [`DependencyResolver`] - 依赖解析器接口
//! - [`Destination`] - 注入目标接口

pub mod destination;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use destination::*;
pub use provider::*;
pub use registry::*;
pub use resolver::*;

pub use infrastructure_common::{
    BoxError, ContainerConfig, DependencyError, DependencyResult, ErrorKind, TypeKey,
};
