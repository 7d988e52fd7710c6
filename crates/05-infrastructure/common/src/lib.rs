//! # Infrastructure Common
//!
//! 这个 crate 提供了 Wirekit 依赖注入引擎各层共用的基础类型。
//!
//! ## 核心类型
//!
//! - [`TypeKey`] - 语义类型标识，依赖匹配的基本单位
//! - [`DependencyError`] - 注册、校验、解析、注入各阶段的错误分类
//! - [`ContainerConfig`] - 容器配置
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的类型标识
//! - 错误链完整保留，便于程序化检查
//! - 约定优于配置

pub mod configuration;
pub mod errors;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use metadata::*;
