//! 错误类型定义

use crate::metadata::{BoxError, TypeKey};
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 配置解析失败
    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },

    /// 配置验证失败
    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(source: config::ConfigError) -> Self {
        Self::ParseError {
            source: Box::new(source),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        Self::ParseError {
            source: Box::new(source),
        }
    }
}

/// 错误所属阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 提供者注册
    Registration,
    /// 依赖图校验
    Validation,
    /// 依赖解析
    Resolution,
    /// 字段注入
    Injection,
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    /// 提供者不可调用
    #[error("provider #{index} ({name}) is not a function")]
    NotCallable { index: usize, name: String },

    /// 提供者没有输出
    #[error("provider #{index} ({name}) has no output")]
    NoOutput { index: usize, name: String },

    /// 提供者输出超过两个
    #[error("provider #{index} ({name}) has {count} outputs; a provider must return a single value or a value and an error")]
    TooManyOutputs {
        index: usize,
        name: String,
        count: usize,
    },

    /// 第二个输出不是错误形态
    #[error("provider #{index} ({name}) has two outputs, but the second one is not an error (got {found})")]
    SecondOutputNotError {
        index: usize,
        name: String,
        found: TypeKey,
    },

    /// 产出类型与已注册的提供者重复
    #[error("provider #{index} ({name}) returns the same type {produces} as provider {existing}")]
    DuplicateProvider {
        index: usize,
        name: String,
        produces: TypeKey,
        existing: String,
    },

    /// 依赖类型没有提供者
    #[error("dependency {dependency} is not provided (required by {required_by})")]
    MissingDependency {
        dependency: TypeKey,
        required_by: String,
    },

    /// 检测到循环依赖，按顺序记录提供者名称
    #[error("cyclic dependency detected: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },

    /// 解析时找不到提供者
    #[error("no provider found for type {type_key}")]
    NoProvider { type_key: TypeKey },

    /// 提供者调用失败
    #[error("{provider} failed to resolve value: {source}")]
    ProviderFailed { provider: String, source: BoxError },

    /// 提供者的某个依赖解析失败
    #[error("{provider} failed to resolve value: {source}")]
    DependencyFailed {
        provider: String,
        dependency: TypeKey,
        source: Box<DependencyError>,
    },

    /// 超过最大解析深度
    #[error("resolution depth {depth} exceeded while resolving {type_key}")]
    MaxDepthExceeded { type_key: TypeKey, depth: usize },

    /// 提供者产出的值类型与声明不符
    #[error("provider {provider} produced a value that is not a {expected}")]
    TypeMismatch { provider: String, expected: TypeKey },

    /// 字段解析失败
    #[error("failed to resolve field {field}: {source}")]
    FieldFailed {
        field: String,
        source: Box<DependencyError>,
    },

    /// 字段值类型不匹配
    #[error("value for field {field} is not a {expected}")]
    FieldTypeMismatch { field: String, expected: TypeKey },

    /// 目标没有该字段
    #[error("destination has no field named {field}")]
    UnknownField { field: String },
}

impl DependencyError {
    /// 错误所属阶段
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotCallable { .. }
            | Self::NoOutput { .. }
            | Self::TooManyOutputs { .. }
            | Self::SecondOutputNotError { .. }
            | Self::DuplicateProvider { .. } => ErrorKind::Registration,
            Self::MissingDependency { .. } | Self::CircularDependency { .. } => {
                ErrorKind::Validation
            }
            Self::NoProvider { .. }
            | Self::ProviderFailed { .. }
            | Self::DependencyFailed { .. }
            | Self::MaxDepthExceeded { .. }
            | Self::TypeMismatch { .. } => ErrorKind::Resolution,
            Self::FieldFailed { .. }
            | Self::FieldTypeMismatch { .. }
            | Self::UnknownField { .. } => ErrorKind::Injection,
        }
    }

    /// 沿错误链找到最内层的原因
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// 沿嵌套的依赖错误找到最内层的 [`DependencyError`]
    pub fn innermost(&self) -> &Self {
        match self {
            Self::DependencyFailed { source, .. } | Self::FieldFailed { source, .. } => {
                source.innermost()
            }
            other => other,
        }
    }

    /// 包装字段注入失败
    pub fn field_failed(field: impl Into<String>, source: Self) -> Self {
        Self::FieldFailed {
            field: field.into(),
            source: Box::new(source),
        }
    }
}

/// 配置结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
/// 依赖注入结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
