//! 容器配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 环境变量前缀，`DI_MAX_RESOLUTION_DEPTH` 覆盖 `max_resolution_depth`
pub const ENV_PREFIX: &str = "DI";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 默认日志级别（`RUST_LOG` 未设置时生效）
    pub log_level: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: 100,
            log_level: "info".to_string(),
        }
    }
}

impl ContainerConfig {
    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置
    ///
    /// 依次叠加默认值、可选的 TOML 文件以及 `DI_` 前缀的环境变量。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载容器配置文件: {}", path.display());
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth must be greater than zero".to_string(),
            });
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "log_level must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }
}
