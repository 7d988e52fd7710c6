//! 注册表构建器

use di_abstractions::{Provider, ProviderDescriptor, Registry};
use infrastructure_common::{DependencyError, DependencyResult};
use std::sync::Arc;
use tracing::{debug, info};

/// 注册表构建器
///
/// 按顺序解析提供者，拒绝形态不合法或产出类型重复的提供者。
#[derive(Debug, Default)]
pub struct RegistryBuilder;

impl RegistryBuilder {
    /// 构建注册表
    pub fn build(providers: Vec<Box<dyn Provider>>) -> DependencyResult<Registry> {
        let mut registry = Registry::new();

        for (index, provider) in providers.into_iter().enumerate() {
            let descriptor = Self::parse_provider(index, Arc::from(provider))?;
            debug!(
                provider = %descriptor.name,
                produces = %descriptor.produces,
                dependencies = descriptor.depends_on.len(),
                "注册提供者"
            );

            let name = descriptor.name.clone();
            let produces = descriptor.produces;
            if let Err(existing) = registry.try_insert(descriptor) {
                return Err(DependencyError::DuplicateProvider {
                    index,
                    name,
                    produces,
                    existing: existing.name.clone(),
                });
            }
        }

        info!("注册表构建完成，注册了 {} 个提供者", registry.len());
        Ok(registry)
    }

    /// 解析单个提供者
    pub fn parse_provider(
        index: usize,
        provider: Arc<dyn Provider>,
    ) -> DependencyResult<ProviderDescriptor> {
        let name = provider
            .name()
            .map_or_else(|| format!("provider#{index}"), str::to_owned);

        let Some(signature) = provider.signature() else {
            return Err(DependencyError::NotCallable { index, name });
        };

        let fallible = match signature.outputs.as_slice() {
            [] => return Err(DependencyError::NoOutput { index, name }),
            [_] => false,
            [_, second] if second.is_error() => true,
            [_, second] => {
                return Err(DependencyError::SecondOutputNotError {
                    index,
                    name,
                    found: *second,
                })
            }
            outputs => {
                return Err(DependencyError::TooManyOutputs {
                    index,
                    name,
                    count: outputs.len(),
                })
            }
        };

        Ok(ProviderDescriptor::new(
            name,
            signature.outputs[0],
            signature.inputs,
            fallible,
            provider,
        ))
    }
}
