//! 注入器

use di_abstractions::{DependencyResolver, Destination};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::debug;

/// 注入器
///
/// 按形态顺序逐个解析字段类型并写入目标。某个字段失败时立即返回，
/// 之前已写入的字段保持不变。
#[derive(Debug, Default)]
pub struct Injector;

impl Injector {
    /// 注入目标的所有字段
    pub fn inject<R, D>(resolver: &mut R, destination: &mut D) -> DependencyResult<()>
    where
        R: DependencyResolver + ?Sized,
        D: Destination + ?Sized,
    {
        let shape = destination.shape();

        for field in &shape {
            debug!(field = %field.name, type_key = %field.type_key, "注入字段");
            let value = resolver
                .resolve_key(&field.type_key)
                .map_err(|source| DependencyError::field_failed(field.name.clone(), source))?;
            destination.assign(field, value)?;
        }

        Ok(())
    }
}
