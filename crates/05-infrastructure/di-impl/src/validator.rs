//! 依赖图校验器

use di_abstractions::{CircularDependencyDetector, DefaultCircularDependencyDetector, Registry};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::{debug, warn};

/// 依赖图校验器
///
/// 在任何解析之前对整个注册表执行完整性检查与循环依赖检查。
pub struct GraphValidator {
    detector: Box<dyn CircularDependencyDetector>,
}

impl GraphValidator {
    /// 使用默认的循环依赖检测器创建校验器
    pub fn new() -> Self {
        Self::with_detector(Box::new(DefaultCircularDependencyDetector))
    }

    /// 使用自定义的循环依赖检测器创建校验器
    pub fn with_detector(detector: Box<dyn CircularDependencyDetector>) -> Self {
        Self { detector }
    }

    /// 校验注册表，通过后标记为已校验
    pub fn validate(&self, registry: &mut Registry) -> DependencyResult<()> {
        debug!("校验依赖完整性: {} 个提供者", registry.len());
        let result = Self::check_completeness(registry).and_then(|()| {
            debug!("检测循环依赖");
            let graph = self.detector.build_dependency_graph(registry);
            self.detector.detect_circular_dependencies(&graph)
        });

        match &result {
            Ok(()) => registry.mark_validated(),
            Err(e) => warn!("依赖图校验失败: {}", e),
        }
        result
    }

    fn check_completeness(registry: &Registry) -> DependencyResult<()> {
        for descriptor in registry.iter() {
            if let Some(missing) = descriptor
                .depends_on
                .iter()
                .find(|dep| !registry.contains(dep))
            {
                return Err(DependencyError::MissingDependency {
                    dependency: *missing,
                    required_by: descriptor.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for GraphValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphValidator")
            .field("detector", &"<detector>")
            .finish()
    }
}
