//! 提供者注册表与依赖图

use crate::provider::{Provider, Value};
use infrastructure_common::{BoxError, DependencyError, DependencyResult, TypeKey};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// 提供者描述符
///
/// 由注册表构建器解析得到，之后不再变化。
#[derive(Clone)]
pub struct ProviderDescriptor {
    /// 显示名称
    pub name: String,
    /// 产出类型
    pub produces: TypeKey,
    /// 依赖类型（按声明顺序）
    pub depends_on: Vec<TypeKey>,
    /// 是否声明了错误输出
    pub fallible: bool,
    provider: Arc<dyn Provider>,
}

impl ProviderDescriptor {
    /// 创建新的提供者描述符
    pub fn new(
        name: impl Into<String>,
        produces: TypeKey,
        depends_on: Vec<TypeKey>,
        fallible: bool,
        provider: Arc<dyn Provider>,
    ) -> Self {
        Self {
            name: name.into(),
            produces,
            depends_on,
            fallible,
            provider,
        }
    }

    /// 以已解析的依赖调用提供者
    pub fn invoke(&self, args: &[Value]) -> Result<Value, BoxError> {
        self.provider.call(args)
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("produces", &self.produces)
            .field("depends_on", &self.depends_on)
            .field("fallible", &self.fallible)
            .field("provider", &"<function>")
            .finish()
    }
}

/// 提供者注册表
///
/// 以产出类型为键，同时记录注册顺序，使遍历与诊断输出保持确定。
/// 通过依赖图校验后会被标记，任何插入都会清除该标记。
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: HashMap<TypeKey, ProviderDescriptor>,
    order: Vec<TypeKey>,
    validated: bool,
}

impl Registry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入描述符
    ///
    /// 产出类型已被占用时返回已有的描述符，注册表保持不变。
    pub fn try_insert(
        &mut self,
        descriptor: ProviderDescriptor,
    ) -> Result<(), &ProviderDescriptor> {
        let key = descriptor.produces;
        match self.descriptors.entry(key) {
            Entry::Occupied(existing) => {
                let existing: &ProviderDescriptor = existing.into_mut();
                Err(existing)
            }
            Entry::Vacant(slot) => {
                slot.insert(descriptor);
                self.order.push(key);
                self.validated = false;
                Ok(())
            }
        }
    }

    /// 获取产出指定类型的描述符
    pub fn get(&self, key: &TypeKey) -> Option<&ProviderDescriptor> {
        self.descriptors.get(key)
    }

    /// 是否有提供者产出指定类型
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.descriptors.contains_key(key)
    }

    /// 提供者数量
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按注册顺序遍历描述符
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> + '_ {
        self.order.iter().filter_map(|key| self.descriptors.get(key))
    }

    /// 是否已通过完整性与循环依赖校验
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// 标记为已通过校验
    pub fn mark_validated(&mut self) {
        self.validated = true;
    }
}

/// 依赖图节点
#[derive(Debug, Clone)]
pub struct DependencyGraphNode {
    /// 产出类型
    pub type_key: TypeKey,
    /// 提供者名称
    pub name: String,
    /// 依赖类型列表
    pub dependencies: Vec<TypeKey>,
}

/// 循环依赖检测器
pub trait CircularDependencyDetector: Send + Sync {
    /// 检测循环依赖
    fn detect_circular_dependencies(&self, graph: &[DependencyGraphNode]) -> DependencyResult<()>;

    /// 构建依赖图
    fn build_dependency_graph(&self, registry: &Registry) -> Vec<DependencyGraphNode>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Visited,
}

/// 默认循环依赖检测器
///
/// 深度优先遍历，`Visiting` 标记当前递归栈上的节点。遇到指向栈上节点的边即为环，
/// 报告从该节点开始、回到该节点的完整路径。
#[derive(Debug, Default)]
pub struct DefaultCircularDependencyDetector;

impl CircularDependencyDetector for DefaultCircularDependencyDetector {
    fn detect_circular_dependencies(&self, graph: &[DependencyGraphNode]) -> DependencyResult<()> {
        let index: HashMap<TypeKey, usize> = graph
            .iter()
            .enumerate()
            .map(|(i, node)| (node.type_key, i))
            .collect();
        let mut marks = vec![Mark::Unvisited; graph.len()];
        let mut stack = Vec::new();

        for start in 0..graph.len() {
            if marks[start] == Mark::Unvisited {
                Self::dfs_check(start, graph, &index, &mut marks, &mut stack)?;
            }
        }

        Ok(())
    }

    fn build_dependency_graph(&self, registry: &Registry) -> Vec<DependencyGraphNode> {
        registry
            .iter()
            .map(|descriptor| DependencyGraphNode {
                type_key: descriptor.produces,
                name: descriptor.name.clone(),
                dependencies: descriptor.depends_on.clone(),
            })
            .collect()
    }
}

impl DefaultCircularDependencyDetector {
    fn dfs_check(
        current: usize,
        graph: &[DependencyGraphNode],
        index: &HashMap<TypeKey, usize>,
        marks: &mut [Mark],
        stack: &mut Vec<usize>,
    ) -> DependencyResult<()> {
        marks[current] = Mark::Visiting;
        stack.push(current);

        for dep in &graph[current].dependencies {
            // 缺失的依赖由完整性检查负责
            let Some(&next) = index.get(dep) else {
                continue;
            };

            match marks[next] {
                Mark::Visiting => {
                    let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..]
                        .iter()
                        .map(|&n| graph[n].name.clone())
                        .collect();
                    cycle.push(graph[next].name.clone());
                    return Err(DependencyError::CircularDependency { cycle });
                }
                Mark::Visited => {}
                Mark::Unvisited => Self::dfs_check(next, graph, index, marks, stack)?,
            }
        }

        stack.pop();
        marks[current] = Mark::Visited;
        Ok(())
    }
}
