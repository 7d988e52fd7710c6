//! 注入目标抽象接口
//!
//! 注入目标通过 [`DestinationShape`] 声明有序的具名字段及其类型，
//! 注入器逐个解析字段类型并调用 [`Destination::assign`] 写入。

use crate::provider::Value;
use infrastructure_common::{DependencyError, DependencyResult, TypeKey};
use std::any::Any;
use std::collections::HashMap;

/// 字段槽位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    /// 字段名称
    pub name: String,
    /// 字段类型
    pub type_key: TypeKey,
}

impl FieldSlot {
    /// 创建新的字段槽位
    pub fn new(name: impl Into<String>, type_key: TypeKey) -> Self {
        Self {
            name: name.into(),
            type_key,
        }
    }
}

/// 注入目标形态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationShape {
    fields: Vec<FieldSlot>,
}

impl DestinationShape {
    /// 创建空形态
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加字段
    ///
    /// 同名字段只保留一个槽位：后添加的类型覆盖先前的类型，位置保持不变。
    pub fn with_field(mut self, name: impl Into<String>, type_key: TypeKey) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|slot| slot.name == name) {
            Some(slot) => slot.type_key = type_key,
            None => self.fields.push(FieldSlot::new(name, type_key)),
        }
        self
    }

    /// 添加指定类型的字段
    pub fn field<T: 'static>(self, name: impl Into<String>) -> Self {
        self.with_field(name, TypeKey::of::<T>())
    }

    /// 按名称查找字段
    pub fn get(&self, name: &str) -> Option<&FieldSlot> {
        self.fields.iter().find(|slot| slot.name == name)
    }

    /// 按顺序遍历字段
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSlot> {
        self.fields.iter()
    }

    /// 字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a DestinationShape {
    type Item = &'a FieldSlot;
    type IntoIter = std::slice::Iter<'a, FieldSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// 注入目标 trait
///
/// 通常由 `#[derive(Injectable)]` 生成。
pub trait Destination {
    /// 需要注入的字段
    fn shape(&self) -> DestinationShape;

    /// 写入一个已解析的字段值
    fn assign(&mut self, field: &FieldSlot, value: Value) -> DependencyResult<()>;
}

/// 将值克隆写入类型化字段
pub fn assign_cloned<T: Clone + 'static>(
    slot: &mut T,
    field: &FieldSlot,
    value: &Value,
) -> DependencyResult<()> {
    match value.downcast_ref::<T>() {
        Some(inner) => {
            *slot = inner.clone();
            Ok(())
        }
        None => Err(DependencyError::FieldTypeMismatch {
            field: field.name.clone(),
            expected: field.type_key,
        }),
    }
}

/// 动态记录
///
/// 形态由调用方在运行时构造，字段值以 [`Value`] 保存。
#[derive(Debug, Clone, Default)]
pub struct DynamicRecord {
    shape: DestinationShape,
    values: HashMap<String, Value>,
}

impl DynamicRecord {
    /// 以给定形态创建空记录
    pub fn new(shape: DestinationShape) -> Self {
        Self {
            shape,
            values: HashMap::new(),
        }
    }

    /// 获取字段值
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// 获取类型化的字段值
    pub fn get_as<T: 'static>(&self, name: &str) -> Option<&T> {
        self.values.get(name).and_then(|value| value.downcast_ref::<T>())
    }

    /// 字段是否已写入
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// 已写入的字段数量
    pub fn assigned_count(&self) -> usize {
        self.values.len()
    }
}

impl Destination for DynamicRecord {
    fn shape(&self) -> DestinationShape {
        self.shape.clone()
    }

    fn assign(&mut self, field: &FieldSlot, value: Value) -> DependencyResult<()> {
        let slot = self
            .shape
            .get(&field.name)
            .ok_or_else(|| DependencyError::UnknownField {
                field: field.name.clone(),
            })?;
        if Any::type_id(&*value) != slot.type_key.id() {
            return Err(DependencyError::FieldTypeMismatch {
                field: field.name.clone(),
                expected: slot.type_key,
            });
        }
        self.values.insert(field.name.clone(), value);
        Ok(())
    }
}
