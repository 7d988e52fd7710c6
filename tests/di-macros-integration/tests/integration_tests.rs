//! Injectable 派生宏集成测试

use di_abstractions::{value, DependencyError, Destination, TypeKey};
use di_macros::Injectable;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    pub url: String,
}

/// 测试目标
#[derive(Debug, Default, Injectable)]
pub struct Gateway {
    endpoint: Endpoint,
    retries: u32,
    #[inject(skip)]
    cache: HashMap<String, String>,
    r#type: String,
}

#[derive(Debug, Default, Injectable)]
pub struct Holder<T: Clone + Default + Send + Sync + 'static> {
    inner: T,
}

#[derive(Debug, Default, Injectable)]
pub struct Empty {}

#[test]
fn test_shape_follows_declaration_order() {
    let gateway = Gateway::default();
    let shape = gateway.shape();

    let fields: Vec<_> = shape
        .iter()
        .map(|slot| (slot.name.as_str(), slot.type_key))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("endpoint", TypeKey::of::<Endpoint>()),
            ("retries", TypeKey::of::<u32>()),
            ("type", TypeKey::of::<String>()),
        ]
    );
    assert!(shape.get("cache").is_none());
}

#[test]
fn test_assign_writes_field() {
    let mut gateway = Gateway::default();
    let shape = gateway.shape();
    let slot = shape.get("endpoint").unwrap();

    gateway
        .assign(
            slot,
            value(Endpoint {
                url: "https://api.local".to_string(),
            }),
        )
        .unwrap();
    assert_eq!(gateway.endpoint.url, "https://api.local");
    assert!(gateway.cache.is_empty());
}

#[test]
fn test_assign_rejects_wrong_value_type() {
    let mut gateway = Gateway::default();
    let shape = gateway.shape();
    let slot = shape.get("retries").unwrap();

    let err = gateway.assign(slot, value("three")).unwrap_err();
    assert!(matches!(err, DependencyError::FieldTypeMismatch { .. }));
    assert_eq!(gateway.retries, 0);
}

#[test]
fn test_assign_rejects_unknown_field() {
    let mut gateway = Gateway::default();
    let foreign = di_abstractions::FieldSlot::new("cache", TypeKey::of::<HashMap<String, String>>());

    let err = gateway.assign(&foreign, value(HashMap::<String, String>::new())).unwrap_err();
    assert_eq!(err.to_string(), "destination has no field named cache");
}

#[test]
fn test_generic_destination() {
    let holder = Holder::<u64>::default();
    let shape = holder.shape();
    assert_eq!(shape.get("inner").map(|slot| slot.type_key), Some(TypeKey::of::<u64>()));
    assert!(Empty::default().shape().is_empty());
}

#[test]
fn test_container_fills_derived_destination() {
    let mut container = di_impl::DiContainerBuilder::new()
        .provide(|| Endpoint {
            url: "https://api.local".to_string(),
        })
        .provide(|| 3_u32)
        .provide(|endpoint: Endpoint| format!("rest:{}", endpoint.url))
        .build()
        .unwrap();

    let gateway: Gateway = container.build_into().unwrap();
    assert_eq!(gateway.retries, 3);
    assert_eq!(gateway.r#type, "rest:https://api.local");
}
