//! 跨 crate 的依赖注入集成测试
use di_abstractions::DependencyResolver;
use di_impl::must::{must_build, must_inject, must_resolve};
use di_impl::{DiContainer, DiContainerBuilder, RegistryBuilder, Resolver};
use di_macros::Injectable;
use infrastructure_common::{ContainerConfig, DependencyError};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct Config {
    host: String,
    port: u16,
}

#[derive(Debug, Clone, Default)]
struct Database {
    url: String,
}

#[derive(Debug, Clone, Default)]
struct Service {
    db: Database,
    active: bool,
}

fn new_config() -> Config {
    Config {
        host: "localhost".to_string(),
        port: 5432,
    }
}

fn new_database(config: Config) -> Database {
    Database {
        url: format!("postgresql://{}:{}", config.host, config.port),
    }
}

fn new_service(db: Database) -> Service {
    Service { db, active: true }
}

#[derive(Debug, Default, Injectable)]
struct App {
    service: Option<Arc<Service>>,
    #[inject(skip)]
    started: bool,
}

fn shared_service(db: Database) -> Option<Arc<Service>> {
    Some(Arc::new(new_service(db)))
}

fn container() -> DiContainer {
    DiContainerBuilder::new()
        .provide(new_config)
        .provide(new_database)
        .provide(shared_service)
        .build()
        .unwrap()
}

#[test]
fn test_derived_destination_end_to_end() -> anyhow::Result<()> {
    let mut container = container();
    let app: App = container.build_into()?;

    let service = app.service.expect("service injected");
    assert_eq!(service.db.url, "postgresql://localhost:5432");
    assert!(!app.started);
    Ok(())
}

#[derive(Debug, Default, Injectable)]
struct Wiring {
    cfg: Config,
    db: Database,
    svc: Service,
}

#[test]
fn test_every_field_of_derived_destination_is_filled() -> anyhow::Result<()> {
    let mut container = DiContainerBuilder::new()
        .provide(new_config)
        .provide(new_database)
        .provide(new_service)
        .build()?;

    let wiring: Wiring = container.build_into()?;
    assert_eq!(wiring.cfg.host, "localhost");
    assert_eq!(wiring.cfg.port, 5432);
    assert_eq!(wiring.db.url, "postgresql://localhost:5432");
    assert!(wiring.svc.active);
    assert_eq!(wiring.svc.db.url, wiring.db.url);
    Ok(())
}

#[test]
fn test_injected_fields_share_cached_instance() -> anyhow::Result<()> {
    let mut container = container();
    let first: App = container.build_into()?;
    let second: App = container.build_into()?;

    match (first.service, second.service) {
        (Some(a), Some(b)) => assert!(Arc::ptr_eq(&a, &b)),
        other => panic!("services not injected: {other:?}"),
    }
    Ok(())
}

#[derive(Debug, Default, Injectable)]
struct Partial {
    config: Option<Config>,
    service: Option<Service>,
}

fn optional_config(config: Config) -> Option<Config> {
    Some(config)
}

#[test]
fn test_partial_injection_with_derived_destination() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let mut container = DiContainerBuilder::new()
        .provide(new_config)
        .provide(optional_config)
        .try_provide(move |_: Config| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<Option<Service>, _>("service offline")
        })
        .build()
        .unwrap();

    let mut partial = Partial::default();
    let err = container.inject(&mut partial).unwrap_err();

    assert!(partial.config.is_some());
    assert!(partial.service.is_none());
    assert!(matches!(err, DependencyError::FieldFailed { ref field, .. } if field == "service"));
    assert_eq!(err.root_cause().to_string(), "service offline");

    assert!(container.inject(&mut partial).is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_must_wrappers() {
    let mut container = must_build(vec![
        Box::new(di_abstractions::provider(new_config)),
        Box::new(di_abstractions::provider(new_database)),
    ]);
    let db: Database = must_resolve(container.resolver());
    assert_eq!(db.url, "postgresql://localhost:5432");

    let mut record = di_abstractions::DynamicRecord::new(
        di_abstractions::DestinationShape::new().field::<Config>("config"),
    );
    must_inject(&mut container, &mut record);
    assert!(record.is_set("config"));
}

#[test]
#[should_panic(expected = "no provider found for type Service")]
fn test_must_inject_panics_on_missing_field_type() {
    #[derive(Default, Injectable)]
    struct NeedsService {
        service: Option<Service>,
    }

    let mut container = must_build(vec![Box::new(di_abstractions::provider(new_config))]);
    must_inject(&mut container, &mut NeedsService::default());
}

#[test]
fn test_config_file_depth_applies_to_unvalidated_registry() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "max_resolution_depth = 2")?;
    writeln!(file, "log_level = \"debug\"")?;

    let config = ContainerConfig::load(Some(file.path()))?;
    assert_eq!(config.log_level, "debug");

    let registry = RegistryBuilder::build(vec![
        Box::new(di_abstractions::provider(new_config)),
        Box::new(di_abstractions::provider(new_database)),
        Box::new(di_abstractions::provider(new_service)),
    ])?;
    let mut resolver = Resolver::with_config(Arc::new(registry), &config);
    let err = resolver.resolve::<Service>().unwrap_err();
    assert!(matches!(
        err.innermost(),
        DependencyError::MaxDepthExceeded { depth: 2, .. }
    ));
    assert!(resolver.resolve::<Database>().is_ok());

    let mut container = DiContainerBuilder::new()
        .provide(new_config)
        .provide(new_database)
        .provide(new_service)
        .with_config(config)
        .build()?;
    assert!(container.resolve::<Service>()?.active);
    Ok(())
}
