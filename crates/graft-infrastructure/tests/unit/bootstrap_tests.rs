//! Unit tests for container bootstrap

use graft_domain::error::Error;
use graft_domain::ports::InstanceRepository;
use graft_domain::value_objects::{Condition, Instance, TypeDescriptor, TypeKey};
use graft_infrastructure::config::{GraftConfig, PropertiesConfig};
use graft_infrastructure::di::ContainerBuilder;
use graft_providers::{InMemoryInstanceRepository, MapPropertySource, StaticTypeCatalog};
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

trait OrderStore: Send + Sync {
    fn backend(&self) -> &'static str;
}

#[derive(Default)]
struct MemoryOrderStore;

impl OrderStore for MemoryOrderStore {
    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[derive(Default)]
struct PostgresOrderStore;

impl OrderStore for PostgresOrderStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }
}

struct OrderService {
    store: Arc<dyn OrderStore>,
}

struct Tenant(&'static str);

fn memory_store() -> TypeDescriptor {
    TypeDescriptor::builder::<MemoryOrderStore>()
        .marker("Repository")
        .implements::<dyn OrderStore>(|store| store)
        .construct_default()
}

fn postgres_store() -> TypeDescriptor {
    TypeDescriptor::builder::<PostgresOrderStore>()
        .marker("Repository")
        .implements::<dyn OrderStore>(|store| store)
        .construct_with(|_| {
            thread::sleep(Duration::from_millis(50));
            Ok(PostgresOrderStore)
        })
}

fn order_service() -> TypeDescriptor {
    TypeDescriptor::builder::<OrderService>()
        .marker("Service")
        .depends_on::<dyn OrderStore>()
        .construct_with(|deps| {
            Ok(OrderService {
                store: deps.cast::<dyn OrderStore>(0)?,
            })
        })
}

fn catalog(descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Arc<StaticTypeCatalog> {
    Arc::new(descriptors.into_iter().collect())
}

#[tokio::test]
async fn test_build_waits_for_the_pass_by_default() {
    let container = ContainerBuilder::new(GraftConfig::default())
        .with_catalog(catalog([memory_store(), order_service()]))
        .build()
        .await
        .expect("container should build");

    assert!(container.is_ready());
    assert_eq!(container.report().map(|report| report.roots), Some(2));
    let service = container.get::<OrderService>().expect("service registered");
    let store = container
        .get_as::<dyn OrderStore>()
        .expect("store bound to its abstraction");
    assert_eq!(service.store.backend(), "memory");
    assert_eq!(store.backend(), "memory");
    assert_eq!(container.query_by_marker("Service").len(), 1);
}

#[tokio::test]
async fn test_background_pass_completes_on_wait_ready() {
    let config = GraftConfig {
        wait_until_completion: false,
        ..GraftConfig::default()
    };
    let container = ContainerBuilder::new(config)
        .with_catalog(catalog([postgres_store(), order_service()]))
        .build()
        .await
        .expect("container should build");

    let report = container.wait_ready().await.expect("pass should succeed");

    assert!(container.is_ready());
    assert_eq!(report.constructed, 2);
    assert_eq!(container.wait_ready().await.expect("still ready"), report);
    let service = container.get::<OrderService>().expect("service registered");
    assert_eq!(service.store.backend(), "postgres");
}

#[tokio::test]
async fn test_failed_pass_is_reported_by_build() {
    let result = ContainerBuilder::new(GraftConfig::default())
        .with_catalog(catalog([order_service()]))
        .build()
        .await;

    assert!(matches!(
        result,
        Err(Error::UnresolvedDependency { ref missing, .. }) if missing == &TypeKey::of::<dyn OrderStore>()
    ));
}

#[tokio::test]
async fn test_failed_background_pass_is_reported_once() {
    let config = GraftConfig {
        wait_until_completion: false,
        ..GraftConfig::default()
    };
    let container = ContainerBuilder::new(config)
        .with_catalog(catalog([memory_store(), postgres_store(), order_service()]))
        .build()
        .await
        .expect("background build returns at once");

    let first = container.wait_ready().await;
    let second = container.wait_ready().await;

    assert!(matches!(first, Err(Error::AmbiguousBinding { .. })));
    assert!(matches!(second, Err(Error::Cancelled)));
    assert!(!container.is_ready());
}

#[tokio::test]
async fn test_configured_binding_selects_implementation() {
    let mut config = GraftConfig::default();
    config.bindings.insert(
        TypeKey::of::<dyn OrderStore>().to_string(),
        TypeKey::of::<PostgresOrderStore>().to_string(),
    );

    let container = ContainerBuilder::new(config)
        .with_catalog(catalog([memory_store(), postgres_store(), order_service()]))
        .build()
        .await
        .expect("container should build");

    let service = container.get::<OrderService>().expect("service registered");
    assert_eq!(service.store.backend(), "postgres");
    assert_eq!(container.query_by_abstraction::<dyn OrderStore>().len(), 2);
    assert_eq!(
        container
            .query_by_marker_and_abstraction::<dyn OrderStore>("Repository")
            .len(),
        2
    );
}

#[tokio::test]
async fn test_programmatic_binding_overrides_configuration() {
    let mut config = GraftConfig::default();
    config.bindings.insert(
        TypeKey::of::<dyn OrderStore>().to_string(),
        TypeKey::of::<PostgresOrderStore>().to_string(),
    );

    let container = ContainerBuilder::new(config)
        .with_catalog(catalog([memory_store(), postgres_store(), order_service()]))
        .bind::<dyn OrderStore, MemoryOrderStore>()
        .build()
        .await
        .expect("container should build");

    let store = container.get_as::<dyn OrderStore>().expect("store bound");
    assert_eq!(store.backend(), "memory");
}

#[tokio::test]
async fn test_property_files_drive_conditions() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[orders]\nstore = \"postgres\"").expect("write properties");
    let config = GraftConfig {
        properties: PropertiesConfig {
            files: vec![file.path().to_path_buf()],
            env_prefix: None,
        },
        ..GraftConfig::default()
    };
    let conditional_memory = TypeDescriptor::builder::<MemoryOrderStore>()
        .marker("Repository")
        .implements::<dyn OrderStore>(|store| store)
        .condition(Condition::property_equals("orders.store", "memory"))
        .construct_default();
    let conditional_postgres = TypeDescriptor::builder::<PostgresOrderStore>()
        .marker("Repository")
        .implements::<dyn OrderStore>(|store| store)
        .condition(Condition::property_equals("orders.store", "postgres"))
        .construct_default();

    let container = ContainerBuilder::new(config)
        .with_catalog(catalog([conditional_memory, conditional_postgres, order_service()]))
        .build()
        .await
        .expect("container should build");

    assert!(container.get::<MemoryOrderStore>().is_none());
    let service = container.get::<OrderService>().expect("service registered");
    assert_eq!(service.store.backend(), "postgres");
}

#[tokio::test]
async fn test_explicit_property_source_and_repository() {
    let repository = Arc::new(InMemoryInstanceRepository::new());
    repository.put(&TypeKey::of::<Tenant>(), Instance::from_value(Tenant("acme")));
    let tenant_scoped = TypeDescriptor::builder::<MemoryOrderStore>()
        .marker("Repository")
        .implements::<dyn OrderStore>(|store| store)
        .depends_on::<Tenant>()
        .condition(Condition::property_equals("orders.enabled", "true"))
        .construct_with(|deps| {
            assert_eq!(deps.get::<Tenant>(0)?.0, "acme");
            Ok(MemoryOrderStore)
        });

    let container = ContainerBuilder::new(GraftConfig::default())
        .with_catalog(catalog([tenant_scoped]))
        .with_repository(repository.clone())
        .with_properties(Arc::new(MapPropertySource::new().with("orders.enabled", "true")))
        .build()
        .await
        .expect("container should build");

    assert!(container.get::<MemoryOrderStore>().is_some());
    assert!(repository.contains(&TypeKey::of::<MemoryOrderStore>()));
    assert!(container.instance(&TypeKey::of::<Tenant>()).is_some());
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected_before_the_pass() {
    let config = GraftConfig {
        workers: Some(0),
        ..GraftConfig::default()
    };

    let result = ContainerBuilder::new(config)
        .with_catalog(catalog([memory_store()]))
        .build()
        .await;

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_build_blocking_runs_on_calling_thread() {
    let container = ContainerBuilder::new(GraftConfig::default())
        .with_catalog(catalog([memory_store(), order_service()]))
        .build_blocking()
        .expect("container should build");

    assert!(container.is_ready());
    let service = container
        .resolve::<OrderService>()
        .expect("service resolves");
    assert_eq!(service.store.backend(), "memory");
    assert_eq!(container.engine().constructed(), 2);
}
