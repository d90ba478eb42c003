//! Unit tests for providers

use graft_domain::error::Error;
use graft_domain::value_objects::{Dependencies, Instance, Provider, TypeDescriptor, TypeKey};

#[derive(Default)]
struct Settings {
    url: String,
}

#[derive(Debug, PartialEq)]
struct ConnectionString(String);

fn settings_instance(url: &str) -> Instance {
    let url = url.to_string();
    TypeDescriptor::builder::<Settings>()
        .construct_with(move |_| Ok(Settings { url: url.clone() }))
        .construct(&Dependencies::new(TypeKey::of::<Settings>(), Vec::new()))
        .expect("settings constructor should succeed")
}

#[test]
fn test_provider_derives_value_from_owner() {
    let provider = Provider::new::<Settings, ConnectionString, _>(|settings| {
        Ok(ConnectionString(format!("{}/db", settings.url)))
    });

    let provided = provider
        .invoke(&settings_instance("pg://host"))
        .expect("provider should succeed");

    assert_eq!(provided.key(), &TypeKey::of::<ConnectionString>());
    assert_eq!(
        *provided.downcast::<ConnectionString>().expect("connection string"),
        ConnectionString("pg://host/db".to_string())
    );
}

#[test]
fn test_provider_failure_is_construction_failure_of_provided_type() {
    let provider =
        Provider::new::<Settings, ConnectionString, _>(|_| Err("no url configured".into()));

    let err = provider
        .invoke(&settings_instance(""))
        .expect_err("provider should fail");

    assert!(matches!(
        err,
        Error::ConstructionFailure { ref type_key, .. } if type_key == &TypeKey::of::<ConnectionString>()
    ));
}

#[test]
fn test_panicking_provider_is_construction_failure_of_provided_type() {
    let provider = Provider::new::<Settings, ConnectionString, _>(|settings| {
        assert!(!settings.url.is_empty(), "settings carry no url");
        Ok(ConnectionString(settings.url.clone()))
    });

    let err = provider
        .invoke(&settings_instance(""))
        .expect_err("panic is caught");

    assert!(matches!(
        err,
        Error::ConstructionFailure { ref type_key, .. } if type_key == &TypeKey::of::<ConnectionString>()
    ));
    assert!(err.to_string().contains("settings carry no url"));
}

#[test]
fn test_provider_rejects_wrong_owner() {
    let provider = Provider::new::<Settings, ConnectionString, _>(|settings| {
        Ok(ConnectionString(settings.url.clone()))
    });

    assert!(provider.invoke(&Instance::from_value(5_u8)).is_err());
    assert_eq!(provider.owner(), &TypeKey::of::<Settings>());
}
