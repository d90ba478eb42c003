//! Unit tests for the static type catalog

use graft_domain::ports::TypeCatalog;
use graft_domain::value_objects::{Marker, TypeDescriptor, TypeKey};
use graft_providers::StaticTypeCatalog;

#[derive(Default)]
struct Mailer;

#[derive(Default)]
struct Clock;

#[test]
fn test_duplicate_registration_is_ignored() {
    let mut catalog = StaticTypeCatalog::new();

    assert!(catalog.register(TypeDescriptor::builder::<Mailer>().construct_default()));
    assert!(!catalog.register(
        TypeDescriptor::builder::<Mailer>()
            .marker("Service")
            .construct_default()
    ));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_marker_filter_and_declares() {
    let catalog: StaticTypeCatalog = [
        TypeDescriptor::builder::<Mailer>()
            .marker("Service")
            .construct_default(),
        TypeDescriptor::builder::<Clock>().construct_default(),
    ]
    .into_iter()
    .collect();

    let services = catalog.types_declaring_marker(&Marker::new("Service"));

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].key(), &TypeKey::of::<Mailer>());
    assert!(catalog.declares(&TypeKey::of::<Clock>()));
    assert!(!catalog.declares(&TypeKey::named("Unknown")));
}
