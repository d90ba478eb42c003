//! Unit tests for instances and abstraction views

use graft_domain::value_objects::{Instance, TypeDescriptor, TypeKey};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Default)]
struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

fn english_instance() -> Instance {
    TypeDescriptor::builder::<English>()
        .marker("Component")
        .implements::<dyn Greeter>(|english| english)
        .construct_default()
        .construct(&graft_domain::value_objects::Dependencies::new(
            TypeKey::of::<English>(),
            Vec::new(),
        ))
        .expect("default constructor should succeed")
}

#[test]
fn test_downcast_to_concrete_type() {
    let instance = english_instance();

    assert!(instance.downcast::<English>().is_some());
    assert!(instance.downcast::<String>().is_none());
}

#[test]
fn test_cast_to_declared_abstraction_shares_allocation() {
    let instance = english_instance();
    let greeter = instance
        .cast::<dyn Greeter>()
        .expect("English declares Greeter");
    let concrete = instance.downcast::<English>().expect("concrete view");

    assert_eq!(greeter.greet(), "hello");
    assert_eq!(
        std::sync::Arc::as_ptr(&greeter) as *const u8,
        std::sync::Arc::as_ptr(&concrete) as *const u8
    );
}

#[test]
fn test_cast_to_undeclared_abstraction_is_none() {
    let instance = Instance::from_value(English);

    assert!(instance.cast::<dyn Greeter>().is_none());
    assert_eq!(instance.abstractions().count(), 0);
}

#[test]
fn test_clones_are_the_same_object() {
    let instance = english_instance();
    let clone = instance.clone();
    let other = english_instance();

    assert!(instance.ptr_eq(&clone));
    assert!(!instance.ptr_eq(&other));
}

#[test]
fn test_instance_carries_markers_and_abstractions() {
    let instance = english_instance();

    assert!(instance.has_marker(&"Component".into()));
    assert!(instance.implements(&TypeKey::of::<dyn Greeter>()));
    assert_eq!(instance.key(), &TypeKey::of::<English>());
}
