//! Unit tests for the in-memory binding registry

use graft_domain::error::Error;
use graft_domain::ports::BindingRegistry;
use graft_domain::value_objects::{Provider, TypeKey};
use graft_providers::InMemoryBindingRegistry;

fn key(name: &'static str) -> TypeKey {
    TypeKey::named(name)
}

#[test]
fn test_single_implementation_resolves() {
    let registry = InMemoryBindingRegistry::new();
    registry.register_implementation(key("Store"), key("MemoryStore"));
    registry.register_implementation(key("Store"), key("MemoryStore"));

    let resolved = registry
        .resolve_abstraction(&key("Store"), &key("Service"))
        .expect("single implementation");

    assert_eq!(resolved, key("MemoryStore"));
    assert!(registry.is_abstraction(&key("Store")));
}

#[test]
fn test_explicit_binding_wins_over_implementations() {
    let registry = InMemoryBindingRegistry::new();
    registry.register_implementation(key("Store"), key("MemoryStore"));
    registry.register_implementation(key("Store"), key("RedisStore"));
    registry.bind(key("Store"), key("RedisStore"));

    let resolved = registry
        .resolve_abstraction(&key("Store"), &key("Service"))
        .expect("explicit binding");

    assert_eq!(resolved, key("RedisStore"));
    assert_eq!(
        registry.explicit_bindings(),
        vec![(key("Store"), key("RedisStore"))]
    );
}

#[test]
fn test_later_explicit_binding_replaces_earlier() {
    let registry = InMemoryBindingRegistry::new();
    registry.bind(key("Store"), key("MemoryStore"));
    registry.bind(key("Store"), key("RedisStore"));

    assert_eq!(registry.explicit_binding(&key("Store")), Some(key("RedisStore")));
}

#[test]
fn test_several_implementations_are_ambiguous() {
    let registry = InMemoryBindingRegistry::new();
    registry.register_implementation(key("Store"), key("RedisStore"));
    registry.register_implementation(key("Store"), key("MemoryStore"));

    let err = registry
        .resolve_abstraction(&key("Store"), &key("Service"))
        .expect_err("ambiguous");

    match err {
        Error::AmbiguousBinding {
            abstraction,
            candidates,
        } => {
            assert_eq!(abstraction, key("Store"));
            assert_eq!(candidates, vec![key("MemoryStore"), key("RedisStore")]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_abstraction_is_unresolved() {
    let registry = InMemoryBindingRegistry::new();

    let err = registry
        .resolve_abstraction(&key("Store"), &key("Service"))
        .expect_err("unresolved");

    assert_eq!(
        err.to_string(),
        "Unresolved dependency: Service requires Store, which is not registered, bound or provided"
    );
    assert!(!registry.is_abstraction(&key("Store")));
}

#[test]
fn test_providers_are_indexed_by_owner_and_output() {
    let registry = InMemoryBindingRegistry::new();
    let provider = Provider::new::<String, usize, _>(|text| Ok(text.len()));
    registry.register_provider(provider);

    assert_eq!(registry.providers_for(&TypeKey::of::<String>()).len(), 1);
    let found = registry
        .provider_of(&TypeKey::of::<usize>())
        .expect("provider registered");
    assert_eq!(found.owner(), &TypeKey::of::<String>());
    assert!(registry.provider_of(&TypeKey::of::<u64>()).is_none());
}

#[test]
fn test_first_provider_of_an_output_is_kept() {
    let registry = InMemoryBindingRegistry::new();
    registry.register_provider(Provider::new::<String, usize, _>(|text| Ok(text.len())));
    registry.register_provider(Provider::new::<Vec<u8>, usize, _>(|bytes| Ok(bytes.len())));

    let found = registry
        .provider_of(&TypeKey::of::<usize>())
        .expect("provider registered");
    assert_eq!(found.owner(), &TypeKey::of::<String>());
    assert_eq!(registry.providers_for(&TypeKey::of::<Vec<u8>>()).len(), 1);
}
