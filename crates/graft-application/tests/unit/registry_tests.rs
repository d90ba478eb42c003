//! Unit tests for the linked injectable registry

use graft_application::{
    INJECTABLES, InjectableEntry, LinkedTypeCatalog, ResolutionEngine, list_injectables,
};
use graft_domain::ports::TypeCatalog;
use graft_domain::value_objects::{TypeDescriptor, TypeKey};
use graft_providers::{InMemoryBindingRegistry, InMemoryInstanceRepository};
use linkme::distributed_slice;
use std::sync::Arc;

trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

#[derive(Default)]
struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }
}

struct SignupHandler {
    notifier: Arc<dyn Notifier>,
}

#[distributed_slice(INJECTABLES)]
static EMAIL_NOTIFIER: InjectableEntry = InjectableEntry {
    name: "email_notifier",
    describe: || {
        TypeDescriptor::builder::<EmailNotifier>()
            .marker("Component")
            .implements::<dyn Notifier>(|notifier| notifier)
            .construct_default()
    },
};

#[distributed_slice(INJECTABLES)]
static SIGNUP_HANDLER: InjectableEntry = InjectableEntry {
    name: "signup_handler",
    describe: || {
        TypeDescriptor::builder::<SignupHandler>()
            .marker("CommandHandler")
            .depends_on::<dyn Notifier>()
            .construct_with(|deps| {
                Ok(SignupHandler {
                    notifier: deps.cast::<dyn Notifier>(0)?,
                })
            })
    },
};

#[test]
fn test_linked_entries_are_listed() {
    let names = list_injectables();

    assert!(names.contains(&"email_notifier"));
    assert!(names.contains(&"signup_handler"));
}

#[test]
fn test_linked_catalog_discovers_entries() {
    let catalog = LinkedTypeCatalog::discover();

    assert!(catalog.declares(&TypeKey::of::<EmailNotifier>()));
    assert!(catalog.declares(&TypeKey::of::<SignupHandler>()));
    assert_eq!(catalog.candidate_types().len(), catalog.len());
}

#[test]
fn test_duplicate_entries_are_skipped() {
    let describe = || TypeDescriptor::builder::<EmailNotifier>().construct_default();
    let entries = [
        InjectableEntry {
            name: "first",
            describe,
        },
        InjectableEntry {
            name: "second",
            describe,
        },
    ];

    let catalog = LinkedTypeCatalog::from_entries(&entries);

    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_linked_catalog_resolves_end_to_end() {
    let engine = ResolutionEngine::builder()
        .catalog(Arc::new(LinkedTypeCatalog::discover()))
        .bindings(Arc::new(InMemoryBindingRegistry::new()))
        .repository(Arc::new(InMemoryInstanceRepository::new()))
        .build()
        .expect("engine should build");

    engine.run().expect("pass should succeed");

    let handler = engine
        .resolve_as::<SignupHandler>()
        .expect("handler registered");
    assert_eq!(handler.notifier.channel(), "email");
}
