//! Behavior of the in-memory primitive operation provider.

use serde_json::json;
use std::sync::Arc;
use trap0::test_utils::MemoryDelegate;
use trap0::*;

fn object() -> ObjectRef {
    Arc::new(Target::new())
}

// --- Assignment and reads ---

#[test]
fn set_then_get() {
    let delegate = MemoryDelegate::new();
    let target = object();

    assert!(
        delegate
            .set(&target, "x".into(), Value::data(json!(1)))
            .unwrap()
    );
    let value = delegate.get(&target, &"x".into(), None).unwrap();
    assert_eq!(value, Some(Value::data(json!(1))));
}

#[test]
fn get_missing_returns_none() {
    let delegate = MemoryDelegate::new();
    let target = object();

    assert_eq!(delegate.get(&target, &"missing".into(), None).unwrap(), None);
}

#[test]
fn overwrite_replaces_value() {
    let delegate = MemoryDelegate::new();
    let target = object();

    delegate
        .set(&target, "x".into(), Value::data(json!(1)))
        .unwrap();
    delegate
        .set(&target, "x".into(), Value::data(json!(2)))
        .unwrap();

    assert_eq!(
        delegate.get(&target, &"x".into(), None).unwrap(),
        Some(Value::data(json!(2)))
    );
}

#[test]
fn set_refuses_read_only_slots() {
    let delegate = MemoryDelegate::new();
    let target = object();
    target.define(
        "locked".into(),
        PropertyDescriptor::data(Value::data(json!("original"))).writable(false),
    );

    assert!(
        !delegate
            .set(&target, "locked".into(), Value::data(json!("changed")))
            .unwrap()
    );
    assert_eq!(
        target.value_of(&"locked".into()),
        Some(Value::data(json!("original")))
    );
}

#[test]
fn set_refuses_new_keys_on_non_extensible_targets() {
    let delegate = MemoryDelegate::new();
    let target = object();
    delegate
        .set(&target, "existing".into(), Value::data(json!(1)))
        .unwrap();
    delegate.prevent_extensions(&target).unwrap();

    assert!(
        !delegate
            .set(&target, "new".into(), Value::data(json!(2)))
            .unwrap()
    );
    assert_eq!(delegate.get(&target, &"new".into(), None).unwrap(), None);
    // Existing slots stay writable.
    assert!(
        delegate
            .set(&target, "existing".into(), Value::data(json!(3)))
            .unwrap()
    );
}

// --- Prototype chain ---

#[test]
fn get_walks_the_prototype_chain() {
    let delegate = MemoryDelegate::new();
    let proto = Arc::new(Target::with_properties([(
        PropKey::from("inherited"),
        Value::data(json!("from proto")),
    )]));
    let target = object();
    target.set_prototype(Some(proto));

    assert_eq!(
        delegate.get(&target, &"inherited".into(), None).unwrap(),
        Some(Value::data(json!("from proto")))
    );
    // Own slots shadow the chain.
    delegate
        .set(&target, "inherited".into(), Value::data(json!("own")))
        .unwrap();
    assert_eq!(
        delegate.get(&target, &"inherited".into(), None).unwrap(),
        Some(Value::data(json!("own")))
    );
}

#[test]
fn has_walks_the_chain_but_own_keys_do_not() {
    let delegate = MemoryDelegate::new();
    let proto = Arc::new(Target::with_properties([(
        PropKey::from("inherited"),
        Value::data(json!(1)),
    )]));
    let target = Arc::new(Target::with_properties([(
        PropKey::from("own"),
        Value::data(json!(2)),
    )]));
    target.set_prototype(Some(proto));

    assert!(delegate.has(&target, &"inherited".into()).unwrap());
    assert!(delegate.has(&target, &"own".into()).unwrap());
    assert!(!delegate.has(&target, &"absent".into()).unwrap());

    assert_eq!(delegate.own_keys(&target).unwrap(), vec![PropKey::from("own")]);
}

#[test]
fn enumerate_dedups_shadowed_keys() {
    let delegate = MemoryDelegate::new();
    let proto = Arc::new(Target::with_properties([
        (PropKey::from("shared"), Value::data(json!("proto"))),
        (PropKey::from("proto_only"), Value::data(json!(1))),
    ]));
    let target = Arc::new(Target::with_properties([(
        PropKey::from("shared"),
        Value::data(json!("own")),
    )]));
    target.set_prototype(Some(proto));
    target.define(
        "hidden".into(),
        PropertyDescriptor::data(Value::data(json!(0))).enumerable(false),
    );

    let keys = delegate.enumerate(&target).unwrap();
    assert_eq!(
        keys.iter().filter(|k| **k == PropKey::from("shared")).count(),
        1
    );
    assert!(keys.contains(&PropKey::from("proto_only")));
    assert!(!keys.contains(&PropKey::from("hidden")));
}

// --- Descriptors ---

#[test]
fn descriptor_lookup_is_own_only() {
    let delegate = MemoryDelegate::new();
    let proto = Arc::new(Target::with_properties([(
        PropKey::from("inherited"),
        Value::data(json!(1)),
    )]));
    let target = object();
    target.set_prototype(Some(proto));

    assert!(
        delegate
            .get_own_property_descriptor(&target, &"inherited".into())
            .unwrap()
            .is_none()
    );
}

#[test]
fn define_property_refuses_non_configurable_slots() {
    let delegate = MemoryDelegate::new();
    let target = object();
    target.define(
        "pinned".into(),
        PropertyDescriptor::data(Value::data(json!(1))).configurable(false),
    );

    let replacement = PropertyDescriptor::data(Value::data(json!(2)));
    assert!(
        !delegate
            .define_property(&target, "pinned".into(), replacement)
            .unwrap()
    );
    assert_eq!(
        target.value_of(&"pinned".into()),
        Some(Value::data(json!(1)))
    );
}

// --- Deletion ---

#[test]
fn delete_removes_configurable_slots() {
    let delegate = MemoryDelegate::new();
    let target = object();
    delegate
        .set(&target, "x".into(), Value::data(json!(1)))
        .unwrap();

    assert!(delegate.delete_property(&target, &"x".into()).unwrap());
    assert_eq!(delegate.get(&target, &"x".into(), None).unwrap(), None);
}

#[test]
fn delete_refuses_non_configurable_slots() {
    let delegate = MemoryDelegate::new();
    let target = object();
    target.define(
        "pinned".into(),
        PropertyDescriptor::data(Value::data(json!(1))).configurable(false),
    );

    assert!(!delegate.delete_property(&target, &"pinned".into()).unwrap());
    assert!(target.value_of(&"pinned".into()).is_some());
}

#[test]
fn delete_absent_succeeds() {
    let delegate = MemoryDelegate::new();
    let target = object();

    assert!(delegate.delete_property(&target, &"ghost".into()).unwrap());
}

// --- Extensibility and prototypes ---

#[test]
fn prevent_extensions_is_observable_and_blocks_prototype_swap() {
    let delegate = MemoryDelegate::new();
    let target = object();

    assert!(delegate.is_extensible(&target).unwrap());
    assert!(delegate.prevent_extensions(&target).unwrap());
    assert!(!delegate.is_extensible(&target).unwrap());

    let proto = object();
    assert!(!delegate.set_prototype_of(&target, Some(proto)).unwrap());
}

#[test]
fn prototype_round_trip() {
    let delegate = MemoryDelegate::new();
    let proto = object();
    let target = object();

    assert!(delegate.get_prototype_of(&target).unwrap().is_none());
    assert!(
        delegate
            .set_prototype_of(&target, Some(proto.clone()))
            .unwrap()
    );
    assert!(Arc::ptr_eq(
        &delegate.get_prototype_of(&target).unwrap().unwrap(),
        &proto
    ));
}

// --- Invocation ---

#[test]
fn slot_tables_are_not_callable() {
    let delegate = MemoryDelegate::new();
    let target = object();

    assert!(matches!(
        delegate.apply(&target, None, &[]),
        Err(DelegateError::NotCallable)
    ));
    assert!(matches!(
        delegate.construct(&target, &[], &target),
        Err(DelegateError::NotConstructable)
    ));
}
