//! Acceptance tests for the trap protocol crate.
//!
//! Tests cover:
//! - Trait object safety (Arc/Box<dyn Trait> are Send + Sync)
//! - Default-method transparency of an empty layer
//! - Vocabulary serde forms and display names
//! - Lifecycle gate monotonicity and end-handle idempotence
//! - Observer normalization and subscription handles
//! - Target slot primitives

use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use trap0::*;

fn _assert_send_sync<T: Send + Sync>() {}

// --- Object safety ---

#[test]
fn arc_layer_is_send_sync() {
    _assert_send_sync::<Arc<dyn Layer>>();
}

#[test]
fn box_layer_is_send_sync() {
    _assert_send_sync::<Box<dyn Layer>>();
}

#[test]
fn arc_delegate_is_send_sync() {
    _assert_send_sync::<Arc<dyn Delegate>>();
}

// --- Default transparency ---

/// A layer that overrides nothing.
struct NullLayer;

impl Layer for NullLayer {}

#[test]
fn empty_layer_passes_every_trap() {
    let layer = NullLayer;
    let target = Arc::new(Target::new());
    let key = PropKey::from("foo");
    let value = Value::data(json!(1));
    let descriptor = PropertyDescriptor::data(value.clone());

    assert!(layer.set(&target, &key, &value, None).unwrap().is_pass());
    assert!(layer.get(&target, &key, None).unwrap().is_pass());
    assert!(
        layer
            .get_own_property_descriptor(&target, &key)
            .unwrap()
            .is_pass()
    );
    assert!(layer.get_prototype_of(&target).unwrap().is_pass());
    assert!(layer.set_prototype_of(&target, None).unwrap().is_pass());
    assert!(
        layer
            .define_property(&target, &key, &descriptor)
            .unwrap()
            .is_pass()
    );
    assert!(layer.delete_property(&target, &key).unwrap().is_pass());
    assert!(layer.enumerate(&target).unwrap().is_pass());
    assert!(layer.is_extensible(&target).unwrap().is_pass());
    assert!(layer.own_keys(&target).unwrap().is_pass());
    assert!(layer.apply(&target, None, &[]).unwrap().is_pass());
    assert!(layer.construct(&target, &[], &target).unwrap().is_pass());
    assert!(layer.has(&target, &key).unwrap().is_pass());
    assert!(layer.prevent_extensions(&target).unwrap().is_pass());
}

#[test]
fn opinion_claimed_extracts_the_answer() {
    let claim: Opinion<bool> = Opinion::Claim(true);
    assert!(!claim.is_pass());
    assert_eq!(claim.claimed(), Some(true));

    let pass: Opinion<bool> = Opinion::Pass;
    assert_eq!(pass.claimed(), None);
}

// --- Vocabulary ---

#[test]
fn trap_kind_covers_the_full_vocabulary() {
    assert_eq!(TrapKind::ALL.len(), 14);
    assert_eq!(TrapKind::Set.to_string(), "set");
    assert_eq!(
        TrapKind::GetOwnPropertyDescriptor.to_string(),
        "get_own_property_descriptor"
    );
    assert_eq!(TrapKind::PreventExtensions.to_string(), "prevent_extensions");
}

#[test]
fn trap_kind_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(TrapKind::DeleteProperty).unwrap(),
        json!("delete_property")
    );
}

#[test]
fn prop_key_conversions() {
    assert_eq!(PropKey::from("foo"), PropKey::Name("foo".into()));
    assert_eq!(PropKey::from(3u64), PropKey::Index(3));
    assert_eq!(
        PropKey::observable(),
        PropKey::Protocol(ProtocolKey::Observable)
    );
}

#[test]
fn prop_key_display_names_the_key() {
    assert_eq!(PropKey::from("foo").to_string(), "foo");
    assert_eq!(PropKey::from(7u64).to_string(), "7");
    assert_eq!(PropKey::observable().to_string(), "@@observable");
}

#[test]
fn prop_key_round_trips_through_serde() {
    let keys = [
        PropKey::from("foo"),
        PropKey::from(42u64),
        PropKey::observable(),
    ];
    for key in keys {
        let encoded = serde_json::to_string(&key).unwrap();
        let decoded: PropKey = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, key);
    }
}

#[test]
fn value_accessors_split_data_from_streams() {
    let data = Value::data(json!({"n": 1}));
    assert_eq!(data.as_data(), Some(&json!({"n": 1})));
    assert!(data.as_stream().is_none());

    let stream = Value::Stream(Observable::new(|_| Subscription::new(|| {})));
    assert!(stream.as_data().is_none());
    assert!(stream.as_stream().is_some());
}

#[test]
fn values_compare_by_payload() {
    assert_eq!(Value::data(json!(1)), Value::data(json!(1)));
    assert_ne!(Value::data(json!(1)), Value::data(json!(2)));

    let stream = Observable::new(|_| Subscription::new(|| {}));
    let other = Observable::new(|_| Subscription::new(|| {}));
    assert_eq!(Value::Stream(stream.clone()), Value::Stream(stream.clone()));
    assert_ne!(Value::Stream(stream.clone()), Value::Stream(other));
    assert_ne!(Value::Stream(stream), Value::data(json!(null)));
}

#[test]
fn change_event_removal_is_explicit() {
    let wrote = ChangeEvent::wrote("x", Value::data(json!(1)));
    assert!(!wrote.is_removal());
    assert_eq!(wrote.value, Some(Value::data(json!(1))));

    let removed = ChangeEvent::removed("x");
    assert!(removed.is_removal());
    assert_eq!(removed.key, PropKey::from("x"));
    assert_eq!(removed.value, None);
}

// --- Lifecycle ---

#[test]
fn gate_transitions_exactly_once() {
    let gate = Gate::new();
    assert!(!gate.is_ended());
    assert!(gate.end());
    assert!(gate.is_ended());
    assert!(!gate.end());
    assert!(gate.is_ended());
}

#[test]
fn end_handle_is_safe_to_fire_repeatedly() {
    let transitions = Arc::new(AtomicU32::new(0));
    let gate = Arc::new(Gate::new());

    let handle = {
        let transitions = Arc::clone(&transitions);
        let gate = Arc::clone(&gate);
        EndHandle::new(move || {
            if gate.end() {
                transitions.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    handle.end();
    handle.end();
    handle.clone().end();

    assert_eq!(transitions.load(Ordering::SeqCst), 1);
    assert!(gate.is_ended());
}

// --- Observers ---

#[test]
fn observer_normalizes_positional_callbacks() {
    let observer = Observer::on_next(|_| {})
        .with_error(|_| {})
        .with_complete(|| {});
    assert!(observer.next.is_some());
    assert!(observer.error.is_some());
    assert!(observer.complete.is_some());

    let empty = Observer::new();
    assert!(empty.next.is_none());
    assert!(empty.error.is_none());
    assert!(empty.complete.is_none());
}

#[test]
fn observable_routes_subscribe_to_its_source() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let observable = {
        let seen = Arc::clone(&seen);
        Observable::new(move |observer| {
            seen.lock().unwrap().push(observer.next.is_some());
            Subscription::new(|| {})
        })
    };

    observable.subscribe(Observer::on_next(|_| {}));
    observable.as_observable().subscribe(Observer::new());

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    assert!(observable.same_source(&observable.as_observable()));
}

#[test]
fn subscription_runs_its_cancel_action() {
    let cancels = Arc::new(AtomicU32::new(0));
    let subscription = {
        let cancels = Arc::clone(&cancels);
        Subscription::new(move || {
            cancels.fetch_add(1, Ordering::SeqCst);
        })
    };

    subscription.unsubscribe();
    subscription.unsubscribe();
    assert_eq!(cancels.load(Ordering::SeqCst), 2);
}

// --- Targets ---

#[test]
fn target_stores_and_removes_slots() {
    let target = Target::with_properties([
        (PropKey::from("a"), Value::data(json!(1))),
        (PropKey::from("b"), Value::data(json!(2))),
    ]);

    assert_eq!(target.value_of(&"a".into()), Some(Value::data(json!(1))));
    assert_eq!(target.value_of(&"missing".into()), None);
    assert_eq!(target.own_keys().len(), 2);

    assert!(target.remove(&"a".into()));
    assert!(!target.remove(&"a".into()));
    assert_eq!(target.own_keys(), vec![PropKey::from("b")]);
}

#[test]
fn target_enumerable_keys_respect_attributes() {
    let target = Target::new();
    target.define(
        "visible".into(),
        PropertyDescriptor::data(Value::data(json!(1))),
    );
    target.define(
        "hidden".into(),
        PropertyDescriptor::data(Value::data(json!(2))).enumerable(false),
    );

    assert_eq!(target.own_keys().len(), 2);
    assert_eq!(target.enumerable_keys(), vec![PropKey::from("visible")]);
}

#[test]
fn target_extensibility_is_one_way() {
    let target = Target::new();
    assert!(target.is_extensible());
    target.prevent_extensions();
    assert!(!target.is_extensible());
}

#[test]
fn target_prototype_link() {
    let proto = Arc::new(Target::new());
    let target = Target::new();
    assert!(target.prototype().is_none());

    target.set_prototype(Some(proto.clone()));
    assert!(Arc::ptr_eq(&target.prototype().unwrap(), &proto));

    target.set_prototype(None);
    assert!(target.prototype().is_none());
}
