#![deny(missing_docs)]
//! Change-stream layer: writes and deletes become subscribable events.
//!
//! [`ObservableLayer`] reacts to the `set` and `delete_property` traps by
//! fanning a [`ChangeEvent`] out to its subscribed observers, answers the
//! observable-protocol key on `get` with a subscribe-capable stream
//! handle, and stays transparent for every other operation — composition
//! with other layers is unaffected.
//!
//! The layer never errors. Once its end handle fires it completes the
//! stream (each observer's `complete`, exactly once) and silently drops
//! all later activity: a stream drains to completion when its source
//! disappears, it doesn't fail the caller performing the mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use trap0::{
    ChangeEvent, EndHandle, Gate, Layer, LayerError, ObjectRef, Observable, Observer, Opinion,
    PropKey, ProtocolKey, Subscription, Value,
};

/// Observer table and lifecycle, shared between the layer, the stream
/// handles it hands out, and its end handle.
struct Inner {
    /// Keyed by a monotonic id: membership matters, order doesn't.
    observers: Mutex<HashMap<u64, Arc<Observer>>>,
    next_id: AtomicU64,
    gate: Gate,
}

impl Inner {
    fn subscribe(this: &Arc<Self>, observer: Observer) -> Subscription {
        let id = this.next_id.fetch_add(1, Ordering::Relaxed);
        this.observers
            .lock()
            .unwrap()
            .insert(id, Arc::new(observer));

        let weak: Weak<Self> = Arc::downgrade(this);
        Subscription::new(move || {
            // Removal by id: unsubscribing twice is harmless.
            if let Some(inner) = weak.upgrade() {
                inner.observers.lock().unwrap().remove(&id);
            }
        })
    }

    fn emit(&self, event: ChangeEvent) {
        if self.gate.is_ended() {
            tracing::trace!(key = %event.key, "membrane.observe.dropped");
            return;
        }

        // Snapshot before fan-out: a callback may subscribe or
        // unsubscribe mid-dispatch without deadlock, skips, or double
        // notification. Cancellation takes effect at the next dispatch.
        let snapshot: Vec<Arc<Observer>> = {
            let observers = self.observers.lock().unwrap();
            observers.values().cloned().collect()
        };
        for observer in snapshot {
            if let Some(next) = &observer.next {
                next(&event);
            }
        }
    }

    fn end(&self) {
        if !self.gate.end() {
            return;
        }

        let drained: Vec<Arc<Observer>> = {
            let mut observers = self.observers.lock().unwrap();
            observers.drain().map(|(_, observer)| observer).collect()
        };
        tracing::debug!(observers = drained.len(), "membrane.observe.complete");
        for observer in drained {
            if let Some(complete) = &observer.complete {
                complete();
            }
        }
    }
}

/// Layer that exposes one object's write/delete traffic as an event
/// stream.
///
/// Subscribe directly, or through the [`Observable`] handle the layer
/// answers the observable-protocol key with — the handle lets a generic
/// stream consumer interoperate with the wrapped object without ever
/// holding the layer itself.
///
/// Subscribing is not lifecycle-gated: observers added after end are
/// accepted but can never be notified — the stream completed and no
/// further events will fire.
pub struct ObservableLayer {
    inner: Arc<Inner>,
}

impl ObservableLayer {
    /// Create the layer and surrender an end handle through `register`.
    ///
    /// `register` is called exactly once, during construction. When the
    /// host fires the handle, every subscribed observer's `complete`
    /// runs exactly once and the observer table is released; firing it
    /// again is a no-op.
    pub fn new(register: impl FnOnce(EndHandle)) -> Self {
        let inner = Arc::new(Inner {
            observers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            gate: Gate::new(),
        });

        let end_inner = Arc::clone(&inner);
        register(EndHandle::new(move || end_inner.end()));

        Self { inner }
    }

    /// Add an observer to the stream.
    pub fn subscribe(&self, observer: Observer) -> Subscription {
        Inner::subscribe(&self.inner, observer)
    }

    /// A subscribe-capable handle bound to this layer's subscription
    /// logic. The handle holds the layer weakly; once the layer is gone,
    /// subscribing through a stale handle yields an inert subscription.
    pub fn observable(&self) -> Observable {
        let weak = Arc::downgrade(&self.inner);
        Observable::new(move |observer| match weak.upgrade() {
            Some(inner) => Inner::subscribe(&inner, observer),
            None => Subscription::new(|| {}),
        })
    }
}

impl Layer for ObservableLayer {
    fn set(
        &self,
        _target: &ObjectRef,
        key: &PropKey,
        value: &Value,
        _receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        self.inner.emit(ChangeEvent {
            key: key.clone(),
            value: Some(value.clone()),
        });
        // Observes only — a terminal layer answers whether the
        // assignment took effect.
        Ok(Opinion::Pass)
    }

    fn get(
        &self,
        _target: &ObjectRef,
        key: &PropKey,
        _receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        if *key == PropKey::Protocol(ProtocolKey::Observable) {
            return Ok(Opinion::Claim(Some(Value::Stream(self.observable()))));
        }
        Ok(Opinion::Pass)
    }

    fn delete_property(
        &self,
        _target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Opinion<bool>, LayerError> {
        self.inner.emit(ChangeEvent {
            key: key.clone(),
            value: None,
        });
        Ok(Opinion::Pass)
    }
}
