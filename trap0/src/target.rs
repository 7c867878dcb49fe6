//! Target objects — the wrapped records structural operations act on.

use crate::key::PropKey;
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Shared reference to a wrapped object.
///
/// Object identity is pointer identity: two `ObjectRef`s name the same
/// object iff [`Arc::ptr_eq`] holds. Every trap signature takes targets
/// and receivers in this form.
pub type ObjectRef = Arc<Target>;

/// How a single property is stored: its value plus the structural
/// attributes the primitive operations consult.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// The property value.
    pub value: Value,
    /// Whether assignment may replace the value.
    pub writable: bool,
    /// Whether enumeration surfaces the key.
    pub enumerable: bool,
    /// Whether the property may be redefined or deleted.
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// A plain data property: writable, enumerable, configurable.
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Set the writable attribute.
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Set the enumerable attribute.
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    /// Set the configurable attribute.
    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }
}

/// One wrapped object: a slot table, an optional prototype link, and an
/// extensibility flag.
///
/// Interior-mutable so a shared [`ObjectRef`] can be read and written
/// through the primitive operations without external locking. These
/// methods are the raw storage primitives; policy (writability checks,
/// extensibility refusal) belongs to the delegate that drives them.
#[derive(Debug)]
pub struct Target {
    slots: RwLock<BTreeMap<PropKey, PropertyDescriptor>>,
    proto: RwLock<Option<ObjectRef>>,
    extensible: AtomicBool,
}

impl Target {
    /// A fresh, empty, extensible object.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(BTreeMap::new()),
            proto: RwLock::new(None),
            extensible: AtomicBool::new(true),
        }
    }

    /// A fresh object pre-populated with plain data properties.
    pub fn with_properties(props: impl IntoIterator<Item = (PropKey, Value)>) -> Self {
        let target = Self::new();
        {
            let mut slots = target.slots.write().unwrap();
            for (key, value) in props {
                slots.insert(key, PropertyDescriptor::data(value));
            }
        }
        target
    }

    /// The own descriptor for `key`, if present.
    pub fn descriptor(&self, key: &PropKey) -> Option<PropertyDescriptor> {
        self.slots.read().unwrap().get(key).cloned()
    }

    /// The own value for `key`, if present.
    pub fn value_of(&self, key: &PropKey) -> Option<Value> {
        self.descriptor(key).map(|d| d.value)
    }

    /// Unconditionally install `descriptor` under `key`.
    pub fn define(&self, key: PropKey, descriptor: PropertyDescriptor) {
        self.slots.write().unwrap().insert(key, descriptor);
    }

    /// Remove the own slot for `key`. Returns whether a slot existed.
    pub fn remove(&self, key: &PropKey) -> bool {
        self.slots.write().unwrap().remove(key).is_some()
    }

    /// Every own key, enumerable or not.
    pub fn own_keys(&self) -> Vec<PropKey> {
        self.slots.read().unwrap().keys().cloned().collect()
    }

    /// Own keys whose slots are enumerable.
    pub fn enumerable_keys(&self) -> Vec<PropKey> {
        self.slots
            .read()
            .unwrap()
            .iter()
            .filter(|(_, d)| d.enumerable)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// The prototype link, if any.
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.proto.read().unwrap().clone()
    }

    /// Replace the prototype link.
    pub fn set_prototype(&self, proto: Option<ObjectRef>) {
        *self.proto.write().unwrap() = proto;
    }

    /// Whether new properties may still be added.
    pub fn is_extensible(&self) -> bool {
        self.extensible.load(Ordering::Acquire)
    }

    /// Make the object non-extensible. One-way, like the lifecycle gate.
    pub fn prevent_extensions(&self) {
        self.extensible.store(false, Ordering::Release);
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new()
    }
}
