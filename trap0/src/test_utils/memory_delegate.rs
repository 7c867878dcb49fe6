//! MemoryDelegate — primitive operations against the target's own slots.

use crate::delegate::Delegate;
use crate::error::DelegateError;
use crate::key::PropKey;
use crate::target::{ObjectRef, PropertyDescriptor};
use crate::value::Value;

/// A primitive operation provider backed by the target's slot table.
///
/// Reads and membership checks walk the prototype chain; assignment
/// respects writability and extensibility by answering `false` rather
/// than erroring. `apply` and `construct` answer
/// [`DelegateError::NotCallable`] / [`DelegateError::NotConstructable`] —
/// a slot table is not a function.
#[derive(Debug, Default)]
pub struct MemoryDelegate;

impl MemoryDelegate {
    /// A fresh delegate. Stateless: all state lives in the targets.
    pub fn new() -> Self {
        Self
    }
}

/// Walk the prototype chain from `target`, yielding the first own
/// descriptor found for `key`.
fn chain_lookup(target: &ObjectRef, key: &PropKey) -> Option<PropertyDescriptor> {
    let mut current = Some(target.clone());
    while let Some(object) = current {
        if let Some(descriptor) = object.descriptor(key) {
            return Some(descriptor);
        }
        current = object.prototype();
    }
    None
}

impl Delegate for MemoryDelegate {
    fn set(&self, target: &ObjectRef, key: PropKey, value: Value) -> Result<bool, DelegateError> {
        match target.descriptor(&key) {
            Some(descriptor) if descriptor.writable => {
                target.define(key, PropertyDescriptor { value, ..descriptor });
                Ok(true)
            }
            Some(_) => Ok(false),
            None if target.is_extensible() => {
                target.define(key, PropertyDescriptor::data(value));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        _receiver: Option<&ObjectRef>,
    ) -> Result<Option<Value>, DelegateError> {
        // Only data properties exist here, so the receiver never alters
        // the result.
        Ok(chain_lookup(target, key).map(|d| d.value))
    }

    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Option<PropertyDescriptor>, DelegateError> {
        Ok(target.descriptor(key))
    }

    fn get_prototype_of(&self, target: &ObjectRef) -> Result<Option<ObjectRef>, DelegateError> {
        Ok(target.prototype())
    }

    fn set_prototype_of(
        &self,
        target: &ObjectRef,
        proto: Option<ObjectRef>,
    ) -> Result<bool, DelegateError> {
        if !target.is_extensible() {
            return Ok(false);
        }
        target.set_prototype(proto);
        Ok(true)
    }

    fn define_property(
        &self,
        target: &ObjectRef,
        key: PropKey,
        descriptor: PropertyDescriptor,
    ) -> Result<bool, DelegateError> {
        match target.descriptor(&key) {
            Some(existing) if !existing.configurable => Ok(false),
            Some(_) => {
                target.define(key, descriptor);
                Ok(true)
            }
            None if target.is_extensible() => {
                target.define(key, descriptor);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_property(&self, target: &ObjectRef, key: &PropKey) -> Result<bool, DelegateError> {
        match target.descriptor(key) {
            Some(descriptor) if descriptor.configurable => {
                target.remove(key);
                Ok(true)
            }
            Some(_) => Ok(false),
            // Deleting an absent property succeeds: it is already gone.
            None => Ok(true),
        }
    }

    fn enumerate(&self, target: &ObjectRef) -> Result<Vec<PropKey>, DelegateError> {
        let mut keys = Vec::new();
        let mut current = Some(target.clone());
        while let Some(object) = current {
            for key in object.enumerable_keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            current = object.prototype();
        }
        Ok(keys)
    }

    fn is_extensible(&self, target: &ObjectRef) -> Result<bool, DelegateError> {
        Ok(target.is_extensible())
    }

    fn own_keys(&self, target: &ObjectRef) -> Result<Vec<PropKey>, DelegateError> {
        Ok(target.own_keys())
    }

    fn apply(
        &self,
        _target: &ObjectRef,
        _this: Option<&ObjectRef>,
        _args: &[Value],
    ) -> Result<Option<Value>, DelegateError> {
        Err(DelegateError::NotCallable)
    }

    fn construct(
        &self,
        _target: &ObjectRef,
        _args: &[Value],
        _new_target: &ObjectRef,
    ) -> Result<ObjectRef, DelegateError> {
        Err(DelegateError::NotConstructable)
    }

    fn has(&self, target: &ObjectRef, key: &PropKey) -> Result<bool, DelegateError> {
        Ok(chain_lookup(target, key).is_some())
    }

    fn prevent_extensions(&self, target: &ObjectRef) -> Result<bool, DelegateError> {
        target.prevent_extensions();
        Ok(true)
    }
}
