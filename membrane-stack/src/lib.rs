#![deny(missing_docs)]
//! Ordered layer pipeline and end-of-life coordination.
//!
//! The [`LayerStack`] collects multiple [`Layer`] implementations into an
//! ordered pipeline. For each structural operation, layers are consulted
//! in registration order; the first [`Opinion::Claim`] short-circuits —
//! subsequent layers are not called. Layer errors propagate immediately:
//! a structural failure must reach the caller performing the mutation.
//!
//! [`Teardown`] is the host side of the lifecycle contract: it collects
//! the [`EndHandle`]s layers surrender at construction and fires them
//! when the wrapped object is discarded.

use std::sync::{Arc, Mutex};
use trap0::{
    EndHandle, Layer, LayerError, ObjectRef, Opinion, PropKey, PropertyDescriptor, TrapKind,
    Value,
};

/// An ordered pipeline of layers around one wrapped object.
///
/// Layers are consulted in the order they were added. `Pass` falls
/// through to the next layer; the first `Claim` is the pipeline's
/// answer; if every layer passes, the overall answer is `Pass` and the
/// host consults its delegate or primitive behavior.
pub struct LayerStack {
    layers: Vec<Arc<dyn Layer>>,
}

impl LayerStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a layer to the end of the pipeline.
    pub fn add(&mut self, layer: Arc<dyn Layer>) {
        self.layers.push(layer);
    }

    /// Number of layers in the pipeline.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn dispatch<T>(
        &self,
        trap: TrapKind,
        mut invoke: impl FnMut(&dyn Layer) -> Result<Opinion<T>, LayerError>,
    ) -> Result<Opinion<T>, LayerError> {
        tracing::trace!(trap = %trap, layers = self.layers.len(), "membrane.stack.dispatch");
        for layer in &self.layers {
            match invoke(layer.as_ref())? {
                Opinion::Pass => continue,
                claim => return Ok(claim),
            }
        }
        Ok(Opinion::Pass)
    }

    /// Dispatch a `set` through the pipeline.
    pub fn set(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        value: &Value,
        receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::Set, |layer| layer.set(target, key, value, receiver))
    }

    /// Dispatch a `get` through the pipeline.
    pub fn get(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        self.dispatch(TrapKind::Get, |layer| layer.get(target, key, receiver))
    }

    /// Dispatch a `get_own_property_descriptor` through the pipeline.
    pub fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Opinion<Option<PropertyDescriptor>>, LayerError> {
        self.dispatch(TrapKind::GetOwnPropertyDescriptor, |layer| {
            layer.get_own_property_descriptor(target, key)
        })
    }

    /// Dispatch a `get_prototype_of` through the pipeline.
    pub fn get_prototype_of(
        &self,
        target: &ObjectRef,
    ) -> Result<Opinion<Option<ObjectRef>>, LayerError> {
        self.dispatch(TrapKind::GetPrototypeOf, |layer| {
            layer.get_prototype_of(target)
        })
    }

    /// Dispatch a `set_prototype_of` through the pipeline.
    pub fn set_prototype_of(
        &self,
        target: &ObjectRef,
        proto: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::SetPrototypeOf, |layer| {
            layer.set_prototype_of(target, proto)
        })
    }

    /// Dispatch a `define_property` through the pipeline.
    pub fn define_property(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        descriptor: &PropertyDescriptor,
    ) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::DefineProperty, |layer| {
            layer.define_property(target, key, descriptor)
        })
    }

    /// Dispatch a `delete_property` through the pipeline.
    pub fn delete_property(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::DeleteProperty, |layer| {
            layer.delete_property(target, key)
        })
    }

    /// Dispatch an `enumerate` through the pipeline.
    pub fn enumerate(&self, target: &ObjectRef) -> Result<Opinion<Vec<PropKey>>, LayerError> {
        self.dispatch(TrapKind::Enumerate, |layer| layer.enumerate(target))
    }

    /// Dispatch an `is_extensible` through the pipeline.
    pub fn is_extensible(&self, target: &ObjectRef) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::IsExtensible, |layer| layer.is_extensible(target))
    }

    /// Dispatch an `own_keys` through the pipeline.
    pub fn own_keys(&self, target: &ObjectRef) -> Result<Opinion<Vec<PropKey>>, LayerError> {
        self.dispatch(TrapKind::OwnKeys, |layer| layer.own_keys(target))
    }

    /// Dispatch an `apply` through the pipeline.
    pub fn apply(
        &self,
        target: &ObjectRef,
        this: Option<&ObjectRef>,
        args: &[Value],
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        self.dispatch(TrapKind::Apply, |layer| layer.apply(target, this, args))
    }

    /// Dispatch a `construct` through the pipeline.
    pub fn construct(
        &self,
        target: &ObjectRef,
        args: &[Value],
        new_target: &ObjectRef,
    ) -> Result<Opinion<ObjectRef>, LayerError> {
        self.dispatch(TrapKind::Construct, |layer| {
            layer.construct(target, args, new_target)
        })
    }

    /// Dispatch a `has` through the pipeline.
    pub fn has(&self, target: &ObjectRef, key: &PropKey) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::Has, |layer| layer.has(target, key))
    }

    /// Dispatch a `prevent_extensions` through the pipeline.
    pub fn prevent_extensions(&self, target: &ObjectRef) -> Result<Opinion<bool>, LayerError> {
        self.dispatch(TrapKind::PreventExtensions, |layer| {
            layer.prevent_extensions(target)
        })
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Host-side collector for the end handles layers surrender at
/// construction.
///
/// Pass `|handle| teardown.add(handle)` as each layer constructor's
/// registration function, then call [`Teardown::end`] once when the
/// wrapped object is discarded. Handles fire in registration order;
/// calling `end` again is a no-op, and the handles themselves tolerate
/// repeated firing.
#[derive(Debug, Default)]
pub struct Teardown {
    handles: Mutex<Vec<EndHandle>>,
}

impl Teardown {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a layer's end handle.
    pub fn add(&self, handle: EndHandle) {
        self.handles.lock().unwrap().push(handle);
    }

    /// Number of handles currently collected.
    pub fn len(&self) -> usize {
        self.handles.lock().unwrap().len()
    }

    /// Whether no handles are collected.
    pub fn is_empty(&self) -> bool {
        self.handles.lock().unwrap().is_empty()
    }

    /// Fire every collected handle and release them.
    pub fn end(&self) {
        let drained: Vec<EndHandle> = {
            let mut handles = self.handles.lock().unwrap();
            handles.drain(..).collect()
        };
        tracing::debug!(handles = drained.len(), "membrane.stack.teardown");
        for handle in drained {
            handle.end();
        }
    }
}
